//! Component category vocabulary and the heuristic classifier.
//!
//! A closed enum over the fixed category set, each variant carrying its
//! keyword table, common values/parts, manufacturer names, storage
//! suggestion, and a specification template for manual entry. The
//! classifier is a pure scoring function over these tables — no external
//! calls — and doubles as the deterministic core of the pattern fallback
//! in [`crate::llm`].

use serde::{Deserialize, Serialize};

/// The fixed component vocabulary. Declaration order is the tie-break
/// order for classification scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Resistor,
    Capacitor,
    Arduino,
    Microcontroller,
    Connector,
    Ic,
    Led,
    Transistor,
    Diode,
    Sensor,
    Display,
    Module,
    Switch,
    Relay,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Resistor,
        Category::Capacitor,
        Category::Arduino,
        Category::Microcontroller,
        Category::Connector,
        Category::Ic,
        Category::Led,
        Category::Transistor,
        Category::Diode,
        Category::Sensor,
        Category::Display,
        Category::Module,
        Category::Switch,
        Category::Relay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Resistor => "resistor",
            Category::Capacitor => "capacitor",
            Category::Arduino => "arduino",
            Category::Microcontroller => "microcontroller",
            Category::Connector => "connector",
            Category::Ic => "ic",
            Category::Led => "led",
            Category::Transistor => "transistor",
            Category::Diode => "diode",
            Category::Sensor => "sensor",
            Category::Display => "display",
            Category::Module => "module",
            Category::Switch => "switch",
            Category::Relay => "relay",
        }
    }

    /// Parse a normalized (lower-case) category name.
    pub fn parse(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Keyword table, pre-lowercased for substring matching.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Resistor => &["resistor", "resistance", "ohm", "ω", "kω", "mω"],
            Category::Capacitor => &["capacitor", "cap", "farad", "μf", "nf", "pf"],
            Category::Arduino => &["arduino", "uno", "mega", "nano", "mini", "pro micro"],
            Category::Microcontroller => &[
                "mcu",
                "microcontroller",
                "atmega",
                "stm32",
                "esp32",
                "esp8266",
                "pic",
            ],
            Category::Connector => &[
                "connector",
                "header",
                "socket",
                "jst",
                "dupont",
                "pin header",
                "usb",
            ],
            Category::Ic => &["ic", "integrated circuit", "chip", "logic", "timer", "555", "7805"],
            Category::Led => &["led", "light emitting diode", "rgb led", "smd led"],
            Category::Transistor => &["transistor", "mosfet", "bjt", "fet", "2n2222", "bc547"],
            Category::Diode => &["diode", "rectifier", "1n4007", "1n4148", "schottky"],
            Category::Sensor => &[
                "sensor",
                "temperature",
                "humidity",
                "pressure",
                "motion",
                "dht",
                "bmp",
            ],
            Category::Display => &["display", "lcd", "oled", "tft", "screen", "7-segment"],
            Category::Module => &["module", "board", "breakout", "shield"],
            Category::Switch => &["switch", "button", "pushbutton", "toggle", "slide"],
            Category::Relay => &["relay", "solid state relay", "ssr"],
        }
    }

    /// Common values and part numbers, pre-lowercased. Scores below
    /// keywords but above manufacturers.
    pub fn common_values(self) -> &'static [&'static str] {
        match self {
            Category::Resistor => &["10k", "1k", "100", "220", "330", "470", "1m"],
            Category::Capacitor => &["100uf", "10uf", "1uf", "0.1uf", "100nf"],
            Category::Transistor => &["2n2222", "2n3904", "bc547", "irfz44n"],
            Category::Diode => &["1n4001", "1n4007", "1n4148", "1n5819"],
            Category::Sensor => &["dht11", "dht22", "bmp280", "mpu6050", "hc-sr04"],
            _ => &[],
        }
    }

    /// Manufacturer names, pre-lowercased.
    pub fn manufacturers(self) -> &'static [&'static str] {
        match self {
            Category::Arduino => &["arduino"],
            Category::Microcontroller => {
                &["atmel", "stmicroelectronics", "espressif", "microchip"]
            }
            _ => &[],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Resistor => "Passive component that resists current flow",
            Category::Capacitor => "Passive component that stores electrical energy",
            Category::Arduino => "Microcontroller development board",
            Category::Microcontroller => "Programmable integrated circuit",
            Category::Connector => "Interface for connecting components or wires",
            Category::Ic => "Integrated circuit with multiple components",
            Category::Led => "Light emitting diode",
            Category::Transistor => "Semiconductor device for switching or amplification",
            Category::Diode => "Semiconductor allowing current in one direction",
            Category::Sensor => "Device that detects and responds to environmental input",
            Category::Display => "Visual output device",
            Category::Module => "Pre-assembled circuit board module",
            Category::Switch => "Mechanical device for controlling electrical flow",
            Category::Relay => "Electrically operated switch",
        }
    }

    /// Suggested storage bin for the inventory UI.
    pub fn storage_suggestion(self) -> &'static str {
        match self {
            Category::Resistor => "Passive Components - Resistors",
            Category::Capacitor => "Passive Components - Capacitors",
            Category::Arduino => "Development Boards",
            Category::Microcontroller => "ICs - Microcontrollers",
            Category::Connector => "Connectors & Headers",
            Category::Ic => "ICs - General",
            Category::Led => "Active Components - LEDs",
            Category::Transistor => "Active Components - Transistors",
            Category::Diode => "Active Components - Diodes",
            Category::Sensor => "Sensors & Modules",
            Category::Display => "Displays",
            Category::Module => "Modules & Breakouts",
            Category::Switch => "Switches & Buttons",
            Category::Relay => "Relays & Switches",
        }
    }

    /// Specification template for guided manual entry: field name → example.
    pub fn spec_template(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Resistor => &[
                ("resistance", "e.g., 10kΩ"),
                ("tolerance", "e.g., ±5%"),
                ("power_rating", "e.g., 0.25W"),
                ("package", "e.g., 0805, through-hole"),
            ],
            Category::Capacitor => &[
                ("capacitance", "e.g., 100uF"),
                ("voltage_rating", "e.g., 25V"),
                ("type", "e.g., electrolytic, ceramic"),
                ("package", "e.g., radial, SMD"),
            ],
            Category::Arduino => &[
                ("model", "e.g., Uno R3"),
                ("voltage", "e.g., 5V"),
                ("microcontroller", "e.g., ATmega328P"),
                ("digital_pins", "e.g., 14"),
                ("analog_pins", "e.g., 6"),
            ],
            Category::Microcontroller => &[
                ("model", "e.g., STM32F103"),
                ("architecture", "e.g., ARM Cortex-M3"),
                ("frequency", "e.g., 72MHz"),
                ("voltage", "e.g., 3.3V"),
                ("flash", "e.g., 64KB"),
                ("ram", "e.g., 20KB"),
            ],
            Category::Connector => &[
                ("type", "e.g., JST, pin header"),
                ("pins", "e.g., 10"),
                ("pitch", "e.g., 2.54mm"),
                ("mounting", "e.g., through-hole, SMD"),
            ],
            Category::Led => &[
                ("color", "e.g., Red, RGB"),
                ("forward_voltage", "e.g., 2.0V"),
                ("forward_current", "e.g., 20mA"),
                ("package", "e.g., 5mm, 0603 SMD"),
            ],
            _ => &[
                ("value", "Component value"),
                ("voltage", "Operating voltage"),
                ("package", "Package type"),
            ],
        }
    }
}

/// Storage suggestion for a normalized type name, including types outside
/// the vocabulary ("unknown" candidates still need a bin).
pub fn storage_suggestion_for(name: &str) -> &'static str {
    match Category::parse(name) {
        Some(category) => category.storage_suggestion(),
        None => "General Components",
    }
}

/// Rank candidate categories for a free-text description, best first.
///
/// Case-insensitive substring scoring: +10 per keyword hit, +5 per common
/// value/part hit, +3 per manufacturer hit. Zero-score categories are
/// excluded; ties keep declaration order.
pub fn classify(text: &str) -> Vec<Category> {
    let text = text.to_lowercase();
    let mut matches: Vec<(Category, u32)> = Vec::new();

    for category in Category::ALL {
        let mut score = 0u32;
        for keyword in category.keywords() {
            if text.contains(keyword) {
                score += 10;
            }
        }
        for value in category.common_values() {
            if text.contains(value) {
                score += 5;
            }
        }
        for manufacturer in category.manufacturers() {
            if text.contains(manufacturer) {
                score += 3;
            }
        }
        if score > 0 {
            matches.push((category, score));
        }
    }

    // Stable sort keeps declaration order on ties.
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.into_iter().map(|(category, _)| category).collect()
}

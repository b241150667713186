//! Pattern-based extraction — the local fallback when the completion
//! engine is unavailable or returns garbage.
//!
//! Category detection walks an ordered pattern list (specific signatures
//! like a development-board marking before generic ones like a bare IC
//! number), then targeted regexes pull out a part number and the
//! category-specific specification fields. Confidence is a fixed low
//! constant: pattern hits are weaker evidence than a model's estimate.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::candidate::{ComponentCandidate, RecognitionMethod};
use crate::category::Category;

/// Fallback results always carry this confidence.
const FALLBACK_CONFIDENCE: f64 = 30.0;

/// Category signatures, most specific first. Order matters: an Arduino
/// silkscreen also matches the microcontroller patterns.
static CATEGORY_PATTERNS: LazyLock<Vec<(Category, Vec<Regex>)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid category pattern"))
            .collect()
    };
    vec![
        (
            Category::Arduino,
            compile(&[
                r"\barduino\b",
                r"\buno\b.*\br3\b",
                r"\bmega\s*2560\b",
                r"\bmega\b.*\badk\b",
                r"\bmega\b",
                r"\bnano\b",
                r"\bmicro\b",
                r"\bleonardo\b",
                r"\bdue\b",
                r"\batmega\d+.*\b(arduino|board)\b",
                r"\b(made|designed)\s+in\s+italy\b",
            ]),
        ),
        (
            Category::Microcontroller,
            compile(&[
                r"\batmega\d+[a-z]*\b",
                r"\bstm32\b",
                r"\besp32\b",
                r"\besp8266\b",
                r"\bpic\d+",
                r"\bmcu\b",
                r"\barm\s*cortex\b",
                r"\bsamd\d+\b",
                r"\brp2040\b",
            ]),
        ),
        (
            Category::Resistor,
            compile(&[r"\b\d+[km]?[Ωω]\b", r"\bresist", r"\bohm"]),
        ),
        (
            Category::Capacitor,
            compile(&[r"\b\d+[uμnp]?f\b", r"\bcap\b", r"\bfarad"]),
        ),
        (
            Category::Ic,
            compile(&[r"\b[0-9]{3,4}[a-z]?\b", r"\bintegrated\s*circuit\b", r"\bchip\b"]),
        ),
        (Category::Led, compile(&[r"\bled\b", r"\blight\s*emitting"])),
        (
            Category::Connector,
            compile(&[
                r"\bconnector\b",
                r"\bheader\b",
                r"\bjst\b",
                r"\busb\b",
                r"\bpin\s*header\b",
            ]),
        ),
        (
            Category::Transistor,
            compile(&[r"\btransistor\b", r"\bmosfet\b", r"\bbjt\b", r"\b2n\d+\b"]),
        ),
        (
            Category::Diode,
            compile(&[r"\bdiode\b", r"\b1n\d+\b", r"\brectifier\b"]),
        ),
        (
            Category::Sensor,
            compile(&[r"\bsensor\b", r"\bdht\d+\b", r"\bbmp\d+\b", r"\bmpu\d+\b"]),
        ),
    ]
});

/// Part-number shapes, generic to mixed. Case-sensitive: real part
/// numbers are printed upper-case and lower-casing would match prose.
static PART_NUMBER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[A-Z]{2,}\d{3,}[A-Z\d-]*", // STM32F103, ATMEGA328P
        r"\b\d{3,4}[A-Z]?\b",        // 555, 7805
        r"[A-Z]\d{2,}[A-Z\d]*",      // L7805, 2N2222
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid part number pattern"))
    .collect()
});

struct SpecPatterns {
    resistance: Regex,
    tolerance: Regex,
    power: Regex,
    capacitance: Regex,
    voltage: Regex,
    frequency: Regex,
    pins: Regex,
    pitch: Regex,
}

static SPEC_PATTERNS: LazyLock<SpecPatterns> = LazyLock::new(|| SpecPatterns {
    resistance: Regex::new(r"(\d+\.?\d*)\s*([kKmM]?)[Ωω]").expect("valid regex"),
    tolerance: Regex::new(r"([±]?\d+)%").expect("valid regex"),
    power: Regex::new(r"(\d+\.?\d*)\s*[Ww]").expect("valid regex"),
    capacitance: Regex::new(r"(\d+\.?\d*)\s*([uμnp]?)[Ff]").expect("valid regex"),
    voltage: Regex::new(r"(\d+)\s*[Vv]").expect("valid regex"),
    frequency: Regex::new(r"(?i)(\d+)\s*mhz").expect("valid regex"),
    pins: Regex::new(r"(?i)(\d+)\s*pin").expect("valid regex"),
    pitch: Regex::new(r"(?i)(\d+\.?\d*)\s*mm").expect("valid regex"),
});

/// Best-effort extraction from raw text. Returns `None` when no category
/// signature matches at all — callers treat that as "no data".
pub fn extract(text: &str) -> Option<ComponentCandidate> {
    log::info!("[LLM] Using fallback pattern matching extraction");

    let category = detect_category(text)?;
    let part_number = extract_part_number(text);

    let name = format!(
        "{} - {}",
        capitalize(category.name()),
        part_number.as_deref().unwrap_or("Unknown")
    );

    Some(
        ComponentCandidate {
            component_type: category.name().to_string(),
            name,
            part_number,
            manufacturer: None,
            specifications: extract_specs(text, category),
            description: None,
            tags: vec![category.name().to_string()],
            recognition_confidence: FALLBACK_CONFIDENCE,
            recognition_method: RecognitionMethod::PatternFallback,
        }
        .validated(),
    )
}

fn detect_category(text: &str) -> Option<Category> {
    for (category, patterns) in CATEGORY_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(text)) {
            return Some(*category);
        }
    }
    None
}

fn extract_part_number(text: &str) -> Option<String> {
    PART_NUMBER_PATTERNS
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| m.as_str().to_string())
}

/// Pull category-specific specification fields out of free text.
///
/// Also used directly by hosts to parse manually entered specification
/// lines for a known category.
pub fn extract_specs(text: &str, category: Category) -> BTreeMap<String, String> {
    let p = &*SPEC_PATTERNS;
    let mut specs = BTreeMap::new();

    match category {
        Category::Resistor => {
            if let Some(caps) = p.resistance.captures(text) {
                let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                specs.insert("resistance".to_string(), format!("{}{}Ω", &caps[1], unit));
            }
            if let Some(caps) = p.tolerance.captures(text) {
                specs.insert("tolerance".to_string(), format!("{}%", &caps[1]));
            }
            if let Some(caps) = p.power.captures(text) {
                specs.insert("power_rating".to_string(), format!("{}W", &caps[1]));
            }
        }
        Category::Capacitor => {
            if let Some(caps) = p.capacitance.captures(text) {
                let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                specs.insert("capacitance".to_string(), format!("{}{}F", &caps[1], unit));
            }
            if let Some(caps) = p.voltage.captures(text) {
                specs.insert("voltage_rating".to_string(), format!("{}V", &caps[1]));
            }
        }
        Category::Arduino | Category::Microcontroller => {
            if let Some(caps) = p.voltage.captures(text) {
                specs.insert("voltage".to_string(), format!("{}V", &caps[1]));
            }
            if let Some(caps) = p.frequency.captures(text) {
                specs.insert("frequency".to_string(), format!("{}MHz", &caps[1]));
            }
        }
        Category::Connector => {
            if let Some(caps) = p.pins.captures(text) {
                specs.insert("pins".to_string(), caps[1].to_string());
            }
            if let Some(caps) = p.pitch.captures(text) {
                specs.insert("pitch".to_string(), format!("{}mm", &caps[1]));
            }
        }
        _ => {}
    }

    specs
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arduino_signature_beats_microcontroller() {
        // ATmega text alone is a microcontroller; the board marking
        // promotes it to arduino.
        let candidate = extract("ARDUINO UNO R3 ATMEGA328P MADE IN ITALY").unwrap();
        assert_eq!(candidate.component_type, "arduino");
        assert_eq!(candidate.recognition_method, RecognitionMethod::PatternFallback);
        assert_eq!(candidate.recognition_confidence, 30.0);
    }

    #[test]
    fn bare_mcu_marking_is_a_microcontroller() {
        let candidate = extract("ATMEGA328P-PU 1827").unwrap();
        assert_eq!(candidate.component_type, "microcontroller");
        assert_eq!(candidate.part_number.as_deref(), Some("ATMEGA328P-PU"));
    }

    #[test]
    fn resistor_specs_are_extracted() {
        let candidate = extract("10kΩ ±5% 0.25W resistor").unwrap();
        assert_eq!(candidate.component_type, "resistor");
        assert_eq!(candidate.specifications["resistance"], "10kΩ");
        assert_eq!(candidate.specifications["tolerance"], "±5%");
        assert_eq!(candidate.specifications["power_rating"], "0.25W");
    }

    #[test]
    fn capacitor_specs_are_extracted() {
        let specs = extract_specs("100uF 25V electrolytic", Category::Capacitor);
        assert_eq!(specs["capacitance"], "100uF");
        assert_eq!(specs["voltage_rating"], "25V");
    }

    #[test]
    fn connector_specs_are_extracted() {
        let specs = extract_specs("40 pin header 2.54mm pitch", Category::Connector);
        assert_eq!(specs["pins"], "40");
        assert_eq!(specs["pitch"], "2.54mm");
    }

    #[test]
    fn unrecognizable_text_yields_no_data() {
        assert!(extract("fuzzy picture of a cat").is_none());
    }

    #[test]
    fn name_includes_part_number_when_found() {
        let candidate = extract("NE555P timer chip").unwrap();
        assert_eq!(candidate.part_number.as_deref(), Some("NE555P"));
        assert_eq!(candidate.name, "Ic - NE555P");
    }
}

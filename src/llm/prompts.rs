//! Extraction prompt contracts.
//!
//! These prompts are the contract between the pipeline and the model
//! engines: a single JSON object, the ComponentCandidate field set, and
//! explicit confidence rules for thin or garbled text.

pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f64 = 0.1;

/// System prompt for the text extraction path.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an expert in electronic components and always return valid JSON.";

/// Builds the user message for text-based extraction.
pub fn build_extraction_prompt(ocr_text: &str) -> String {
    format!(
        r#"You are an expert in electronic components. Analyze the following text that was extracted from a component image using OCR.

IMPORTANT CONTEXT:
- The text may be incomplete, garbled, or minimal due to OCR limitations
- If the text contains mostly symbols or very short fragments, it might be a component with color bands (resistor) or minimal labeling
- Look for ANY recognizable patterns: part numbers, values, manufacturer codes, component type keywords
- Common boards: Arduino (Uno, Mega, Nano), ESP32, ESP8266, Raspberry Pi
- Arduino boards often have "Arduino", "ATmega", or "Made in Italy" text visible
- Development boards are usually blue PCBs with lots of pins and USB connectors

OCR Text:
{ocr_text}

Extract and return a JSON object with the following fields:
- component_type: Type of component (arduino, microcontroller, resistor, capacitor, connector, ic, led, sensor, transistor, diode, module, etc.)
- name: A descriptive name for the component
- part_number: Manufacturer part number if present
- manufacturer: Manufacturer name if present (e.g., "Arduino", "Espressif", "Atmel")
- specifications: Object with technical specs
  * For Arduino/boards: {{"model": "Mega 2560", "microcontroller": "ATmega2560", "voltage": "5V", "pins": "54 digital, 16 analog"}}
  * For resistors: {{"resistance": "10k", "tolerance": "5%", "power_rating": "0.25W"}}
  * For capacitors: {{"capacitance": "100uF", "voltage_rating": "25V", "type": "electrolytic"}}
  * For ICs/MCUs: {{"model": "ATmega328P", "voltage": "5V", "frequency": "16MHz"}}
- description: Brief description
- tags: Array of relevant tags (e.g., ["development-board", "5v", "usb"], ["smd", "through-hole"], etc.)
- recognition_confidence: Your confidence in this identification (0-100)

Rules:
- If you see "Arduino", "ATmega" with numbers, "MEGA", "UNO" - it's likely an Arduino board (component_type: "arduino")
- If text is minimal/garbled (< 10 meaningful characters), set confidence to 15 or lower
- For Arduino boards: try to identify the model (Uno, Mega 2560, Nano, etc.) and list the microcontroller chip
- For resistors: include resistance value, tolerance, power rating
- For capacitors: include capacitance, voltage rating, type (ceramic, electrolytic, etc.)
- For ICs/microcontrollers: include model number, voltage, key features
- For connectors: include pitch, pin count, type
- If a field cannot be determined, use null
- Be conservative with confidence score - if text is unclear, use low confidence (10-30)
- If NO meaningful component info can be extracted, set component_type to "unknown" and confidence to 5

Return ONLY valid JSON, no additional text."#
    )
}

/// Instruction sent alongside the raw image on the vision path. Same field
/// set, plus what makes the component visually identifiable.
pub const VISION_PROMPT: &str = r#"You are an expert in electronic components. Analyze this image and identify the component.

Return a JSON object with:
- component_type: Type (arduino, resistor, capacitor, ic, led, sensor, transistor, diode, module, etc.)
- name: Descriptive name
- part_number: Part number if visible
- manufacturer: Manufacturer if visible
- specifications: Technical specs as object
- description: What you see in the image
- visual_features: What makes this component identifiable (color bands, shape, markings, etc.)
- recognition_confidence: Your confidence (0-100)

For resistors, identify color bands and calculate resistance.
For Arduino/boards, identify the model and microcontroller.
For ICs, read the part number from the chip.

Return ONLY valid JSON."#;

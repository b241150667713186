//! Pipeline output types — ComponentCandidate and RecognitionSignal.
//!
//! A candidate mirrors the JSON contract the language/vision models are
//! instructed to return. Deserialization is deliberately lenient (models do
//! not always comply); `validate` is the single normalization pass that
//! every path applies before a candidate leaves its extractor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::Category;

/// Which recognizer produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecognitionMethod {
    #[serde(rename = "pattern-fallback")]
    PatternFallback,
    #[serde(rename = "text-ai")]
    TextAi,
    #[serde(rename = "vision-ai")]
    VisionAi,
    #[serde(rename = "color-code")]
    ColorCode,
}

/// A structured, confidence-scored component record — the pipeline's output
/// unit. Constructed fresh per photograph, never mutated after construction
/// except by the confirmation step in [`crate::store`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCandidate {
    pub component_type: String,
    pub name: String,
    pub part_number: Option<String>,
    pub manufacturer: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// 0–100, self-reported or heuristically assigned. Not a probability.
    pub recognition_confidence: f64,
    pub recognition_method: RecognitionMethod,
}

impl ComponentCandidate {
    /// Normalize a candidate in place. Idempotent: validating an
    /// already-valid candidate leaves it unchanged.
    ///
    /// - confidence clamped to [0, 100]
    /// - component type lower-cased, trimmed, and mapped to the category
    ///   vocabulary or "unknown"
    pub fn validate(&mut self) {
        self.recognition_confidence = self.recognition_confidence.clamp(0.0, 100.0);
        if !self.recognition_confidence.is_finite() {
            self.recognition_confidence = 0.0;
        }
        let normalized = self.component_type.trim().to_lowercase();
        self.component_type = match Category::parse(&normalized) {
            Some(category) => category.name().to_string(),
            None => "unknown".to_string(),
        };
    }

    /// Convenience constructor that normalizes on the way out.
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }
}

/// Raw extraction payload as the models actually return it.
///
/// Missing fields, nulls, and wrong-shaped containers are all tolerated;
/// `into_candidate` applies the defaults the pipeline guarantees.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawExtraction {
    #[serde(default)]
    component_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    part_number: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
    #[serde(default)]
    specifications: serde_json::Value,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: serde_json::Value,
    #[serde(default)]
    recognition_confidence: Option<f64>,
}

impl RawExtraction {
    pub(crate) fn into_candidate(self, method: RecognitionMethod) -> ComponentCandidate {
        ComponentCandidate {
            component_type: self
                .component_type
                .unwrap_or_else(|| "unknown".to_string())
                .to_lowercase(),
            name: self.name.unwrap_or_else(|| "Unknown Component".to_string()),
            part_number: self.part_number,
            manufacturer: self.manufacturer,
            specifications: coerce_string_map(self.specifications),
            description: self.description,
            tags: coerce_string_list(self.tags),
            recognition_confidence: self.recognition_confidence.unwrap_or(50.0),
            recognition_method: method,
        }
        .validated()
    }
}

/// Force a JSON value into a string→string mapping. Non-object shapes
/// collapse to an empty map; scalar values are stringified.
fn coerce_string_map(value: serde_json::Value) -> BTreeMap<String, String> {
    let serde_json::Value::Object(map) = value else {
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

/// Force a JSON value into a list of strings. Non-array shapes collapse to
/// an empty list.
fn coerce_string_list(value: serde_json::Value) -> Vec<String> {
    let serde_json::Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// Per-photograph evidence gathered before any model call.
///
/// Produced by the text extractor and the color-band analyzer, consumed
/// only by the orchestrator. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct RecognitionSignal {
    pub raw_text: String,
    /// Detected band colors, dominant first.
    pub detected_colors: Vec<String>,
    /// Which preprocessing strategy produced the winning text.
    pub strategy_used: Option<crate::ocr::preprocess::Strategy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComponentCandidate {
        ComponentCandidate {
            component_type: "resistor".to_string(),
            name: "10kΩ Resistor".to_string(),
            part_number: None,
            manufacturer: None,
            specifications: BTreeMap::from([(
                "resistance".to_string(),
                "10kΩ".to_string(),
            )]),
            description: None,
            tags: vec!["resistor".to_string()],
            recognition_confidence: 80.0,
            recognition_method: RecognitionMethod::TextAi,
        }
    }

    #[test]
    fn validate_clamps_confidence() {
        let mut c = sample();
        c.recognition_confidence = 150.0;
        c.validate();
        assert_eq!(c.recognition_confidence, 100.0);

        c.recognition_confidence = -3.0;
        c.validate();
        assert_eq!(c.recognition_confidence, 0.0);
    }

    #[test]
    fn validate_normalizes_type_to_vocabulary() {
        let mut c = sample();
        c.component_type = " Resistor ".to_string();
        c.validate();
        assert_eq!(c.component_type, "resistor");

        c.component_type = "flux capacitor".to_string();
        c.validate();
        assert_eq!(c.component_type, "unknown");
    }

    #[test]
    fn validate_is_idempotent() {
        let mut once = sample();
        once.component_type = "ARDUINO".to_string();
        once.recognition_confidence = 101.0;
        once.validate();
        let mut twice = once.clone();
        twice.validate();
        assert_eq!(once, twice);
    }

    #[test]
    fn raw_extraction_tolerates_wrong_shapes() {
        let raw: RawExtraction = serde_json::from_str(
            r#"{
                "component_type": "Capacitor",
                "specifications": "not an object",
                "tags": {"also": "wrong"},
                "recognition_confidence": 130
            }"#,
        )
        .unwrap();
        let candidate = raw.into_candidate(RecognitionMethod::TextAi);
        assert_eq!(candidate.component_type, "capacitor");
        assert_eq!(candidate.name, "Unknown Component");
        assert!(candidate.specifications.is_empty());
        assert!(candidate.tags.is_empty());
        assert_eq!(candidate.recognition_confidence, 100.0);
    }

    #[test]
    fn raw_extraction_stringifies_scalar_specs() {
        let raw: RawExtraction = serde_json::from_str(
            r#"{
                "component_type": "connector",
                "specifications": {"pins": 10, "pitch": "2.54mm"},
                "tags": ["connector", 5]
            }"#,
        )
        .unwrap();
        let candidate = raw.into_candidate(RecognitionMethod::TextAi);
        assert_eq!(candidate.specifications["pins"], "10");
        assert_eq!(candidate.specifications["pitch"], "2.54mm");
        assert_eq!(candidate.tags, vec!["connector".to_string(), "5".to_string()]);
    }

    #[test]
    fn method_serializes_as_kebab_case() {
        let json = serde_json::to_string(&RecognitionMethod::ColorCode).unwrap();
        assert_eq!(json, "\"color-code\"");
        let back: RecognitionMethod = serde_json::from_str("\"pattern-fallback\"").unwrap();
        assert_eq!(back, RecognitionMethod::PatternFallback);
    }
}

//! Google Cloud Vision backend.
//!
//! Label/text annotation rather than structured extraction: the response
//! is a flat label list, so the candidate is assembled heuristically with
//! a fixed mid confidence. Weaker than GPT-4o but free-tier friendly.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::VisionExtract;
use crate::candidate::{ComponentCandidate, RecognitionMethod};
use crate::error::EngineError;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Label annotation carries no structured confidence we can trust for a
/// specific component identity.
const LABEL_CONFIDENCE: f64 = 60.0;

pub(super) fn is_configured() -> bool {
    api_key().is_some()
}

fn api_key() -> Option<String> {
    std::env::var("GOOGLE_VISION_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

pub struct GoogleVision {
    client: reqwest::Client,
}

impl GoogleVision {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn annotate(&self, image: &[u8]) -> Result<serde_json::Value, EngineError> {
        let Some(key) = api_key() else {
            return Err(EngineError::NotConfigured("GOOGLE_VISION_API_KEY"));
        };

        log::info!("[VISION] Provider: google");
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(format!("{}?key={}", ANNOTATE_URL, key))
            .json(&serde_json::json!({
                "requests": [{
                    "image": {"content": STANDARD.encode(image)},
                    "features": [
                        {"type": "LABEL_DETECTION", "maxResults": 10},
                        {"type": "TEXT_DETECTION"},
                        {"type": "OBJECT_LOCALIZATION", "maxResults": 5}
                    ]
                }]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        log::info!("[VISION] API latency: {}ms", start.elapsed().as_millis());
        Ok(body)
    }
}

impl Default for GoogleVision {
    fn default() -> Self {
        Self::new()
    }
}

/// Map detected labels and transcribed text onto the category vocabulary,
/// most specific first. Labels are often generic ("Electronic component")
/// while the transcript names the part, so both contribute.
fn infer_type(labels: &[String], text: Option<&str>) -> &'static str {
    let mut joined = labels.join(" ").to_lowercase();
    if let Some(text) = text {
        joined.push(' ');
        joined.push_str(&text.to_lowercase());
    }
    if joined.contains("resistor") || joined.contains("resistance") {
        "resistor"
    } else if joined.contains("capacitor") {
        "capacitor"
    } else if joined.contains("arduino") || joined.contains("microcontroller") {
        "arduino"
    } else if joined.contains("circuit") || joined.contains("board") {
        "module"
    } else if joined.contains("led") || joined.contains("diode") {
        "led"
    } else {
        "unknown"
    }
}

fn candidate_from_annotations(
    labels: Vec<String>,
    ocr_text: Option<String>,
) -> ComponentCandidate {
    let text = ocr_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let component_type = infer_type(&labels, text);
    let name = labels
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown Component".to_string());
    let mut specifications = BTreeMap::new();
    if let Some(text) = text {
        specifications.insert("visible_text".to_string(), text.to_string());
    }
    let description = if labels.is_empty() {
        None
    } else {
        Some(format!("Labels: {}", labels.join(", ")))
    };
    ComponentCandidate {
        component_type: component_type.to_string(),
        name,
        part_number: None,
        manufacturer: None,
        specifications,
        description,
        tags: labels.iter().map(|l| l.to_lowercase()).collect(),
        recognition_confidence: LABEL_CONFIDENCE,
        recognition_method: RecognitionMethod::VisionAi,
    }
    .validated()
}

impl VisionExtract for GoogleVision {
    async fn recognize(&self, image: &[u8]) -> Option<ComponentCandidate> {
        let body = match self.annotate(image).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("[VISION] Google call failed: {}", e);
                return None;
            }
        };

        let annotations = &body["responses"][0];
        let labels: Vec<String> = annotations["labelAnnotations"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["description"].as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let ocr_text = annotations["textAnnotations"][0]["description"]
            .as_str()
            .map(|s| s.to_string());

        // Either annotation kind can identify the part on its own.
        let has_text = ocr_text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        if labels.is_empty() && !has_text {
            log::warn!("[VISION] Google returned no labels and no text");
            return None;
        }

        let candidate = candidate_from_annotations(labels, ocr_text);
        log::info!(
            "[VISION] Recognized {} from labels (confidence {:.0})",
            candidate.component_type,
            candidate.recognition_confidence
        );
        Some(candidate)
    }

    fn is_available(&self) -> bool {
        is_configured()
    }
}

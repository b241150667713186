//! Recognition orchestrator — photograph bytes in, one of four outcomes out.
//!
//! Stage order is fixed: decode, color-band analysis, OCR, structured
//! text extraction, vision escalation, final confidence gate. Only the
//! decode step can error; every later stage degrades instead of failing,
//! so a photograph always yields an [`Outcome`].

use image::DynamicImage;

use crate::candidate::{ComponentCandidate, RecognitionMethod, RecognitionSignal};
use crate::color::{self, DetectionParams};
use crate::error::RecognitionError;
use crate::llm::{CompletionEngine, StructuredExtractor};
use crate::ocr::{TextEngine, TextExtractor};
use crate::vision::VisionExtract;

/// Thresholds that drive the orchestrator's decisions. Defaults match
/// the tuned production values; hosts override per deployment.
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Confidence assigned to a candidate built from color bands alone.
    pub color_confidence: f64,
    /// Text candidates below this escalate to the vision path.
    pub escalation_threshold: f64,
    /// A vision candidate must beat this to displace a text candidate.
    pub vision_override: f64,
    /// Candidates below this (or typed "unknown") are not accepted.
    pub acceptance_threshold: f64,
    /// With 1-2 color bands, text shorter than this is "no data".
    pub minimal_text_len: usize,
    /// Text shorter than this is not worth a model call.
    pub llm_text_floor: usize,
    pub detection: DetectionParams,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            color_confidence: 65.0,
            escalation_threshold: 25.0,
            vision_override: 40.0,
            acceptance_threshold: 20.0,
            minimal_text_len: 10,
            llm_text_floor: 3,
            detection: DetectionParams::default(),
        }
    }
}

/// Terminal result of processing one photograph.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Confident identification, ready for user confirmation.
    Accepted(ComponentCandidate),
    /// Nothing usable in the photograph.
    InsufficientData {
        colors_detected: usize,
        text_len: usize,
    },
    /// A candidate exists but is too weak to present as an identification.
    LowConfidence { text_preview: String },
    /// Color bands were found but do not form a readable resistor code.
    UncalculableColors { colors: Vec<String> },
}

/// The full pipeline over injected capability engines: `T` extracts text,
/// `C` completes prompts, `V` recognizes images.
pub struct Recognizer<T, C, V> {
    text: TextExtractor<T>,
    structured: StructuredExtractor<C>,
    vision: V,
    config: RecognitionConfig,
}

impl<T, C, V> Recognizer<T, C, V>
where
    T: TextEngine,
    C: CompletionEngine,
    V: VisionExtract,
{
    pub fn new(text_engine: T, completion_engine: C, vision: V) -> Self {
        Self::with_config(text_engine, completion_engine, vision, RecognitionConfig::default())
    }

    pub fn with_config(
        text_engine: T,
        completion_engine: C,
        vision: V,
        config: RecognitionConfig,
    ) -> Self {
        Self {
            text: TextExtractor::new(text_engine),
            structured: StructuredExtractor::new(completion_engine),
            vision,
            config,
        }
    }

    /// Process one photograph. Errors only when the bytes are not a
    /// decodable image.
    pub async fn process(&self, image_bytes: &[u8]) -> Result<Outcome, RecognitionError> {
        let image = image::load_from_memory(image_bytes)?;
        log::info!(
            "[PIPELINE] Image decoded: {}x{}",
            image.width(),
            image.height()
        );

        let signal = self.gather_signal(&image);
        let text_len = signal.raw_text.chars().count();
        log::info!(
            "[PIPELINE] Signal: {} text chars, {} color bands",
            text_len,
            signal.detected_colors.len()
        );

        // A readable band sequence settles the question without any model.
        if signal.detected_colors.len() >= 3 {
            return Ok(match color::compute_value(&signal.detected_colors) {
                Some(value) => {
                    log::info!("[PIPELINE] Resistor from color bands: {}", value);
                    Outcome::Accepted(self.color_candidate(&signal.detected_colors, &value))
                }
                None => {
                    log::info!("[PIPELINE] Color bands present but not a readable code");
                    Outcome::UncalculableColors {
                        colors: signal.detected_colors,
                    }
                }
            });
        }

        if !signal.detected_colors.is_empty() && text_len < self.config.minimal_text_len {
            log::info!("[PIPELINE] Partial bands and almost no text, giving up");
            return Ok(Outcome::InsufficientData {
                colors_detected: signal.detected_colors.len(),
                text_len,
            });
        }

        let mut candidate = if text_len >= self.config.llm_text_floor {
            self.structured.extract(&signal.raw_text).await
        } else {
            None
        };

        let needs_vision = match &candidate {
            None => true,
            Some(c) => c.recognition_confidence < self.config.escalation_threshold,
        };
        if needs_vision && self.vision.is_available() {
            log::info!("[PIPELINE] Escalating to vision recognition");
            if let Some(vision_candidate) = self.vision.recognize(image_bytes).await {
                let replaces = match &candidate {
                    None => true,
                    Some(current) => {
                        vision_candidate.recognition_confidence > self.config.vision_override
                            && vision_candidate.recognition_confidence
                                > current.recognition_confidence
                    }
                };
                if replaces {
                    log::info!(
                        "[PIPELINE] Vision candidate wins (confidence {:.0})",
                        vision_candidate.recognition_confidence
                    );
                    candidate = Some(vision_candidate);
                }
            }
        }

        Ok(match candidate {
            None => Outcome::InsufficientData {
                colors_detected: signal.detected_colors.len(),
                text_len,
            },
            Some(c)
                if c.recognition_confidence < self.config.acceptance_threshold
                    || c.component_type == "unknown" =>
            {
                log::info!(
                    "[PIPELINE] Candidate too weak: {} at {:.0}",
                    c.component_type,
                    c.recognition_confidence
                );
                Outcome::LowConfidence {
                    text_preview: signal.raw_text.chars().take(300).collect(),
                }
            }
            Some(c) => {
                log::info!(
                    "[PIPELINE] Accepted {} via {:?} (confidence {:.0})",
                    c.component_type,
                    c.recognition_method,
                    c.recognition_confidence
                );
                Outcome::Accepted(c)
            }
        })
    }

    fn gather_signal(&self, image: &DynamicImage) -> RecognitionSignal {
        let detected_colors =
            color::detect_bands(image, &self.config.detection).unwrap_or_default();
        let extraction = self.text.extract(image);
        RecognitionSignal {
            raw_text: extraction.text,
            detected_colors,
            strategy_used: extraction.strategy_used,
        }
    }

    fn color_candidate(&self, colors: &[String], value: &str) -> ComponentCandidate {
        let bands = colors
            .iter()
            .take(4)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        ComponentCandidate {
            component_type: "resistor".to_string(),
            name: format!("{} Resistor", value),
            part_number: None,
            manufacturer: None,
            specifications: std::collections::BTreeMap::from([(
                "resistance".to_string(),
                value.to_string(),
            )]),
            description: Some(format!("Resistor identified by color bands: {}", bands)),
            tags: vec![
                "resistor".to_string(),
                "color-coded".to_string(),
                "through-hole".to_string(),
            ],
            recognition_confidence: self.config.color_confidence,
            recognition_method: RecognitionMethod::ColorCode,
        }
        .validated()
    }
}

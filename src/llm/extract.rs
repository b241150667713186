//! Structured text extraction — the primary text-to-candidate path.
//!
//! Sends OCR text to a [`CompletionEngine`] under the JSON extraction
//! contract and parses the reply leniently. Any failure (no credential,
//! transport error, unparseable reply) degrades to the local pattern
//! fallback; this function never surfaces an error to the orchestrator.

use crate::candidate::{ComponentCandidate, RawExtraction, RecognitionMethod};

use super::prompts::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use super::{fallback, strip_code_fences, CompletionEngine};

pub struct StructuredExtractor<C> {
    engine: C,
}

impl<C: CompletionEngine> StructuredExtractor<C> {
    pub fn new(engine: C) -> Self {
        Self { engine }
    }

    /// Extract a candidate from OCR text.
    ///
    /// Returns `None` only when both the engine path and the pattern
    /// fallback produce nothing. Model-path candidates are kept even at
    /// "unknown"/low confidence: the orchestrator decides what to do
    /// with weak identifications.
    pub async fn extract(&self, text: &str) -> Option<ComponentCandidate> {
        if text.trim().is_empty() {
            return None;
        }

        if !self.engine.is_configured() {
            log::warn!("[LLM] No completion engine configured, using pattern fallback");
            return fallback::extract(text);
        }

        let reply = match self
            .engine
            .complete(EXTRACTION_SYSTEM_PROMPT, &build_extraction_prompt(text))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("[LLM] Extraction call failed: {}, using pattern fallback", e);
                return fallback::extract(text);
            }
        };

        let body = strip_code_fences(&reply);
        match serde_json::from_str::<RawExtraction>(&body) {
            Ok(raw) => {
                let candidate = raw.into_candidate(RecognitionMethod::TextAi);
                log::info!(
                    "[LLM] Extracted {} (confidence {:.0})",
                    candidate.component_type,
                    candidate.recognition_confidence
                );
                Some(candidate)
            }
            Err(e) => {
                log::warn!("[LLM] Unparseable reply ({}), using pattern fallback", e);
                fallback::extract(text)
            }
        }
    }
}

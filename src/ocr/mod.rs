//! OCR domain — text extraction over multiple preprocessing variants.
//!
//! The engine itself is an external collaborator behind [`TextEngine`];
//! this module owns the strategy loop: try each preprocessing variant in
//! priority order, retry with the page-layout configuration when the
//! sparse-text one comes back thin, keep the longest text seen, and stop
//! early once the signal is good enough.

pub mod preprocess;
#[cfg(feature = "tesseract-ocr")]
pub mod tesseract;

use image::{DynamicImage, GrayImage};

use crate::error::EngineError;
use preprocess::Strategy;

/// Recognition configuration passed to the engine per attempt.
///
/// The tesseract backend maps these to page-segmentation modes: sparse
/// text for component labels, automatic page layout as the more robust
/// alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrConfig {
    SparseText,
    PageLayout,
}

/// External text-recognition engine boundary.
pub trait TextEngine {
    fn extract_text(&self, image: &GrayImage, config: OcrConfig) -> Result<String, EngineError>;
}

/// Result of the strategy loop: the winning text and which preprocessing
/// variant produced it (for diagnostics).
#[derive(Debug, Clone, Default)]
pub struct TextExtraction {
    pub text: String,
    pub strategy_used: Option<Strategy>,
}

/// Runs preprocessing strategies against a [`TextEngine`], keeping the
/// best result.
pub struct TextExtractor<T> {
    engine: T,
    /// Below this many characters, retry the same image with the
    /// alternate engine configuration.
    retry_floor: usize,
    /// Above this many characters, stop trying further strategies.
    good_enough: usize,
}

impl<T: TextEngine> TextExtractor<T> {
    pub fn new(engine: T) -> Self {
        Self {
            engine,
            retry_floor: 5,
            good_enough: 15,
        }
    }

    /// Extract text from a photograph.
    ///
    /// Engine failures for a single strategy are logged and skipped; an
    /// engine that fails every strategy yields an empty extraction, which
    /// the orchestrator treats as missing signal rather than an error.
    pub fn extract(&self, image: &DynamicImage) -> TextExtraction {
        let mut best = TextExtraction::default();

        for strategy in Strategy::ORDER {
            log::info!("[OCR] Trying {} preprocessing...", strategy.name());
            let processed = preprocess::preprocess(image, strategy);

            let mut text = match self.engine.extract_text(&processed, OcrConfig::SparseText) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    log::warn!("[OCR] {} strategy failed: {}", strategy.name(), e);
                    continue;
                }
            };

            // Sparse-text mode misses dense labels; give the page-layout
            // configuration a chance and keep whichever read more.
            if char_len(&text) < self.retry_floor {
                log::info!("[OCR] Trying alternate config for {}...", strategy.name());
                match self.engine.extract_text(&processed, OcrConfig::PageLayout) {
                    Ok(alt) => {
                        let alt = alt.trim().to_string();
                        if char_len(&alt) > char_len(&text) {
                            text = alt;
                        }
                    }
                    Err(e) => log::warn!("[OCR] alternate config failed: {}", e),
                }
            }

            if char_len(&text) > char_len(&best.text) {
                log::info!(
                    "[OCR] Found {} characters with {}",
                    char_len(&text),
                    strategy.name()
                );
                best = TextExtraction {
                    text,
                    strategy_used: Some(strategy),
                };
                if char_len(&best.text) > self.good_enough {
                    break;
                }
            }
        }

        log::info!("[OCR] Final text length: {}", char_len(&best.text));
        best
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted engine: pops one response per call, in order.
    struct Scripted {
        responses: RefCell<Vec<Result<String, EngineError>>>,
        calls: RefCell<Vec<OcrConfig>>,
    }

    impl Scripted {
        fn new(mut responses: Vec<Result<String, EngineError>>) -> Self {
            responses.reverse();
            Self {
                responses: RefCell::new(responses),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextEngine for Scripted {
        fn extract_text(
            &self,
            _image: &GrayImage,
            config: OcrConfig,
        ) -> Result<String, EngineError> {
            self.calls.borrow_mut().push(config);
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn blank_photo() -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            1200,
            1200,
            image::Rgb([200, 200, 200]),
        ))
    }

    #[test]
    fn stops_early_once_text_is_good_enough() {
        let engine = Scripted::new(vec![Ok("ATmega328P-PU MICROCHIP".to_string())]);
        let extractor = TextExtractor::new(engine);
        let result = extractor.extract(&blank_photo());
        assert_eq!(result.text, "ATmega328P-PU MICROCHIP");
        assert_eq!(result.strategy_used, Some(Strategy::Balanced));
        // One strategy, one config — no retries, no further strategies.
        assert_eq!(extractor.engine.calls.borrow().len(), 1);
    }

    #[test]
    fn retries_alternate_config_when_text_is_thin() {
        let engine = Scripted::new(vec![
            Ok("ab".to_string()),                     // balanced, sparse
            Ok("555 TIMER NE555P TEXAS".to_string()), // balanced, page layout
        ]);
        let extractor = TextExtractor::new(engine);
        let result = extractor.extract(&blank_photo());
        assert_eq!(result.text, "555 TIMER NE555P TEXAS");
        assert_eq!(result.strategy_used, Some(Strategy::Balanced));
        assert_eq!(
            extractor.engine.calls.borrow().as_slice(),
            &[OcrConfig::SparseText, OcrConfig::PageLayout]
        );
    }

    #[test]
    fn keeps_longest_text_across_strategies() {
        let engine = Scripted::new(vec![
            Ok("10k".to_string()),       // balanced sparse (thin)
            Ok("".to_string()),          // balanced alternate
            Ok("10k 5% CF".to_string()), // minimal sparse (longer, no retry)
            Ok("".to_string()),          // aggressive sparse
            Ok("".to_string()),          // aggressive alternate
        ]);
        let extractor = TextExtractor::new(engine);
        let result = extractor.extract(&blank_photo());
        assert_eq!(result.text, "10k 5% CF");
        assert_eq!(result.strategy_used, Some(Strategy::Minimal));
    }

    #[test]
    fn engine_failures_degrade_to_empty_extraction() {
        let engine = Scripted::new(vec![
            Err(EngineError::Ocr("boom".to_string())),
            Err(EngineError::Ocr("boom".to_string())),
            Err(EngineError::Ocr("boom".to_string())),
        ]);
        let extractor = TextExtractor::new(engine);
        let result = extractor.extract(&blank_photo());
        assert!(result.text.is_empty());
        assert_eq!(result.strategy_used, None);
    }
}

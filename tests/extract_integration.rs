//! Structured extraction tests: a deterministic fallback path, plus a
//! live Groq call that self-skips when no API key is configured.
//!
//! Run the live test with:
//!   GROQ_API_KEY=... cargo test --test extract_integration -- --nocapture

use partlens::candidate::RecognitionMethod;
use partlens::error::EngineError;
use partlens::llm::{CompletionEngine, GroqCompletion, StructuredExtractor};

/// Engine that never has a credential; forces the pattern fallback.
struct Unconfigured;

impl CompletionEngine for Unconfigured {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, EngineError> {
        Err(EngineError::NotConfigured("none"))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[tokio::test]
async fn fallback_extraction_without_any_engine() {
    let extractor = StructuredExtractor::new(Unconfigured);
    let candidate = extractor
        .extract("10kΩ 5% 0.25W carbon film resistor")
        .await
        .expect("pattern fallback should recognize a resistor");

    assert_eq!(candidate.component_type, "resistor");
    assert_eq!(candidate.recognition_method, RecognitionMethod::PatternFallback);
    assert_eq!(candidate.recognition_confidence, 30.0);
    assert_eq!(candidate.specifications["resistance"], "10kΩ");
}

#[tokio::test]
async fn live_groq_extraction() {
    partlens::load_env();
    if std::env::var("GROQ_API_KEY").map(|k| k.is_empty()).unwrap_or(true) {
        eprintln!("GROQ_API_KEY not set, skipping live extraction test");
        return;
    }
    let _ = env_logger::builder().is_test(true).try_init();

    let extractor = StructuredExtractor::new(GroqCompletion::new());
    let candidate = extractor
        .extract("ARDUINO UNO R3 ATMEGA328P-PU MADE IN ITALY")
        .await
        .expect("live extraction should produce a candidate");

    eprintln!(
        "live candidate: {} ({:.0})",
        candidate.component_type, candidate.recognition_confidence
    );
    // The model should recognize an unambiguous Arduino silkscreen.
    assert_eq!(candidate.recognition_method, RecognitionMethod::TextAi);
    assert!(
        candidate.component_type == "arduino" || candidate.component_type == "microcontroller",
        "unexpected type: {}",
        candidate.component_type
    );
    assert!(candidate.recognition_confidence >= 50.0);
}

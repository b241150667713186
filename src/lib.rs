//! partlens — photograph-to-inventory recognition for electronic components.
//!
//! Takes a photograph of a component and produces a structured,
//! confidence-scored [`candidate::ComponentCandidate`] through a staged
//! pipeline: OCR over multiple preprocessing strategies, resistor
//! color-band analysis, structured LLM extraction with a local pattern
//! fallback, and vision-model escalation when text evidence is weak.
//!
//! Hosts (a chat bot, a CLI) drive [`pipeline::Recognizer::process`] and
//! decide what to do with each [`pipeline::Outcome`]; persistence stays
//! behind [`store::InventoryStore`].

pub mod candidate;
pub mod category;
pub mod color;
pub mod error;
pub mod llm;
pub mod ocr;
pub mod pipeline;
pub mod store;
pub mod vision;

pub use candidate::{ComponentCandidate, RecognitionMethod, RecognitionSignal};
pub use category::Category;
pub use error::{EngineError, RecognitionError, StoreError};
pub use pipeline::{Outcome, RecognitionConfig, Recognizer};

/// Load environment configuration, preferring local overrides.
///
/// `.env.local` wins over `.env`; both are optional. Call once at host
/// startup before constructing engines.
pub fn load_env() {
    if dotenvy::from_filename(".env.local").is_ok() {
        log::info!("[ENV] Loaded .env.local");
    } else if dotenvy::dotenv().is_ok() {
        log::info!("[ENV] Loaded .env");
    }
}

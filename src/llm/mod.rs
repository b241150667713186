//! LLM domain — structured extraction from OCR text.
//!
//! The primary path sends extracted text to a completion engine under a
//! strict-JSON contract; the fallback path is local regex extraction over
//! the category tables. Extraction never errors outward: every failure
//! mode degrades to the fallback or to "no data".
//!
//! Modules:
//!   - extract.rs  — StructuredExtractor (primary + arbitration)
//!   - fallback.rs — pattern-based extraction, no network
//!   - groq.rs     — Groq chat-completions CompletionEngine
//!   - prompts.rs  — the JSON extraction contracts
//!   - provider.rs — provider metadata + configuration checks

mod extract;
pub mod fallback;
mod groq;
pub mod prompts;
pub mod provider;

pub use extract::StructuredExtractor;
pub use groq::GroqCompletion;

use std::future::Future;

use crate::error::EngineError;

/// External language-model completion boundary.
///
/// Implementations are expected to honor a JSON-only output contract but
/// are not trusted to: callers strip code fences and fall back on parse
/// failure.
pub trait CompletionEngine {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, EngineError>> + Send;

    /// True iff a credential is configured. Checked once per extraction,
    /// never reported as a runtime failure.
    fn is_configured(&self) -> bool;
}

/// Strip enclosing markdown code fences from a model response.
///
/// Models wrap JSON in ```json fences despite instructions; tolerate a
/// leading fence (with or without a language tag) and a trailing fence.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let without_open = if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the language tag up to the first newline, if any.
        match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        }
    } else {
        trimmed
    };
    let without_close = without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or_else(|| without_open.trim_end());
    without_close.trim().to_string()
}

//! Provider metadata — which engines exist and whether they are usable.
//!
//! A host (bot, CLI) uses this to report configuration state without
//! instantiating any engine.

use serde::{Deserialize, Serialize};

/// What a provider contributes to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Structured extraction from OCR text.
    Text,
    /// Direct image recognition.
    Vision,
}

/// Provider metadata exposed to hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub env_key: String,
    pub capability: Capability,
}

/// All known providers and their display info.
pub fn all_providers() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            id: "groq".to_string(),
            name: "Groq — Llama text extraction".to_string(),
            env_key: "GROQ_API_KEY".to_string(),
            capability: Capability::Text,
        },
        ProviderInfo {
            id: "openai".to_string(),
            name: "OpenAI — GPT-4o vision".to_string(),
            env_key: "OPENAI_API_KEY".to_string(),
            capability: Capability::Vision,
        },
        ProviderInfo {
            id: "google".to_string(),
            name: "Google Cloud Vision — label detection".to_string(),
            env_key: "GOOGLE_VISION_API_KEY".to_string(),
            capability: Capability::Vision,
        },
    ]
}

/// Check if a provider has an API key configured.
pub fn is_provider_configured(provider_id: &str) -> bool {
    let env_key = match provider_id {
        "groq" => "GROQ_API_KEY",
        "openai" => "OPENAI_API_KEY",
        "google" => "GOOGLE_VISION_API_KEY",
        _ => return false,
    };
    std::env::var(env_key)
        .map(|k| !k.is_empty())
        .unwrap_or(false)
}

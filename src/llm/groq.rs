//! Groq chat-completions [`CompletionEngine`].
//!
//! OpenAI-compatible endpoint, API key in a bearer header. Deterministic
//! generation settings (temperature 0.1) per the extraction contract.

use std::time::Duration;

use super::prompts::{MAX_TOKENS, TEMPERATURE};
use super::CompletionEngine;
use crate::error::EngineError;

pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Bounded call timeout so a hung engine degrades instead of stalling the
/// whole pipeline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GroqCompletion {
    client: reqwest::Client,
    model: String,
}

impl GroqCompletion {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            model: GROQ_MODEL.to_string(),
        }
    }
}

impl Default for GroqCompletion {
    fn default() -> Self {
        Self::new()
    }
}

fn api_key() -> Option<String> {
    std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty())
}

impl CompletionEngine for GroqCompletion {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, EngineError> {
        let Some(key) = api_key() else {
            return Err(EngineError::NotConfigured("GROQ_API_KEY"));
        };

        log::info!("[LLM] Provider: groq");
        log::info!("[LLM] Model: {}", self.model);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(GROQ_URL)
            .bearer_auth(&key)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": prompt}
                ],
                "temperature": TEMPERATURE,
                "max_tokens": MAX_TOKENS,
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
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::Malformed("missing choices[0].message.content".to_string()))
    }

    fn is_configured(&self) -> bool {
        api_key().is_some()
    }
}

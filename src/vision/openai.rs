//! GPT-4o vision backend.
//!
//! Sends the photograph as an inline data URL alongside the vision
//! extraction prompt and parses the reply with the same lenient JSON
//! handling as the text path.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::VisionExtract;
use crate::candidate::{ComponentCandidate, RawExtraction, RecognitionMethod};
use crate::error::EngineError;
use crate::llm::prompts::{MAX_TOKENS, TEMPERATURE, VISION_PROMPT};
use crate::llm::strip_code_fences;

const OPENAI_MODEL: &str = "gpt-4o";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) fn is_configured() -> bool {
    api_key().is_some()
}

fn api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}

pub struct OpenAiVision {
    client: reqwest::Client,
}

impl OpenAiVision {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn call(&self, image: &[u8]) -> Result<String, EngineError> {
        let Some(key) = api_key() else {
            return Err(EngineError::NotConfigured("OPENAI_API_KEY"));
        };

        log::info!("[VISION] Provider: openai, model: {}", OPENAI_MODEL);
        let start = std::time::Instant::now();

        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(image));
        let response = self
            .client
            .post(OPENAI_URL)
            .bearer_auth(&key)
            .json(&serde_json::json!({
                "model": OPENAI_MODEL,
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": VISION_PROMPT},
                        {"type": "image_url", "image_url": {"url": data_url}}
                    ]
                }],
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
        log::info!("[VISION] API latency: {}ms", start.elapsed().as_millis());

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| EngineError::Malformed("missing choices[0].message.content".to_string()))
    }
}

impl Default for OpenAiVision {
    fn default() -> Self {
        Self::new()
    }
}

impl VisionExtract for OpenAiVision {
    async fn recognize(&self, image: &[u8]) -> Option<ComponentCandidate> {
        let reply = match self.call(image).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("[VISION] OpenAI call failed: {}", e);
                return None;
            }
        };

        let body = strip_code_fences(&reply);
        match serde_json::from_str::<RawExtraction>(&body) {
            Ok(raw) => {
                let candidate = raw.into_candidate(RecognitionMethod::VisionAi);
                log::info!(
                    "[VISION] Recognized {} (confidence {:.0})",
                    candidate.component_type,
                    candidate.recognition_confidence
                );
                Some(candidate)
            }
            Err(e) => {
                log::warn!("[VISION] Unparseable reply: {}", e);
                None
            }
        }
    }

    fn is_available(&self) -> bool {
        is_configured()
    }
}

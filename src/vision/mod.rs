//! Vision domain — direct image-to-candidate recognition.
//!
//! The escalation path for photographs whose text evidence is too weak:
//! the raw image goes to a vision model instead of its OCR transcript.
//! Like text extraction, vision never errors outward — every failure is
//! logged and collapses to `None`.

mod google;
mod openai;

pub use google::GoogleVision;
pub use openai::OpenAiVision;

use std::future::Future;

use crate::candidate::ComponentCandidate;

/// Image recognition boundary.
pub trait VisionExtract {
    /// Recognize a component from encoded image bytes (JPEG/PNG).
    /// `None` means "no usable identification", whatever the cause.
    fn recognize(&self, image: &[u8]) -> impl Future<Output = Option<ComponentCandidate>> + Send;

    /// True iff a credential is configured.
    fn is_available(&self) -> bool;
}

/// Concrete vision backend chosen at startup. OpenAI is preferred when
/// both keys are present: it returns structured candidates rather than
/// flat labels.
pub enum VisionRecognizer {
    OpenAi(OpenAiVision),
    Google(GoogleVision),
    Unavailable,
}

impl VisionRecognizer {
    pub fn from_env() -> Self {
        if openai::is_configured() {
            log::info!("[VISION] Backend: openai");
            return Self::OpenAi(OpenAiVision::new());
        }
        if google::is_configured() {
            log::info!("[VISION] Backend: google");
            return Self::Google(GoogleVision::new());
        }
        log::warn!("[VISION] No vision API key configured, escalation disabled");
        Self::Unavailable
    }
}

impl VisionExtract for VisionRecognizer {
    async fn recognize(&self, image: &[u8]) -> Option<ComponentCandidate> {
        match self {
            Self::OpenAi(backend) => backend.recognize(image).await,
            Self::Google(backend) => backend.recognize(image).await,
            Self::Unavailable => None,
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Self::OpenAi(backend) => backend.is_available(),
            Self::Google(backend) => backend.is_available(),
            Self::Unavailable => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_backend_reports_unavailable() {
        assert!(!VisionRecognizer::Unavailable.is_available());
    }

    #[tokio::test]
    async fn unavailable_backend_recognizes_nothing() {
        let recognizer = VisionRecognizer::Unavailable;
        assert!(recognizer.recognize(&[0u8; 4]).await.is_none());
    }
}

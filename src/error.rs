//! Error taxonomy for the recognition pipeline.
//!
//! Engine failures never cross the orchestrator boundary — they are caught
//! at the extractor that made the call and converted into a degraded result.
//! `RecognitionError` is reserved for inputs the pipeline cannot reason
//! about at all (bytes that are not an image).

use thiserror::Error;

/// Failure of an external capability engine (OCR, completion, vision).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed engine response: {0}")]
    Malformed(String),

    #[error("OCR engine failure: {0}")]
    Ocr(String),

    #[error("no credential configured for {0}")]
    NotConfigured(&'static str),
}

/// Unreachable-input failure of the recognition pipeline.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Failure at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),

    #[error("record rejected by store: {0}")]
    Rejected(String),
}

//! Tesseract-backed [`TextEngine`] via leptess.
//!
//! Optional backend (`tesseract-ocr` feature) — needs libtesseract and
//! libleptonica on the host. Maps [`OcrConfig`] to page-segmentation
//! modes: PSM 11 (sparse text) for component labels, PSM 3 (automatic
//! layout) as the alternate.

use std::io::Cursor;
use std::sync::Mutex;

use image::GrayImage;
use leptess::{LepTess, Variable};

use super::{OcrConfig, TextEngine};
use crate::error::EngineError;

pub struct TesseractEngine {
    // LepTess mutates internal state per recognition call.
    inner: Mutex<LepTess>,
}

impl TesseractEngine {
    pub fn new() -> Result<Self, EngineError> {
        let tess = LepTess::new(None, "eng")
            .map_err(|e| EngineError::Ocr(format!("tesseract init failed: {}", e)))?;
        Ok(Self {
            inner: Mutex::new(tess),
        })
    }
}

impl TextEngine for TesseractEngine {
    fn extract_text(&self, image: &GrayImage, config: OcrConfig) -> Result<String, EngineError> {
        let psm = match config {
            OcrConfig::SparseText => "11",
            OcrConfig::PageLayout => "3",
        };

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| EngineError::Ocr(format!("PNG encode failed: {}", e)))?;

        let mut tess = self
            .inner
            .lock()
            .map_err(|_| EngineError::Ocr("tesseract mutex poisoned".to_string()))?;
        tess.set_variable(Variable::TesseditPagesegMode, psm)
            .map_err(|e| EngineError::Ocr(format!("set PSM failed: {}", e)))?;
        tess.set_image_from_mem(&png)
            .map_err(|e| EngineError::Ocr(format!("set image failed: {}", e)))?;
        let text = tess
            .get_utf8_text()
            .map_err(|e| EngineError::Ocr(format!("recognition failed: {}", e)))?;
        Ok(text)
    }
}

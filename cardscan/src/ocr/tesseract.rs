use std::path::Path;

use async_trait::async_trait;
use leptess::LepTess;

use crate::error::{CardscanError, Result};

use super::engine::OcrEngine;

/// Tesseract through leptess.
///
/// Every recognition opens its own handle on the blocking pool, so a slow or
/// stuck image never holds up another request.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    languages: String,
}

impl TesseractEngine {
    /// Checks once that Tesseract can load `languages`.
    pub fn new(languages: &str) -> std::result::Result<Self, String> {
        LepTess::new(None, languages).map_err(|e| e.to_string())?;
        Ok(Self {
            languages: languages.to_string(),
        })
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image_path: &Path) -> Result<String> {
        let path = image_path.to_path_buf();
        let languages = self.languages.clone();

        tokio::task::spawn_blocking(move || {
            let mut lt = LepTess::new(None, &languages)
                .map_err(|e| CardscanError::Ocr(format!("Failed to initialize Tesseract: {e}")))?;
            lt.set_image(&path)
                .map_err(|e| CardscanError::Ocr(format!("Failed to set image: {e}")))?;
            lt.get_utf8_text()
                .map_err(|e| CardscanError::Ocr(format!("Failed to extract text: {e}")))
        })
        .await
        .map_err(|e| CardscanError::Ocr(format!("OCR task panicked: {e}")))?
    }
}

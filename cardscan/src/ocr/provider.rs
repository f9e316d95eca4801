use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{CardscanError, Result};

use super::engine::OcrEngine;
use super::tesseract::TesseractEngine;

#[derive(Clone)]
enum OcrBackend {
    Engine(Arc<dyn OcrEngine>),
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let model_lower = config.model.to_lowercase();
        let provider_prefix = model_lower.split('/').next().unwrap_or("local");

        let backend = match provider_prefix {
            "local" | "tesseract" => match TesseractEngine::new(&config.languages) {
                Ok(engine) => {
                    info!(languages = %config.languages, "Tesseract OCR initialized");
                    OcrBackend::Engine(Arc::new(engine))
                }
                Err(e) => {
                    let reason = format!("Tesseract not available: {e}");
                    warn!("{}", reason);
                    OcrBackend::Unavailable { reason }
                }
            },
            other => {
                let reason = format!("Unsupported OCR provider '{other}' in '{}'", config.model);
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Ok(Self {
            backend,
            config: config.clone(),
        })
    }

    /// Build a provider around an already constructed engine.
    pub fn with_engine(engine: Arc<dyn OcrEngine>, config: &OcrConfig) -> Self {
        Self {
            backend: OcrBackend::Engine(engine),
            config: config.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    pub fn engine_name(&self) -> &'static str {
        match &self.backend {
            OcrBackend::Engine(engine) => engine.name(),
            OcrBackend::Unavailable { .. } => "unavailable",
        }
    }

    /// Recognise the text in the image at `image_path`.
    ///
    /// Without a configured timeout this waits as long as the engine takes.
    pub async fn recognize(&self, image_path: &Path) -> Result<String> {
        let Some(secs) = self.config.timeout_secs else {
            return self.recognize_internal(image_path).await;
        };

        match tokio::time::timeout(
            Duration::from_secs(secs),
            self.recognize_internal(image_path),
        )
        .await
        {
            Ok(inner_result) => inner_result,
            Err(_) => Err(CardscanError::Ocr(format!(
                "OCR operation timed out after {secs} seconds"
            ))),
        }
    }

    async fn recognize_internal(&self, image_path: &Path) -> Result<String> {
        match &self.backend {
            OcrBackend::Engine(engine) => engine.recognize(image_path).await,
            OcrBackend::Unavailable { reason } => {
                Err(CardscanError::OcrUnavailable(reason.clone()))
            }
        }
    }
}

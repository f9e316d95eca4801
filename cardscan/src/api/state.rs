use std::sync::Arc;

use crate::config::Config;
use crate::intelligence::CardStructurer;
use crate::llm::LlmProvider;
use crate::ocr::OcrProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: OcrProvider,
    /// OCR for `/upload-ocr`, usually with a wider language set.
    pub structured_ocr: OcrProvider,
    pub structurer: CardStructurer,
}

impl AppState {
    /// State with one OCR provider for every route and no LLM.
    pub fn new(config: Config, ocr: OcrProvider) -> Self {
        Self {
            config: Arc::new(config),
            structured_ocr: ocr.clone(),
            ocr,
            structurer: CardStructurer::new(LlmProvider::unavailable("No LLM configured")),
        }
    }

    pub fn with_structured_ocr(mut self, ocr: OcrProvider) -> Self {
        self.structured_ocr = ocr;
        self
    }

    pub fn with_structurer(mut self, structurer: CardStructurer) -> Self {
        self.structurer = structurer;
        self
    }
}

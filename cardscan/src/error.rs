use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardscanError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),
}

impl CardscanError {
    /// True for failures the caller can fix by resubmitting a different request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CardscanError::Validation(_) | CardscanError::PayloadTooLarge(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CardscanError>;

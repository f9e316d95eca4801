//! Business card OCR service.
//!
//! Accepts an image over HTTP, runs it through Tesseract and pulls contact
//! fields (name, email, phone, website) out of the recognised text. An
//! optional LLM step structures the text into a richer card.

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod intelligence;
pub mod llm;
pub mod ocr;
pub mod scratch;

pub use error::{CardscanError, Result};

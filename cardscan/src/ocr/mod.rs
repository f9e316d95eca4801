//! OCR (Optical Character Recognition) Module
//!
//! Wraps the external text recognition engine used to read card images.
//!
//! # Architecture
//!
//! - `OcrEngine` trait is the seam to the engine; it reads an image file
//!   and returns the recognised text verbatim
//! - `TesseractEngine` implements local OCR via leptess
//! - `OcrProvider` selects an engine from `OcrConfig`, degrades to an
//!   unavailable state when the engine cannot start, and applies the
//!   optional timeout
//!
//! # Configuration
//!
//! OCR behavior is controlled via `OcrConfig` (see `config.rs`):
//! - `model`: engine selection, `local/tesseract` by default
//! - `languages`: Tesseract language codes, `eng` by default
//! - `timeout_secs`: optional upper bound for one recognition
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let text = ocr.recognize(scratch.path()).await?;
//! ```

mod engine;
mod provider;
mod tesseract;

pub use engine::OcrEngine;
pub use provider::OcrProvider;
pub use tesseract::TesseractEngine;

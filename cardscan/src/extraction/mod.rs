//! Business card field extraction.
//!
//! Turns the raw text produced by the OCR engine into an [`ExtractedInfo`]
//! record using a handful of regular expressions and a line heuristic for the
//! person's name. The heuristics are loose and English-centric.
//!
//! [`StructuredCard`] is the richer record used by the LLM structuring route;
//! [`StructuredCard::from_text`] is its regex-only fallback.

mod card;
mod structured;
mod types;

pub use card::extract_info_from_text;
pub use structured::{best_phone_number, StructureSource, StructuredCard};
pub use types::ExtractedInfo;

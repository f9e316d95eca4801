//! LLM-assisted processing of recognised card text.

mod card_structurer;

pub use card_structurer::{CardStructurer, StructuredOutcome};

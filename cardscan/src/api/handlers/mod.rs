pub(crate) mod health;
pub mod ocr;
pub mod upload;

pub use health::health_check;

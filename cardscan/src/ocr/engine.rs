use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// A text recognition engine that reads an image from disk.
///
/// Implementations must not validate or transform the image; whatever bytes
/// were uploaded are what the engine sees.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn recognize(&self, image_path: &Path) -> Result<String>;
}

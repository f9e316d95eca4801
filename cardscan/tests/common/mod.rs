// Common test utilities for integration tests
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Encode a blank white PNG of the given size
pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])));
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    output
}

// Re-export commonly used crates for convenience
pub use serial_test::serial;
pub use tempfile;

//! Assertion helpers for tests.

use image::DynamicImage;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::Path;

pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
pub const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert bytes start with the JPEG SOI marker
pub fn assert_jpeg(bytes: &[u8]) {
    assert!(
        bytes.starts_with(JPEG_SIGNATURE),
        "Expected JPEG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Load an image written by a test
pub fn open(path: &Path) -> DynamicImage {
    image::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()))
}

/// Assert the image has the expected size
pub fn assert_dimensions(image: &DynamicImage, width: u32, height: u32) {
    assert_eq!((image.width(), image.height()), (width, height));
}

/// Number of distinct RGB colors
pub fn distinct_colors(image: &DynamicImage) -> usize {
    image
        .to_rgb8()
        .pixels()
        .map(|p| p.0)
        .collect::<HashSet<_>>()
        .len()
}

/// Assert every `block x block` tile (clipped at the edges) is one color
pub fn assert_blocky(image: &DynamicImage, block: u32) {
    let rgba = image.to_rgba8();
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let origin = rgba.get_pixel(x / block * block, y / block * block);
        assert_eq!(
            pixel, origin,
            "pixel ({x}, {y}) differs from its block origin"
        );
    }
}

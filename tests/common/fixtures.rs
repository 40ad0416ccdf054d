//! Test fixtures: generated images in a scratch directory.

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory that is removed when dropped
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `image` under `name`; the extension picks the format
    pub fn write_image(&self, name: &str, image: &DynamicImage) -> PathBuf {
        let path = self.file(name);
        image.save(&path).expect("Failed to write fixture image");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }
}

/// Smooth RGB gradient with many distinct colors
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 127 / (width + height).max(1)) as u8,
        ])
    });
    DynamicImage::ImageRgb8(img)
}

/// RGBA image: opaque color where the `cell` checkerboard is set,
/// fully transparent elsewhere
pub fn checkerboard_alpha(width: u32, height: u32, cell: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let opaque = (x / cell + y / cell) % 2 == 0;
        Rgba([200, (x * 7) as u8, (y * 11) as u8, if opaque { 255 } else { 0 }])
    });
    DynamicImage::ImageRgba8(img)
}

/// Encode an image to PNG bytes in memory
pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode fixture");
    buf.into_inner()
}

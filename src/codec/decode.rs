use image::{DynamicImage, GenericImageView, ImageFormat};
use pixel_art::RasterImage;
use serde::Serialize;

use crate::error::CodecError;

/// A decoded image plus the container it came from
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: RasterImage,
    pub format: ImageFormat,
}

/// Summary of an image file, printed as JSON by `img2pix info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Channel layout the pipeline will see: "RGB" or "RGBA"
    pub mode: &'static str,
    pub has_transparency: bool,
    /// Detected container, e.g. "png"
    pub format: String,
    /// Color type as stored in the file, e.g. "Rgba16"
    pub source_color: String,
}

/// Decode an image file held in memory.
///
/// Color types with an alpha channel (including paletted images with a
/// transparency chunk) become RGBA, everything else RGB. Higher bit depths
/// are reduced to 8 bits per sample.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, CodecError> {
    let format =
        image::guess_format(bytes).map_err(|e| CodecError::UnsupportedFormat(e.to_string()))?;
    let dynamic = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    tracing::debug!(
        format = format_name(format),
        color = ?dynamic.color(),
        width = dynamic.width(),
        height = dynamic.height(),
        "Decoded image"
    );

    Ok(DecodedImage {
        image: into_raster(dynamic, format)?,
        format,
    })
}

/// Decode just far enough to describe the image.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo, CodecError> {
    let format =
        image::guess_format(bytes).map_err(|e| CodecError::UnsupportedFormat(e.to_string()))?;
    let dynamic = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    let (width, height) = dynamic.dimensions();
    let has_transparency = has_transparency(&dynamic, format);

    Ok(ImageInfo {
        width,
        height,
        mode: if has_transparency { "RGBA" } else { "RGB" },
        has_transparency,
        format: format_name(format).to_string(),
        source_color: format!("{:?}", dynamic.color()),
    })
}

/// Whether the pipeline should treat the image as RGBA.
///
/// GIF frames always decode to RGBA, so for GIF the alpha samples decide:
/// only a frame with a transparent index keeps its alpha channel.
fn has_transparency(dynamic: &DynamicImage, format: ImageFormat) -> bool {
    match (format, dynamic.as_rgba8()) {
        (ImageFormat::Gif, Some(frame)) => frame.pixels().any(|p| p.0[3] < u8::MAX),
        _ => dynamic.color().has_alpha(),
    }
}

fn into_raster(dynamic: DynamicImage, format: ImageFormat) -> Result<RasterImage, CodecError> {
    let (width, height) = dynamic.dimensions();
    let (channels, samples) = if has_transparency(&dynamic, format) {
        (4, dynamic.into_rgba8().into_raw())
    } else {
        (3, dynamic.into_rgb8().into_raw())
    };
    RasterImage::from_raw_channels(width, height, channels, samples)
        .map_err(CodecError::UnsupportedImage)
}

fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, LumaA, Rgb, Rgba};
    use pixel_art::ImageError;
    use std::io::Cursor;

    fn to_png(image: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_rgb_png() {
        let img = ImageBuffer::from_pixel(3, 2, Rgb([10u8, 20, 30]));
        let decoded = decode(&to_png(DynamicImage::ImageRgb8(img))).unwrap();

        assert_eq!(decoded.format, ImageFormat::Png);
        assert!(!decoded.image.has_alpha());
        assert_eq!(decoded.image.pixel(2, 1), &[10, 20, 30]);
    }

    #[test]
    fn test_decode_keeps_alpha() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([1u8, 2, 3, 128]));
        let decoded = decode(&to_png(DynamicImage::ImageRgba8(img))).unwrap();
        assert!(decoded.image.has_alpha());
        assert_eq!(decoded.image.pixel(0, 0), &[1, 2, 3, 128]);
    }

    #[test]
    fn test_decode_gray_expands_to_rgb() {
        let gray = ImageBuffer::from_pixel(2, 1, Luma([77u8]));
        let decoded = decode(&to_png(DynamicImage::ImageLuma8(gray))).unwrap();
        assert_eq!(decoded.image.pixel(1, 0), &[77, 77, 77]);

        let gray_alpha = ImageBuffer::from_pixel(1, 1, LumaA([5u8, 0]));
        let decoded = decode(&to_png(DynamicImage::ImageLumaA8(gray_alpha))).unwrap();
        assert_eq!(decoded.image.pixel(0, 0), &[5, 5, 5, 0]);
    }

    #[test]
    fn test_decode_sixteen_bit_reduces_to_eight() {
        let img = ImageBuffer::from_pixel(1, 1, Rgb([65535u16, 0, 32896]));
        let decoded = decode(&to_png(DynamicImage::ImageRgb16(img))).unwrap();
        assert_eq!(decoded.image.pixel(0, 0), &[255, 0, 128]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_decode_truncated_png_fails() {
        let img = ImageBuffer::from_pixel(8, 8, Rgb([1u8, 2, 3]));
        let bytes = to_png(DynamicImage::ImageRgb8(img));
        let err = decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    fn to_gif(image: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Gif).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_opaque_gif_as_rgb() {
        let img = ImageBuffer::from_pixel(3, 3, Rgba([200u8, 10, 10, 255]));
        let bytes = to_gif(DynamicImage::ImageRgba8(img));

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.format, ImageFormat::Gif);
        assert!(!decoded.image.has_alpha());

        let info = image_info(&bytes).unwrap();
        assert_eq!(info.mode, "RGB");
        assert!(!info.has_transparency);
    }

    #[test]
    fn test_decode_gif_with_transparent_index_keeps_alpha() {
        let mut img = ImageBuffer::from_pixel(2, 2, Rgba([0u8, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let bytes = to_gif(DynamicImage::ImageRgba8(img));

        let decoded = decode(&bytes).unwrap();
        assert!(decoded.image.has_alpha());
        assert_eq!(decoded.image.pixel(1, 1)[3], 0);
        assert_eq!(decoded.image.pixel(0, 0)[3], 255);
        assert!(image_info(&bytes).unwrap().has_transparency);
    }

    #[test]
    fn test_zero_sized_image_is_unsupported_image() {
        let err = into_raster(DynamicImage::new_rgb8(0, 5), ImageFormat::Png).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedImage(ImageError::ZeroDimension { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_image_info() {
        let img = ImageBuffer::from_pixel(4, 3, Rgba([0u8, 0, 0, 0]));
        let info = image_info(&to_png(DynamicImage::ImageRgba8(img))).unwrap();
        assert_eq!(
            info,
            ImageInfo {
                width: 4,
                height: 3,
                mode: "RGBA",
                has_transparency: true,
                format: "png".to_string(),
                source_color: "Rgba8".to_string(),
            }
        );
    }
}

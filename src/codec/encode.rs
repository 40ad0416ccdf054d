use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use pixel_art::{ChannelLayout, Compositor, RasterImage, Rgb};

use crate::error::CodecError;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Format for an output path; unknown or missing extensions mean PNG
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// Whether the container can store an alpha channel
    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Settings that only matter when writing files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Re-compress PNG output with oxipng
    pub optimize_png: bool,
    /// Background used when a transparent image must be written as JPEG
    pub background: Rgb,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            optimize_png: true,
            background: Rgb::WHITE,
        }
    }
}

/// Encode an image into the given container.
///
/// RGBA images written as JPEG are flattened onto `options.background`
/// first; PNG and BMP keep the alpha channel.
pub fn encode(
    image: &RasterImage,
    format: OutputFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, CodecError> {
    let bytes = match format {
        OutputFormat::Png => encode_png(image, options.optimize_png)?,
        OutputFormat::Jpeg => encode_jpeg(image, options)?,
        OutputFormat::Bmp => encode_bmp(image)?,
    };
    tracing::debug!(
        format = format.extension(),
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Encoded image"
    );
    Ok(bytes)
}

fn encode_png(image: &RasterImage, optimize: bool) -> Result<Vec<u8>, CodecError> {
    let color_type = match image.layout() {
        ChannelLayout::Rgb => png::ColorType::Rgb,
        ChannelLayout::Rgba => png::ColorType::Rgba,
    };

    // Fast settings when oxipng will re-compress anyway
    let compression = if optimize {
        png::Compression::Fast
    } else {
        png::Compression::Default
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);
        let mut writer = encoder.write_header().map_err(png_error)?;
        writer.write_image_data(image.samples()).map_err(png_error)?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    );
    match optimized {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!(%e, "PNG optimisation failed, keeping unoptimised output");
            Ok(png_bytes)
        }
    }
}

fn encode_jpeg(image: &RasterImage, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
    let image: Cow<'_, RasterImage> = if image.has_alpha() {
        tracing::debug!(background = %options.background, "Flattening transparency for JPEG");
        let flat = Compositor::new(Some(options.background))
            .flatten(image)
            .map_err(|e| CodecError::Encode {
                format: "jpeg",
                message: e.to_string(),
            })?;
        Cow::Owned(flat)
    } else {
        Cow::Borrowed(image)
    };

    let quality = options.jpeg_quality.clamp(1, 100);
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(
            image.samples(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| CodecError::Encode {
            format: "jpeg",
            message: e.to_string(),
        })?;
    Ok(buf.into_inner())
}

fn encode_bmp(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    let color_type = match image.layout() {
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    };
    let mut buf = Cursor::new(Vec::new());
    BmpEncoder::new(&mut buf)
        .write_image(image.samples(), image.width(), image.height(), color_type)
        .map_err(|e| CodecError::Encode {
            format: "bmp",
            message: e.to_string(),
        })?;
    Ok(buf.into_inner())
}

fn png_error(e: png::EncodingError) -> CodecError {
    CodecError::Encode {
        format: "png",
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    fn rgba_square() -> RasterImage {
        let mut samples = Vec::new();
        for i in 0..16u8 {
            samples.extend_from_slice(&[i * 10, 0, 255 - i * 10, if i % 2 == 0 { 255 } else { 0 }]);
        }
        RasterImage::new(4, 4, ChannelLayout::Rgba, samples).unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.bmp")), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.webp")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
    }

    #[test]
    fn test_format_from_str_rejects_unknown() {
        assert!(matches!(
            "tiff".parse::<OutputFormat>(),
            Err(CodecError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_png_is_lossless() {
        let image = rgba_square();
        for optimize in [false, true] {
            let options = EncodeOptions {
                optimize_png: optimize,
                ..Default::default()
            };
            let bytes = encode(&image, OutputFormat::Png, &options).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
            assert_eq!(decode(&bytes).unwrap().image, image);
        }
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let image = rgba_square();
        let bytes = encode(&image, OutputFormat::Jpeg, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode(&bytes).unwrap().image;
        assert!(!decoded.has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn test_bmp_keeps_rgb() {
        let image = RasterImage::filled_rgb(3, 3, Rgb::new(12, 34, 56)).unwrap();
        let bytes = encode(&image, OutputFormat::Bmp, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        assert_eq!(decode(&bytes).unwrap().image, image);
    }
}

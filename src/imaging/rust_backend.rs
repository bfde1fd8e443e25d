//! Pure Rust image processing backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format detection | `ImageReader::with_guessed_format` (magic bytes, not extension) |
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image` crate decoders |
//! | EXIF orientation | `ImageDecoder::exif_metadata` read with `kamadak-exif`, else `ImageDecoder::orientation` |
//! | Resize | `DynamicImage::resize_exact` with the configured filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with explicit quality |
//! | Encode → other formats | `DynamicImage::save_with_format` |

use super::backend::{BackendError, DecodedImage, ImageBackend};
use super::calculations::Dimensions;
use super::orientation::{Orientation, exif_orientation};
use super::params::{ResampleFilter, SaveParams};
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation as DecoderOrientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::path::Path;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode as JPEG with an explicit quality (the generic path uses the
/// encoder's default).
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(format!("JPEG encode failed: {e}")))
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DecodedImage, BackendError> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format().ok_or_else(|| {
            BackendError::Decode(format!("{}: unrecognized image format", path.display()))
        })?;

        let mut decoder = reader.into_decoder().map_err(|e| {
            BackendError::Decode(format!("Failed to decode {}: {}", path.display(), e))
        })?;

        // Unreadable metadata is the same as none at all. TIFF keeps the tag
        // in its own IFD0, which only the decoder's orientation sees.
        let orientation = match decoder.exif_metadata() {
            Ok(Some(exif)) => exif_orientation(exif),
            _ => None,
        }
        .or_else(|| match decoder.orientation() {
            Ok(DecoderOrientation::NoTransforms) | Err(_) => None,
            Ok(found) => Some(Orientation::from(found).to_exif()),
        });

        let image = DynamicImage::from_decoder(decoder).map_err(|e| {
            BackendError::Decode(format!("Failed to decode {}: {}", path.display(), e))
        })?;

        Ok(DecodedImage {
            image,
            format,
            orientation,
        })
    }

    fn resize(
        &self,
        image: &DynamicImage,
        size: Dimensions,
        filter: ResampleFilter,
    ) -> Result<DynamicImage, BackendError> {
        if size.is_empty() {
            return Err(BackendError::Resize(format!(
                "target size {size} has a zero side"
            )));
        }
        Ok(image.resize_exact(size.width, size.height, filter.filter_type()))
    }

    fn save(&self, image: &DynamicImage, params: &SaveParams) -> Result<(), BackendError> {
        let result = match params.format {
            ImageFormat::Jpeg => save_jpeg(image, &params.output, params.quality.value()),
            format => image.save_with_format(&params.output, format).map_err(|e| {
                BackendError::Encode(format!("{format:?} encode failed: {e}"))
            }),
        };

        if result.is_err() {
            // Don't leave a truncated file behind for the fallback to sit next to
            let _ = std::fs::remove_file(&params.output);
        }
        result
    }
}

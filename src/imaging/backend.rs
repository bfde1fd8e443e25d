//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the resize driver
//! needs: decode (with EXIF orientation), resize, and save.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests drive the same code through `MockBackend`.

use super::calculations::Dimensions;
use super::params::{ResampleFilter, SaveParams};
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Resize failed: {0}")]
    Resize(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// A decoded image plus what the driver needs to write it back.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    /// Container format detected from the file contents.
    pub format: ImageFormat,
    /// Raw EXIF orientation value, if the file carried one.
    pub orientation: Option<u16>,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode an image file, detecting its format from the contents.
    fn decode(&self, path: &Path) -> Result<DecodedImage, BackendError>;

    /// Resample to exactly `size`.
    fn resize(
        &self,
        image: &DynamicImage,
        size: Dimensions,
        filter: ResampleFilter,
    ) -> Result<DynamicImage, BackendError>;

    /// Encode and write an image.
    fn save(&self, image: &DynamicImage, params: &SaveParams) -> Result<(), BackendError>;
}

//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`resize`](crate::resize) driver (which decides what
//! to write where) and the [`backend`](super::backend) (which does the actual
//! pixel work). This separation allows swapping backends (e.g. for testing
//! with a mock) without changing driver logic.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1-100, default 90). Clamped on construction.
//! - [`ResampleFilter`]: Interpolation kernel used when resampling.
//! - [`SaveParams`]: Output path, container format and quality for one encode.

use image::ImageFormat;
use image::imageops::FilterType;
use serde::Deserialize;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling kernel, from fastest to smoothest.
///
/// `Lanczos3` matches the antialiasing filter photo tools default to and is
/// the default here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters for writing one image to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveParams {
    pub output: PathBuf,
    pub format: ImageFormat,
    /// Only consulted by lossy encoders (JPEG).
    pub quality: Quality,
}

//! Image processing: pure Rust, on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content-sniffed format |
//! | **EXIF orientation** | `kamadak-exif` over the decoder's EXIF block ([`exif_orientation`]) |
//! | **Fit** | [`fit_dimensions`], integer math |
//! | **Resize** | `resize_exact` with a configurable [`ResampleFilter`] |
//! | **Encode** | original format, or RGB JPEG as fallback |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Orientation**: EXIF tag reading and the upright transform
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod orientation;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, DecodedImage, ImageBackend};
pub use calculations::{BoundingBox, Dimensions, fit_dimensions};
pub use orientation::{Orientation, Transform, exif_orientation, normalize};
pub use params::{Quality, ResampleFilter, SaveParams};
pub use rust_backend::RustBackend;

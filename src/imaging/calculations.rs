//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use std::fmt;

/// Result of an identify or fit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero. Such a size cannot be resampled to.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The `(width, height)` ceiling a resized image must not exceed.
///
/// Both sides are guaranteed non-zero by [`BoundingBox::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    max_width: u32,
    max_height: u32,
}

impl BoundingBox {
    /// Returns `None` if either side is zero.
    pub fn new(max_width: u32, max_height: u32) -> Option<Self> {
        (max_width > 0 && max_height > 0).then_some(Self {
            max_width,
            max_height,
        })
    }

    pub fn max_width(self) -> u32 {
        self.max_width
    }

    pub fn max_height(self) -> u32 {
        self.max_height
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.max_width, self.max_height)
    }
}

/// Calculate output dimensions that fit `source` inside `bounds`.
///
/// The source is first scaled so its width matches the box exactly. If the
/// resulting height overflows the box, it is scaled so its height matches
/// instead. If integer flooring makes neither fit, the box itself is returned.
/// Images smaller than the box are scaled up to touch it.
///
/// Source sides must be non-zero; a zero source side yields an empty result
/// rather than a panic.
///
/// # Examples
/// ```
/// # use birt::imaging::{BoundingBox, Dimensions, fit_dimensions};
/// let bounds = BoundingBox::new(100, 100).unwrap();
/// assert_eq!(fit_dimensions(bounds, Dimensions::new(200, 100)), Dimensions::new(100, 50));
/// assert_eq!(fit_dimensions(bounds, Dimensions::new(100, 200)), Dimensions::new(50, 100));
/// ```
pub fn fit_dimensions(bounds: BoundingBox, source: Dimensions) -> Dimensions {
    if source.is_empty() {
        return Dimensions::new(0, 0);
    }

    let max_w = bounds.max_width as u64;
    let max_h = bounds.max_height as u64;
    let src_w = source.width as u64;
    let src_h = source.height as u64;

    // Width-constrained: width matches exactly
    let candidate_h = max_w * src_h / src_w;
    if candidate_h <= max_h {
        return Dimensions::new(bounds.max_width, candidate_h as u32);
    }

    // Height-constrained: height matches exactly
    let candidate_w = max_h * src_w / src_h;
    if candidate_w <= max_w {
        return Dimensions::new(candidate_w as u32, bounds.max_height);
    }

    Dimensions::new(bounds.max_width, bounds.max_height)
}

//! EXIF orientation: reading the tag and turning it into an upright image.
//!
//! Cameras that detect rotation at capture time store it in the EXIF
//! Orientation tag (0x0112) rather than rotating the pixels. Decoders hand back
//! the pixels as stored, so without this step a resized portrait photo comes
//! out lying on its side.
//!
//! | Tag | Transform (rotations counter-clockwise) |
//! |---|---|
//! | 1, absent, invalid | identity |
//! | 2 | flip horizontal |
//! | 3 | rotate 180° |
//! | 4 | flip vertical |
//! | 5 | rotate 90°, then flip vertical |
//! | 6 | rotate 270° |
//! | 7 | rotate 270°, then flip vertical |
//! | 8 | rotate 90° |
//!
//! Missing or malformed metadata is never an error: most PNGs, GIFs and
//! screenshots carry no orientation at all.

use exif::{In, Tag};
use image::DynamicImage;
use image::metadata::Orientation as DecoderOrientation;

/// JPEG APP1 payloads may still carry this header in front of the TIFF data.
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// A valid EXIF orientation code (1–8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90Cw,
    Transverse,
    Rotate270Cw,
}

impl Orientation {
    /// Map a raw tag value to an orientation. Values outside 1–8 yield `None`.
    pub fn from_exif(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90Cw),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270Cw),
            _ => None,
        }
    }

    pub fn to_exif(self) -> u16 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90Cw => 6,
            Self::Transverse => 7,
            Self::Rotate270Cw => 8,
        }
    }

    /// The transform that presents an image with this orientation upright.
    pub fn correction(self) -> Transform {
        match self {
            Self::Normal => Transform::Identity,
            Self::FlipHorizontal => Transform::FlipHorizontal,
            Self::Rotate180 => Transform::Rotate180,
            Self::FlipVertical => Transform::FlipVertical,
            Self::Transpose => Transform::Rotate90ThenFlipVertical,
            Self::Rotate90Cw => Transform::Rotate270,
            Self::Transverse => Transform::Rotate270ThenFlipVertical,
            Self::Rotate270Cw => Transform::Rotate90,
        }
    }
}

/// Orientation as reported by `ImageDecoder::orientation`, for formats whose
/// decoder finds the tag outside of an EXIF block (TIFF IFD0).
impl From<DecoderOrientation> for Orientation {
    fn from(orientation: DecoderOrientation) -> Self {
        match orientation {
            DecoderOrientation::NoTransforms => Self::Normal,
            DecoderOrientation::FlipHorizontal => Self::FlipHorizontal,
            DecoderOrientation::Rotate180 => Self::Rotate180,
            DecoderOrientation::FlipVertical => Self::FlipVertical,
            DecoderOrientation::Rotate90FlipH => Self::Transpose,
            DecoderOrientation::Rotate90 => Self::Rotate90Cw,
            DecoderOrientation::Rotate270FlipH => Self::Transverse,
            DecoderOrientation::Rotate270 => Self::Rotate270Cw,
        }
    }
}

/// One-shot pixel transform. Rotation angles are counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Rotate90ThenFlipVertical,
    Rotate270,
    Rotate270ThenFlipVertical,
    Rotate90,
}

impl Transform {
    /// Transform for an optional raw tag value; anything unusable is identity.
    pub fn for_tag(tag: Option<u16>) -> Self {
        tag.and_then(Orientation::from_exif)
            .map(Orientation::correction)
            .unwrap_or(Transform::Identity)
    }

    /// Apply the transform. `image`'s rotations are clockwise, so a
    /// counter-clockwise 90° is `rotate270` and vice versa.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Identity => image,
            Self::FlipHorizontal => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipVertical => image.flipv(),
            Self::Rotate90ThenFlipVertical => image.rotate270().flipv(),
            Self::Rotate270 => image.rotate90(),
            Self::Rotate270ThenFlipVertical => image.rotate90().flipv(),
            Self::Rotate90 => image.rotate270(),
        }
    }
}

/// Return `image` transformed so that it displays upright for `tag`.
pub fn normalize(image: DynamicImage, tag: Option<u16>) -> DynamicImage {
    Transform::for_tag(tag).apply(image)
}

/// Read the raw Orientation value from an EXIF block.
///
/// `raw` is the TIFF-structured payload as returned by
/// `ImageDecoder::exif_metadata`, with or without the `Exif\0\0` header.
/// Only the primary image is consulted; thumbnails carry their own
/// orientation. Values outside 1-8 are returned as-is.
pub fn exif_orientation(raw: Vec<u8>) -> Option<u16> {
    let raw = match raw.strip_prefix(EXIF_HEADER) {
        Some(tiff) => tiff.to_vec(),
        None => raw,
    };
    let exif = exif::Reader::new().read_raw(raw).ok()?;
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    field.value.get_uint(0).and_then(|v| u16::try_from(v).ok())
}

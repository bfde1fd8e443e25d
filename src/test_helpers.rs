//! Shared test utilities: synthetic image files and EXIF blocks.
//!
//! EXIF and TIFF structures are written with `exif::experimental::Writer`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_png(&tmp.path().join("a.png"), 200, 100);
//! write_jpeg_with_orientation(&tmp.path().join("b.jpg"), 40, 20, 6);
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{ImageEncoder, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Gradient so resampled output isn't trivially uniform.
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid PNG with the given dimensions.
pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Encode a small valid JPEG into memory.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Write a small valid JPEG with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// Primary-image Orientation field with a SHORT value.
pub fn orientation_field(value: u16) -> Field {
    Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

/// Serialize fields into a TIFF-structured EXIF block, the shape
/// `ImageDecoder::exif_metadata` hands back.
pub fn exif_block(fields: &[Field], little_endian: bool) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, little_endian).unwrap();
    buf.into_inner()
}

/// Write a JPEG whose APP1 segment carries the given EXIF orientation.
pub fn write_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    let jpeg = jpeg_bytes(width, height);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(exif_block(&[orientation_field(orientation)], false));

    // APP1 goes right after SOI; its length field counts itself
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend(payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Write an uncompressed 8-bit grayscale TIFF with Orientation in IFD0.
pub fn write_tiff_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    let pixels: Vec<u8> = (0..width * height).map(|i| (i * 37 % 256) as u8).collect();
    let strips: [&[u8]; 1] = [&pixels];
    let field = |tag, value| Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    };
    let fields = [
        field(Tag::ImageWidth, Value::Long(vec![width])),
        field(Tag::ImageLength, Value::Long(vec![height])),
        field(Tag::BitsPerSample, Value::Short(vec![8])),
        field(Tag::Compression, Value::Short(vec![1])),
        field(Tag::PhotometricInterpretation, Value::Short(vec![1])),
        field(Tag::SamplesPerPixel, Value::Short(vec![1])),
        field(Tag::RowsPerStrip, Value::Long(vec![height])),
        orientation_field(orientation),
    ];

    let mut writer = Writer::new();
    for f in &fields {
        writer.push_field(f);
    }
    writer.set_strips(&strips, In::PRIMARY);
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    std::fs::write(path, buf.into_inner()).unwrap();
}

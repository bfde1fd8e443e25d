//! Batch resizing of one directory.
//!
//! Takes every entry directly inside the source directory (no recursion),
//! and for each regular file:
//!
//! ```text
//! decode → EXIF upright → fit to box → resample → encode (original format)
//!                                                   └─ on failure: RGB → JPEG
//! ```
//!
//! Results go into a sub-directory of the source (`resized/` by default)
//! under the source file name; the JPEG fallback keeps the stem and swaps the
//! extension to `.jpg`.
//!
//! ## Failure handling
//!
//! Only setup problems (missing source directory, unwritable destination) are
//! returned as [`ResizeError`]. Every per-entry problem becomes an
//! [`ItemOutcome`] and the run moves on to the next entry, so the summary is
//! always produced.
//!
//! ## Dry run
//!
//! With [`ResizeJob::dry_run`] set the directory is listed and counted but
//! nothing is decoded or written. The output directory is still created, so a
//! dry run lists the same entries as the real run that follows it.

use crate::imaging::{
    BackendError, BoundingBox, DecodedImage, Dimensions, ImageBackend, Quality, ResampleFilter,
    RustBackend, SaveParams, fit_dimensions, normalize,
};
use crate::output::{format_item, format_summary};
use crate::types::{ItemOutcome, ResizeReport};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot list directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct ResizeJob {
    /// Directory holding the source images.
    pub path: PathBuf,
    pub bounds: BoundingBox,
    /// Destination, relative to `path`.
    pub subdir: PathBuf,
    pub dry_run: bool,
    pub filter: ResampleFilter,
    /// JPEG quality, for JPEG sources and the fallback.
    pub quality: Quality,
}

impl ResizeJob {
    pub fn new(path: impl Into<PathBuf>, bounds: BoundingBox) -> Self {
        Self {
            path: path.into(),
            bounds,
            subdir: PathBuf::from(crate::config::DEFAULT_SUBDIR),
            dry_run: false,
            filter: ResampleFilter::default(),
            quality: Quality::default(),
        }
    }
}

/// A listed directory entry.
struct Entry {
    path: PathBuf,
    is_file: bool,
}

/// Resize a directory with the `image`-crate backend.
pub fn resize_directory(job: &ResizeJob) -> Result<ResizeReport, ResizeError> {
    resize_directory_with_backend(&RustBackend::new(), job)
}

/// Resize a directory using a specific backend (allows testing with mock).
pub fn resize_directory_with_backend(
    backend: &impl ImageBackend,
    job: &ResizeJob,
) -> Result<ResizeReport, ResizeError> {
    if !job.path.is_dir() {
        return Err(ResizeError::NotADirectory(job.path.clone()));
    }
    let source_dir = std::path::absolute(&job.path)?;
    let dest_dir = source_dir.join(&job.subdir);

    if !dest_dir.exists() {
        debug!("Creating {}", dest_dir.display());
        std::fs::create_dir_all(&dest_dir)?;
    }

    let entries = list_entries(&source_dir)?;
    let mut report = ResizeReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let span = tracing::debug_span!("item", n = index + 1).entered();
        debug!("{}", "=".repeat(80));
        debug!("Path Item {}: {}", index + 1, entry.path.display());

        let outcome = process_entry(backend, job, &dest_dir, &entry);
        report.push(entry.path, outcome);
        if let Some(item) = report.items.last() {
            debug!("{}", format_item(item));
        }
        drop(span);
    }

    for line in format_summary(&report.tally) {
        info!("{line}");
    }

    Ok(report)
}

/// List the direct children of `dir`, sorted by file name.
///
/// Symlinks are followed so a link to an image counts as a file. Entries that
/// can't be inspected (e.g. broken links) are kept and reported as non-files;
/// only a failure to read `dir` itself is an error.
fn list_entries(dir: &Path) -> Result<Vec<Entry>, ResizeError> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for result in walker {
        match result {
            Ok(entry) => entries.push(Entry {
                is_file: entry.file_type().is_file(),
                path: entry.into_path(),
            }),
            Err(e) if e.depth() > 0 => {
                let Some(path) = e.path().map(Path::to_path_buf) else {
                    return Err(e.into());
                };
                warn!("Cannot inspect {}: {}", path.display(), e);
                entries.push(Entry {
                    path,
                    is_file: false,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(entries)
}

fn process_entry(
    backend: &impl ImageBackend,
    job: &ResizeJob,
    dest_dir: &Path,
    entry: &Entry,
) -> ItemOutcome {
    if !entry.is_file {
        debug!("Not a file!");
        return ItemOutcome::NotAFile;
    }

    info!("Opening '{}'", entry.path.display());
    if job.dry_run {
        return ItemOutcome::Planned;
    }

    let DecodedImage {
        image,
        format,
        orientation,
    } = match backend.decode(&entry.path) {
        Ok(decoded) => decoded,
        Err(e) => {
            info!("File '{}' not image file: {}", entry.path.display(), e);
            return ItemOutcome::NotAnImage(e);
        }
    };

    if let Some(tag) = orientation {
        debug!("EXIF orientation: {tag}");
    }
    let image = normalize(image, orientation);

    let source = Dimensions::new(image.width(), image.height());
    let target = fit_dimensions(job.bounds, source);
    debug!("Image Size: {source}  New Size: {target}");

    if target.is_empty() {
        let e = BackendError::Resize(format!(
            "{source} does not fit {} without a zero side",
            job.bounds
        ));
        error!("Unable to resize file '{}': {}", entry.path.display(), e);
        return ItemOutcome::ResizeFailed(e);
    }

    let resized = match backend.resize(&image, target, job.filter) {
        Ok(resized) => resized,
        Err(e) => {
            error!("Unable to resize file '{}': {}", entry.path.display(), e);
            return ItemOutcome::ResizeFailed(e);
        }
    };
    drop(image);

    let Some(file_name) = entry.path.file_name() else {
        return ItemOutcome::NotAFile;
    };
    let output = dest_dir.join(file_name);
    info!("Resized and saving image: '{}'", output.display());

    let params = SaveParams {
        output,
        format,
        quality: job.quality,
    };
    match backend.save(&resized, &params) {
        Ok(()) => ItemOutcome::Resized {
            output: params.output,
            size: target,
        },
        Err(original_error) => {
            error!("Unable to save '{}': {}", params.output.display(), original_error);
            save_as_jpeg(backend, job, dest_dir, &entry.path, resized, target, original_error)
        }
    }
}

/// Fallback after the original encoder failed: flatten to RGB8 and write a
/// JPEG next to where the original-format file would have gone.
fn save_as_jpeg(
    backend: &impl ImageBackend,
    job: &ResizeJob,
    dest_dir: &Path,
    source: &Path,
    resized: DynamicImage,
    size: Dimensions,
    original_error: BackendError,
) -> ItemOutcome {
    info!(
        "Attempt to convert {} image to JPG and save it...",
        source
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default()
    );

    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    drop(resized);

    let params = SaveParams {
        output: jpeg_output_path(dest_dir, source),
        format: ImageFormat::Jpeg,
        quality: job.quality,
    };
    debug!("Saving image: {}", params.output.display());

    match backend.save(&rgb, &params) {
        Ok(()) => ItemOutcome::Converted {
            output: params.output,
            size,
            original_error,
        },
        Err(fallback) => {
            error!(
                "Unable to save '{}' after JPG conversion: {}",
                params.output.display(),
                fallback
            );
            ItemOutcome::SaveFailed {
                original: original_error,
                fallback,
            }
        }
    }
}

/// `dest_dir/<stem>.jpg`. Built by hand because `with_extension` would eat
/// the last dot-segment of stems like `scan.v2`.
fn jpeg_output_path(dest_dir: &Path, source: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".jpg");
    dest_dir.join(name)
}

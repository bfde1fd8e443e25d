//! # birt
//!
//! Bulk Image Resizing Tool: resize every image in a directory so it fits a
//! maximum width and height, keeping the aspect ratio and the upright
//! orientation recorded in EXIF, and write the results to a sub-directory.
//!
//! ```text
//! birt photos/ 1200 800
//!
//! photos/                      photos/resized/
//! ├── IMG_0001.jpg  4000x3000  ├── IMG_0001.jpg  1066x800
//! ├── IMG_0002.jpg  (EXIF 6)   ├── IMG_0002.jpg   600x800   (rotated upright)
//! ├── diagram.png   2000x500   ├── diagram.png   1200x300
//! └── notes.txt                └── (skipped: not an image)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Fit calculation, EXIF orientation, and the `image`-crate backend |
//! | [`resize`] | The driver: walks the directory, handles per-file failures and the JPEG fallback |
//! | [`types`] | Per-entry outcomes and the run tally |
//! | [`output`] | Pure formatting of the summary and per-entry log lines |
//! | [`config`] | Defaults, optional TOML config file, command line overrides |
//! | [`logging`] | Console + file `tracing` subscriber, built as an explicit handle |
//!
//! # Design Decisions
//!
//! ## Failures Are Data
//!
//! A batch tool should never stop halfway because one file is odd. Every
//! entry ends in an [`types::ItemOutcome`] that says exactly which kind of
//! failure happened (not a file, not an image, resize, save), carrying the
//! typed [`imaging::BackendError`]. Only setup problems abort the run.
//!
//! ## Backend Trait
//!
//! The driver talks to an [`imaging::ImageBackend`] rather than the `image`
//! crate directly, so its control flow (fallbacks, counting, dry run) is tested
//! with a recording mock and no real codecs.
//!
//! ## No Global Logger
//!
//! [`logging::build_dispatch`] returns a `tracing::Dispatch` that the binary
//! scopes around the run. Library code only emits events.

pub mod config;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod resize;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

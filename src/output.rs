//! Log line formatting for the resize run.
//!
//! Format functions are pure (they return `String`s) so they can be tested
//! without a subscriber; the driver hands the lines to `tracing`.
//!
//! ## Summary
//!
//! ```text
//! Files Processed:    6
//! ------------------------
//!         Resized:    3
//!     (as JPEG)  :    1
//!       Not files:    1
//!      Not images:    1
//!    Resized Fail:    0
//!      Saved Fail:    1
//!                ---------
//!           Total:    6
//! ```
//!
//! The `(as JPEG)` and `Test mode` lines only appear when non-zero.

use crate::types::{ItemOutcome, ItemReport, ProcessingTally};

/// Format the end-of-run tally, one log line per entry.
pub fn format_summary(tally: &ProcessingTally) -> Vec<String> {
    let mut lines = vec![
        format!("Files Processed: {:>4}", tally.total),
        "------------------------".to_string(),
        format!("        Resized: {:>4}", tally.resized),
    ];
    if tally.converted > 0 {
        lines.push(format!("    (as JPEG)  : {:>4}", tally.converted));
    }
    lines.extend([
        format!("      Not files: {:>4}", tally.not_files),
        format!("     Not images: {:>4}", tally.not_images),
        format!("   Resized Fail: {:>4}", tally.resize_failures),
        format!("     Saved Fail: {:>4}", tally.save_failures),
    ]);
    if tally.planned > 0 {
        lines.push(format!("      Test mode: {:>4}", tally.planned));
    }
    lines.push("               ---------".to_string());
    lines.push(format!("          Total: {:>4}", tally.accounted()));
    lines
}

/// One-line description of an item's outcome.
///
/// ```text
/// a.png -> resized/a.png (800x600)
/// notes.txt: not an image (Decode failed: ...)
/// ```
pub fn format_item(item: &ItemReport) -> String {
    let name = item
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| item.path.display().to_string());

    match &item.outcome {
        ItemOutcome::Resized { output, size } => {
            format!("{name} -> {} ({size})", output.display())
        }
        ItemOutcome::Converted {
            output,
            size,
            original_error,
        } => format!(
            "{name} -> {} ({size}, converted to JPEG after: {original_error})",
            output.display()
        ),
        ItemOutcome::Planned => format!("{name}: would resize"),
        ItemOutcome::NotAFile => format!("{name}: not a file"),
        ItemOutcome::NotAnImage(e) => format!("{name}: not an image ({e})"),
        ItemOutcome::ResizeFailed(e) => format!("{name}: resize failed ({e})"),
        ItemOutcome::SaveFailed { original, fallback } => {
            format!("{name}: save failed ({original}; JPEG fallback: {fallback})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{BackendError, Dimensions};
    use std::path::PathBuf;

    fn item(path: &str, outcome: ItemOutcome) -> ItemReport {
        ItemReport {
            path: PathBuf::from(path),
            outcome,
        }
    }

    #[test]
    fn summary_layout_without_optional_lines() {
        let tally = ProcessingTally {
            total: 5,
            resized: 2,
            not_files: 1,
            not_images: 1,
            save_failures: 1,
            ..Default::default()
        };

        assert_eq!(
            format_summary(&tally),
            vec![
                "Files Processed:    5",
                "------------------------",
                "        Resized:    2",
                "      Not files:    1",
                "     Not images:    1",
                "   Resized Fail:    0",
                "     Saved Fail:    1",
                "               ---------",
                "          Total:    5",
            ]
        );
    }

    #[test]
    fn summary_shows_converted_and_planned_when_present() {
        let tally = ProcessingTally {
            total: 4,
            resized: 1,
            converted: 1,
            planned: 3,
            ..Default::default()
        };
        let lines = format_summary(&tally);

        assert!(lines.contains(&"    (as JPEG)  :    1".to_string()));
        assert!(lines.contains(&"      Test mode:    3".to_string()));
        assert_eq!(lines.last().unwrap(), "          Total:    4");
    }

    #[test]
    fn summary_for_empty_run() {
        let lines = format_summary(&ProcessingTally::default());
        assert_eq!(lines[0], "Files Processed:    0");
        assert_eq!(lines.last().unwrap(), "          Total:    0");
    }

    #[test]
    fn item_resized_line() {
        let line = format_item(&item(
            "/photos/a.png",
            ItemOutcome::Resized {
                output: "/photos/resized/a.png".into(),
                size: Dimensions::new(800, 600),
            },
        ));
        assert_eq!(line, "a.png -> /photos/resized/a.png (800x600)");
    }

    #[test]
    fn item_failure_lines_name_the_kind() {
        let line = format_item(&item(
            "/photos/notes.txt",
            ItemOutcome::NotAnImage(BackendError::Decode("unrecognized".into())),
        ));
        assert_eq!(line, "notes.txt: not an image (Decode failed: unrecognized)");

        let line = format_item(&item(
            "/photos/a.tif",
            ItemOutcome::SaveFailed {
                original: BackendError::Encode("tiff".into()),
                fallback: BackendError::Encode("jpeg".into()),
            },
        ));
        assert_eq!(
            line,
            "a.tif: save failed (Encode failed: tiff; JPEG fallback: Encode failed: jpeg)"
        );
    }

    #[test]
    fn item_dry_run_and_directory_lines() {
        assert_eq!(
            format_item(&item("/photos/a.jpg", ItemOutcome::Planned)),
            "a.jpg: would resize"
        );
        assert_eq!(
            format_item(&item("/photos/resized", ItemOutcome::NotAFile)),
            "resized: not a file"
        );
    }
}

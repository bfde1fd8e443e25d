//! Result types shared between the driver, output formatting and the CLI.
//!
//! Every directory entry ends in exactly one [`ItemOutcome`], and
//! [`ProcessingTally::record`] files each outcome under exactly one counter,
//! so the counters always add up to `total`.

use crate::imaging::{BackendError, Dimensions};
use std::path::PathBuf;

/// What happened to one directory entry.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Written in its original format.
    Resized { output: PathBuf, size: Dimensions },
    /// The original encoder failed; written as RGB JPEG instead.
    Converted {
        output: PathBuf,
        size: Dimensions,
        original_error: BackendError,
    },
    /// Dry run: the file would have been processed.
    Planned,
    /// Directory, broken link or anything else that isn't a regular file.
    NotAFile,
    NotAnImage(BackendError),
    ResizeFailed(BackendError),
    /// Both the original encoder and the JPEG fallback failed.
    SaveFailed {
        original: BackendError,
        fallback: BackendError,
    },
}

/// One entry of the source directory and its outcome.
#[derive(Debug)]
pub struct ItemReport {
    pub path: PathBuf,
    pub outcome: ItemOutcome,
}

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingTally {
    /// Entries enumerated in the source directory.
    pub total: usize,
    /// Written, including those that went through the JPEG fallback.
    pub resized: usize,
    /// Subset of `resized` written as JPEG after the original encoder failed.
    pub converted: usize,
    pub not_files: usize,
    pub not_images: usize,
    pub resize_failures: usize,
    pub save_failures: usize,
    /// Files seen during a dry run.
    pub planned: usize,
}

impl ProcessingTally {
    pub fn record(&mut self, outcome: &ItemOutcome) {
        self.total += 1;
        match outcome {
            ItemOutcome::Resized { .. } => self.resized += 1,
            ItemOutcome::Converted { .. } => {
                self.resized += 1;
                self.converted += 1;
            }
            ItemOutcome::Planned => self.planned += 1,
            ItemOutcome::NotAFile => self.not_files += 1,
            ItemOutcome::NotAnImage(_) => self.not_images += 1,
            ItemOutcome::ResizeFailed(_) => self.resize_failures += 1,
            ItemOutcome::SaveFailed { .. } => self.save_failures += 1,
        }
    }

    /// Sum of the mutually exclusive counters; equals `total`.
    pub fn accounted(&self) -> usize {
        self.resized
            + self.not_files
            + self.not_images
            + self.resize_failures
            + self.save_failures
            + self.planned
    }
}

/// Everything a run produced, in processing order.
#[derive(Debug, Default)]
pub struct ResizeReport {
    pub tally: ProcessingTally,
    pub items: Vec<ItemReport>,
}

impl ResizeReport {
    pub fn push(&mut self, path: PathBuf, outcome: ItemOutcome) {
        self.tally.record(&outcome);
        self.items.push(ItemReport { path, outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_outcomes() -> Vec<ItemOutcome> {
        vec![
            ItemOutcome::Resized {
                output: "out/a.png".into(),
                size: Dimensions::new(10, 5),
            },
            ItemOutcome::Converted {
                output: "out/b.jpg".into(),
                size: Dimensions::new(10, 5),
                original_error: BackendError::Encode("no".into()),
            },
            ItemOutcome::Planned,
            ItemOutcome::NotAFile,
            ItemOutcome::NotAnImage(BackendError::Decode("text".into())),
            ItemOutcome::ResizeFailed(BackendError::Resize("zero".into())),
            ItemOutcome::SaveFailed {
                original: BackendError::Encode("no".into()),
                fallback: BackendError::Encode("still no".into()),
            },
        ]
    }

    #[test]
    fn record_files_each_outcome_once() {
        let mut tally = ProcessingTally::default();
        for outcome in &all_outcomes() {
            tally.record(outcome);
        }

        assert_eq!(
            tally,
            ProcessingTally {
                total: 7,
                resized: 2,
                converted: 1,
                not_files: 1,
                not_images: 1,
                resize_failures: 1,
                save_failures: 1,
                planned: 1,
            }
        );
        assert_eq!(tally.accounted(), tally.total);
    }

    #[test]
    fn empty_tally_accounts_for_nothing() {
        let tally = ProcessingTally::default();
        assert_eq!(tally.total, 0);
        assert_eq!(tally.accounted(), 0);
    }

    #[test]
    fn report_push_keeps_order_and_counts() {
        let mut report = ResizeReport::default();
        report.push("a".into(), ItemOutcome::NotAFile);
        report.push("b".into(), ItemOutcome::Planned);

        assert_eq!(report.tally.total, 2);
        let paths: Vec<_> = report.items.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}

//! Near-duplicate detection over a directory walk, with optional deletion.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::{DynamicImage, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use thiserror::Error;

use crate::hasher::{Fingerprinter, HashKind};
use crate::index::DuplicateIndex;
use crate::scanner::{self, ScanError};

#[derive(Debug, Error)]
pub enum DedupeError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("progress template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

/// Settings for one detection run.
#[derive(Debug, Clone, Copy)]
pub struct DedupeOptions {
    pub algorithm: HashKind,
    /// Stop after this many successfully hashed images; `None` is unbounded.
    pub limit: Option<usize>,
}

/// Everything one detection pass learned. Built fresh per run, consumed by
/// the retention/report phase, then discarded.
#[derive(Debug)]
pub struct DedupeOutcome {
    /// Images successfully hashed.
    pub processed: usize,
    /// Files skipped because they would not decode.
    pub skipped: usize,
    /// Buckets with more than one path, discovery order within each: the
    /// first path of a group is the keeper.
    pub groups: Vec<Vec<PathBuf>>,
}

impl DedupeOutcome {
    /// Paths slated for removal: everything but the first of each group.
    pub fn redundant_count(&self) -> usize {
        self.groups.iter().map(|group| group.len() - 1).sum()
    }

    /// True when the walk matched no image files at all.
    pub fn no_images(&self) -> bool {
        self.processed == 0 && self.skipped == 0
    }
}

/// Walk `root`, fingerprint every image under it, and bucket identical
/// fingerprints.
///
/// One sequential pass: walk, decode, hash, register. A file that fails to
/// decode is logged and skipped; it does not count toward `limit` and never
/// reaches a bucket.
pub fn detect(root: &Path, options: &DedupeOptions) -> Result<DedupeOutcome, DedupeError> {
    let fingerprinter = Fingerprinter::new(options.algorithm);
    let mut index = DuplicateIndex::new();
    let mut skipped = 0usize;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Hashing images ({})…", options.algorithm));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    for path in scanner::walk_images(root)? {
        if let Some(limit) = options.limit {
            if index.processed() >= limit {
                break;
            }
        }
        match decode(&path) {
            Ok(img) => index.register(fingerprinter.fingerprint(&img), path),
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                skipped += 1;
            }
        }
        spinner.tick();
    }
    spinner.finish_with_message(format!("Hashed {} image(s)", index.processed()));
    debug!(
        "hashed {} image(s) in {:.2?}",
        index.processed(),
        start.elapsed()
    );

    Ok(DedupeOutcome {
        processed: index.processed(),
        skipped,
        groups: index.into_duplicate_groups(),
    })
}

fn decode(path: &Path) -> image::ImageResult<DynamicImage> {
    ImageReader::open(path)?.decode()
}

/// Per-file results of a removal pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemovalStats {
    pub removed: usize,
    pub failed: usize,
}

/// What came of the retention phase.
#[derive(Debug)]
pub enum RetentionOutcome {
    /// The operator declined; nothing was touched.
    Cancelled,
    Removed(RemovalStats),
}

/// Enforce retention once the operator has answered the prompt.
///
/// A declined confirmation is a guaranteed no-op: no filesystem call is made
/// at all.
pub fn enforce_retention(groups: &[Vec<PathBuf>], confirmed: bool) -> RetentionOutcome {
    if !confirmed {
        return RetentionOutcome::Cancelled;
    }
    RetentionOutcome::Removed(remove_duplicates(groups))
}

/// Delete every redundant path in `groups`, keeping the first of each.
///
/// Runs strictly after the index has stabilized, never mid-walk. A failed
/// removal is logged per file and does not stop the remaining deletions.
pub fn remove_duplicates(groups: &[Vec<PathBuf>]) -> RemovalStats {
    let mut stats = RemovalStats::default();
    for (i, group) in groups.iter().enumerate() {
        println!("\n✨ Group {}:", i + 1);
        println!("   🏆 Keeping → {}", group[0].display());
        for dup in &group[1..] {
            match fs::remove_file(dup) {
                Ok(()) => {
                    stats.removed += 1;
                    println!("   🗑️  Deleted {}", dup.display());
                }
                Err(err) => {
                    stats.failed += 1;
                    warn!("could not delete {}: {}", dup.display(), err);
                }
            }
        }
    }
    stats
}

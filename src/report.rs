//! Summaries of a detection run, as console text or a serializable record.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::dedupe::DedupeOutcome;
use crate::hasher::HashKind;
use crate::styler;

/// Serializable record of one detection run.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub generated_at: String,
    pub root: PathBuf,
    pub algorithm: String,
    pub processed: usize,
    pub skipped: usize,
    pub duplicate_groups: usize,
    pub redundant_files: usize,
    pub groups: Vec<Vec<PathBuf>>,
}

impl ScanReport {
    pub fn new(root: &Path, algorithm: HashKind, outcome: &DedupeOutcome) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            root: root.to_path_buf(),
            algorithm: algorithm.to_string(),
            processed: outcome.processed,
            skipped: outcome.skipped,
            duplicate_groups: outcome.groups.len(),
            redundant_files: outcome.redundant_count(),
            groups: outcome.groups.clone(),
        }
    }
}

/// Human-readable report. Distinguishes an empty walk from a walk that
/// found no duplicates. `quiet` drops the per-group path listing.
pub fn render_scan(outcome: &DedupeOutcome, quiet: bool) -> String {
    let mut out = String::new();
    out.push_str(&styler::boxify("Duplicate report"));
    out.push('\n');

    if outcome.no_images() {
        out.push_str("⚠️  No images found in the directory.\n");
        return out;
    }

    out.push_str(&format!("Images processed: {}\n", outcome.processed));
    if outcome.skipped > 0 {
        out.push_str(&format!(
            "⚠️  Skipped {} unreadable file(s)\n",
            outcome.skipped
        ));
    }

    if outcome.groups.is_empty() {
        out.push_str("✅ No duplicate images found.\n");
        return out;
    }

    if quiet {
        out.push_str(&format!(
            "Found {} duplicate group(s), {} redundant file(s)\n",
            outcome.groups.len(),
            outcome.redundant_count()
        ));
        return out;
    }

    out.push_str(&format!(
        "Found {} duplicate group(s), {} redundant file(s):\n",
        outcome.groups.len(),
        outcome.redundant_count()
    ));
    for (i, group) in outcome.groups.iter().enumerate() {
        out.push_str(&format!("\n✨ Group {}:\n", i + 1));
        out.push_str(&format!("   🏆 {}\n", group[0].display()));
        for dup in &group[1..] {
            out.push_str(&format!("   ▶ {}\n", dup.display()));
        }
    }
    out
}

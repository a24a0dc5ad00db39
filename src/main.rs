use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dialoguer::Confirm;
use log::LevelFilter;
use std::path::PathBuf;

use crate::dedupe::{DedupeOptions, RetentionOutcome};
use crate::hasher::HashKind;
use crate::report::ScanReport;

mod archive;
mod catalog;
mod dedupe;
mod hasher;
mod index;
mod report;
mod scanner;
mod styler;

#[derive(Parser, Debug)]
#[command(name = "tidypix", version, about = "CLI for tidying image datasets")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Duplicate workflows
    Duplicates {
        #[command(subcommand)]
        command: Dups,
    },

    /// Unpack a dataset zip beside itself
    Extract {
        /// Archive to extract
        #[arg(short, long, value_name = "FILE")]
        archive: PathBuf,
    },

    /// Tabulate a `<category>/<style>` dataset tree
    Catalog {
        /// Dataset root
        #[arg(short, long, value_name = "DIR")]
        path: PathBuf,
        /// Write JSON Lines here instead of printing a table
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum Dups {
    /// Find and report duplicate groups
    Scan {
        /// Directory to scan
        #[arg(short, long, value_name = "DIR")]
        path: PathBuf,
        /// Hash algorithm: phash, dhash or ahash
        #[arg(short, long, value_name = "NAME", default_value = "phash")]
        algorithm: HashKind,
        /// Stop after hashing this many images
        #[arg(short, long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
        /// Skip the per-group path listing
        #[arg(short, long)]
        quiet: bool,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Delete redundant copies, keeping the first seen of each group
    Delete {
        /// Directory to clean
        #[arg(short, long, value_name = "DIR")]
        path: PathBuf,
        /// Hash algorithm: phash, dhash or ahash
        #[arg(short, long, value_name = "NAME", default_value = "phash")]
        algorithm: HashKind,
        /// Stop after hashing this many images
        #[arg(short, long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,
        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder().filter_level(level).init();

    match cli.command {
        Commands::Duplicates { command } => match command {
            Dups::Scan {
                path,
                algorithm,
                limit,
                quiet,
                json,
            } => {
                let options = DedupeOptions { algorithm, limit };
                if !json {
                    println!("▶ Scanning for duplicates in: {}", path.display());
                }
                let outcome = dedupe::detect(&path, &options)
                    .with_context(|| format!("Failed to scan {}", path.display()))?;

                if json {
                    let report = ScanReport::new(&path, algorithm, &outcome);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", report::render_scan(&outcome, quiet));
                }
            }

            Dups::Delete {
                path,
                algorithm,
                limit,
                yes,
            } => {
                println!("▶ Deleting duplicates in: {}", path.display());
                let options = DedupeOptions { algorithm, limit };
                let outcome = dedupe::detect(&path, &options)
                    .with_context(|| format!("Failed to scan {}", path.display()))?;

                if outcome.no_images() {
                    println!("⚠️  No images found in the directory.");
                    return Ok(());
                }
                println!("Images processed: {}", outcome.processed);
                if outcome.groups.is_empty() {
                    println!("✅ No duplicate images found.");
                    return Ok(());
                }
                println!(
                    "Found {} duplicate group(s), {} redundant file(s)",
                    outcome.groups.len(),
                    outcome.redundant_count()
                );

                let confirmed = yes
                    || Confirm::new()
                        .with_prompt(format!(
                            "Delete {} file(s), keeping the first of each group?",
                            outcome.redundant_count()
                        ))
                        .default(false)
                        .interact()
                        .context("Failed to read confirmation")?;

                match dedupe::enforce_retention(&outcome.groups, confirmed) {
                    RetentionOutcome::Cancelled => {
                        println!("⚠️  Cancelled; no files were changed.");
                    }
                    RetentionOutcome::Removed(stats) => {
                        println!("\n✅ Removed {} duplicate file(s)", stats.removed);
                        if stats.failed > 0 {
                            println!("⚠️  Could not remove {} file(s)", stats.failed);
                        }
                    }
                }
            }
        },

        Commands::Extract { archive } => {
            println!("▶ Extracting {}", archive.display());
            let dest = archive::extract_archive(&archive)
                .with_context(|| format!("Failed to extract {}", archive.display()))?;
            println!("✅ Extracted into {}", dest.display());
        }

        Commands::Catalog { path, output } => {
            println!("▶ Cataloguing: {}", path.display());
            let rows = catalog::load_catalog(&path)
                .with_context(|| format!("Failed to catalogue {}", path.display()))?;
            if rows.is_empty() {
                println!("⚠️  No images found in the directory.");
                return Ok(());
            }
            match output {
                Some(file) => {
                    catalog::write_jsonl(&rows, &file)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    println!("✅ Wrote {} record(s) to {}", rows.len(), file.display());
                }
                None => print!("{}", catalog::render_table(&rows)),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn limit_accepts_only_positive_counts() {
        let zero = Cli::try_parse_from([
            "tidypix",
            "duplicates",
            "scan",
            "--path",
            "photos",
            "--limit",
            "0",
        ]);
        assert!(zero.is_err());

        let cli = Cli::try_parse_from([
            "tidypix",
            "duplicates",
            "scan",
            "--path",
            "photos",
            "--limit",
            "3",
        ])
        .unwrap();
        let Commands::Duplicates {
            command: Dups::Scan { limit, .. },
        } = cli.command
        else {
            panic!("parsed into the wrong subcommand");
        };
        assert_eq!(limit, Some(3));
    }

    #[test]
    fn unknown_algorithm_is_rejected_at_parse_time() {
        let parsed = Cli::try_parse_from([
            "tidypix",
            "duplicates",
            "scan",
            "--path",
            "photos",
            "--algorithm",
            "ssim",
        ]);
        assert!(parsed.is_err());
    }
}

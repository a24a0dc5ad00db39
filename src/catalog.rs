//! Tabular view of a `<category>/<style>/…` dataset tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::scanner::{self, ScanError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("writing catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding catalog row: {0}")]
    Json(#[from] serde_json::Error),
}

/// One image in the dataset, addressed relative to the catalog root.
#[derive(Debug, Serialize)]
pub struct CatalogRow {
    pub path: PathBuf,
    pub category: String,
    pub style: String,
    pub width: u32,
    pub height: u32,
}

/// Walk `root` and build one row per image that follows the two-level
/// `<category>/<style>/…` convention. Files sitting above that depth and
/// images whose header will not parse are skipped with a warning. Rows come
/// back sorted by path.
pub fn load_catalog(root: &Path) -> Result<Vec<CatalogRow>, CatalogError> {
    let mut rows = Vec::new();
    for path in scanner::walk_images(root)? {
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let Some((category, style)) = split_category_style(relative) else {
            warn!(
                "skipping {}: expected <category>/<style>/ layout",
                path.display()
            );
            continue;
        };
        let (width, height) = match image::image_dimensions(&path) {
            Ok(dimensions) => dimensions,
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        rows.push(CatalogRow {
            path: relative.to_path_buf(),
            category,
            style,
            width,
            height,
        });
    }
    rows.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(rows)
}

/// First two components of `relative`, provided a file name still follows
/// them.
fn split_category_style(relative: &Path) -> Option<(String, String)> {
    let mut parts = relative.components();
    let category = parts.next()?.as_os_str().to_string_lossy().into_owned();
    let style = parts.next()?.as_os_str().to_string_lossy().into_owned();
    parts.next()?;
    Some((category, style))
}

/// Aligned text table over all rows, widest entry per column wins.
pub fn render_table(rows: &[CatalogRow]) -> String {
    let mut path_width = "PATH".len();
    let mut category_width = "CATEGORY".len();
    let mut style_width = "STYLE".len();
    for row in rows {
        path_width = path_width.max(row.path.display().to_string().chars().count());
        category_width = category_width.max(row.category.chars().count());
        style_width = style_width.max(row.style.chars().count());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<path_width$}  {:<category_width$}  {:<style_width$}  {:>5}  {:>6}\n",
        "PATH", "CATEGORY", "STYLE", "WIDTH", "HEIGHT"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<path_width$}  {:<category_width$}  {:<style_width$}  {:>5}  {:>6}\n",
            row.path.display().to_string(),
            row.category,
            row.style,
            row.width,
            row.height
        ));
    }
    out
}

/// Write the catalog as JSON Lines, one record per row.
pub fn write_jsonl(rows: &[CatalogRow], output: &Path) -> Result<(), CatalogError> {
    let file = File::create(output)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    out.flush()?;
    Ok(())
}

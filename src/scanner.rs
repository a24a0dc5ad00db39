//! Walk a directory tree for image files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Extensions admitted to the walk. The match is case-sensitive.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {0}")]
    NotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

fn has_image_extension(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Lazily yield every image file under `root`, recursing through
/// subdirectories.
///
/// Paths come out in whatever order the filesystem enumerates them; the
/// order is not sorted and not stable across runs or platforms. A missing
/// `root` is an error, a directory with zero matching files is not.
pub fn walk_images(root: &Path) -> Result<impl Iterator<Item = PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let iter = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path));
    Ok(iter)
}

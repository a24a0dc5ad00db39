//! Zip extraction for dataset drops.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("reading archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Extract `path` into a sibling directory named after the archive.
///
/// A leftover directory from an earlier extraction is removed first, so the
/// result is always a clean unpack. macOS resource-fork folders (`__MACOSX`)
/// are pruned, and the archive file itself is deleted once everything else
/// succeeded. Returns the destination directory.
pub fn extract_archive(path: &Path) -> Result<PathBuf, ArchiveError> {
    if !path.exists() {
        return Err(ArchiveError::NotFound(path.to_path_buf()));
    }

    let dest = path.with_extension("");
    if dest != path && dest.is_dir() {
        debug!("removing stale extraction at {}", dest.display());
        fs::remove_dir_all(&dest)?;
    }

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(&dest)?;

    let macosx = dest.join("__MACOSX");
    if macosx.is_dir() {
        if let Err(err) = fs::remove_dir_all(&macosx) {
            warn!("could not prune {}: {}", macosx.display(), err);
        }
    }

    fs::remove_file(path)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_beside_the_archive_and_removes_it() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("bundle.zip");
        write_zip(
            &zip_path,
            &[("a.txt", b"alpha".as_slice()), ("sub/b.txt", b"beta")],
        );

        let dest = extract_archive(&zip_path).unwrap();

        assert_eq!(dest, temp_dir.path().join("bundle"));
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "beta");
        assert!(!zip_path.exists());
    }

    #[test]
    fn prunes_macosx_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("photos.zip");
        write_zip(
            &zip_path,
            &[
                ("img.txt", b"pixels".as_slice()),
                ("__MACOSX/._img.txt", b"resource fork"),
            ],
        );

        let dest = extract_archive(&zip_path).unwrap();

        assert!(dest.join("img.txt").exists());
        assert!(!dest.join("__MACOSX").exists());
    }

    #[test]
    fn replaces_a_stale_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("bundle");
        fs::create_dir(&stale).unwrap();
        fs::write(stale.join("old.txt"), "leftover").unwrap();

        let zip_path = temp_dir.path().join("bundle.zip");
        write_zip(&zip_path, &[("fresh.txt", b"new".as_slice())]);

        let dest = extract_archive(&zip_path).unwrap();

        assert!(!dest.join("old.txt").exists());
        assert_eq!(fs::read_to_string(dest.join("fresh.txt")).unwrap(), "new");
    }

    #[test]
    fn missing_archive_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.zip");
        let err = extract_archive(&missing).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(p) if p == missing));
    }

    #[test]
    fn garbage_input_surfaces_the_zip_error_and_keeps_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let bogus = temp_dir.path().join("bogus.zip");
        fs::write(&bogus, b"definitely not a zip").unwrap();

        let err = extract_archive(&bogus).unwrap_err();
        assert!(matches!(err, ArchiveError::Zip(_)));
        // Nothing extracted, nothing deleted.
        assert!(bogus.exists());
        assert!(!temp_dir.path().join("bogus").exists());
    }
}

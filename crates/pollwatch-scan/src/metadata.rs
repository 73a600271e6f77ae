//! Point-in-time metadata extraction.

use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

use pollwatch_core::{FileRecord, WatchError, WatchResult};

/// Stat `path` and describe it as a [`FileRecord`].
///
/// Symbolic links are followed, so a link is described by its target and a
/// dangling link fails with [`WatchError::NotFound`].
pub fn extract(path: &Path) -> WatchResult<FileRecord> {
    let metadata = std::fs::metadata(path).map_err(|e| WatchError::io(path, e))?;
    Ok(record_from_metadata(path, &metadata))
}

/// Build a record from metadata that was already fetched.
pub fn record_from_metadata(path: &Path, metadata: &Metadata) -> FileRecord {
    FileRecord::new(
        path,
        metadata.len(),
        metadata.modified().unwrap_or(UNIX_EPOCH),
        get_mode(metadata),
        metadata.is_dir(),
    )
}

// Cross-platform metadata helpers

/// Get the permission and type bits from metadata.
#[cfg(unix)]
fn get_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn get_mode(metadata: &Metadata) -> u32 {
    // Synthesize unix-like bits from what the platform exposes
    let kind = if metadata.is_dir() { 0o040000 } else { 0o100000 };
    let perm = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    kind | perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, b"0123456789").unwrap();

        let record = extract(&file).unwrap();
        assert_eq!(record.path(), file.as_path());
        assert_eq!(record.size, 10);
        assert!(!record.is_dir);
        assert_ne!(record.mode, 0);
    }

    #[test]
    fn test_extract_directory() {
        let temp = TempDir::new().unwrap();
        let record = extract(temp.path()).unwrap();
        assert!(record.is_dir);
    }

    #[test]
    fn test_extract_missing() {
        let temp = TempDir::new().unwrap();
        let err = extract(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, WatchError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_mode_tracks_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.sh");
        fs::write(&file, b"#!/bin/sh").unwrap();

        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
        let before = extract(&file).unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
        let after = extract(&file).unwrap();

        assert_eq!(before.mode & 0o777, 0o644);
        assert_eq!(after.mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_broken_symlink() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("missing"), &link).unwrap();

        assert!(matches!(
            extract(&link),
            Err(WatchError::NotFound { .. })
        ));
    }
}

//! Atomic report file writes.

use crate::error::{ReportError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write `bytes` to `path` through a temp file in the same directory,
/// then rename it over the target.
///
/// The parent directory must already exist. On any failure the temp file
/// is removed when dropped and an existing file at `path` is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| ReportError::io(path, e))?;
    debug!(temp = %temp.path().display(), "Writing report to temp file");

    temp.write_all(bytes).map_err(|e| ReportError::io(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ReportError::io(path, e))?;
    temp.persist(path)
        .map_err(|e| ReportError::io(path, e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.pdf");

        let err = write_atomic(&path, b"data").unwrap_err();
        match err {
            ReportError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert!(!path.exists());
    }
}

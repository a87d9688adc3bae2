//! Output-directory helpers: path normalization, file listing, and safe
//! download resolution.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, TallysheetError};

/// Normalizes a slash-separated path: collapses repeated separators and
/// drops `.` segments, so `a//b/./c.xlsx` becomes `a/b/c.xlsx`. A leading
/// separator is preserved.
pub fn normalize_path(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Lists regular files in the output directory, newest-named first
/// (descending lexicographic, which sorts date-named workbooks newest
/// first). A missing directory means "no files", not an error.
pub fn list_output_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            debug!(dir = %dir.display(), "output directory missing, listing nothing");
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    files.sort_by(|a, b| b.cmp(a));
    files
}

/// Resolves a requested download to a path inside the output directory.
///
/// Only the basename of the supplied name is used, so traversal attempts
/// like `../../etc/passwd` resolve to a file directly under `dir` or fail.
pub fn resolve_download(dir: &Path, name: &str) -> Result<PathBuf> {
    let base = Path::new(name).file_name().ok_or_else(|| {
        TallysheetError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid file name: {name}"),
        ))
    })?;

    let path = dir.join(base);
    if !path.is_file() {
        return Err(TallysheetError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such output file: {}", base.to_string_lossy()),
        )));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators_and_dot_segments() {
        assert_eq!(normalize_path("a//b/./c.xlsx"), "a/b/c.xlsx");
        assert_eq!(normalize_path("/var//exports/./out"), "/var/exports/out");
        assert_eq!(normalize_path("plain/path.xlsx"), "plain/path.xlsx");
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("never-created");
        assert!(list_output_files(&gone).is_empty());
    }

    #[test]
    fn lists_regular_files_descending() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2024-01-01.xlsx"), b"a").unwrap();
        std::fs::write(dir.path().join("2024-03-01.xlsx"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let files = list_output_files(dir.path());
        assert_eq!(files, vec!["2024-03-01.xlsx", "2024-01-01.xlsx"]);
    }

    #[test]
    fn download_uses_basename_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.xlsx"), b"x").unwrap();

        let resolved = resolve_download(dir.path(), "../../report.xlsx").unwrap();
        assert_eq!(resolved, dir.path().join("report.xlsx"));
    }

    #[test]
    fn download_of_absent_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_download(dir.path(), "nope.xlsx").is_err());
    }
}

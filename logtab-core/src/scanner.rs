/// Directory scanning — one sorted snapshot of matching filenames per tick.
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Suffix a filename must carry to be tracked.
pub const LOG_SUFFIX: &str = ".log";

/// The watched directory could not be listed this tick.
#[derive(Debug, Error)]
#[error("failed to list {dir}: {source}")]
pub struct ScanError {
    pub dir: String,
    #[source]
    pub source: std::io::Error,
}

/// List `dir` and return the names of all regular `.log` files, sorted.
///
/// Returns plain filenames, never paths. Subdirectories and non-matching
/// files are skipped; entries that vanish mid-listing are ignored.
pub fn scan(dir: &Path) -> Result<Vec<String>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError {
        dir: dir.display().to_string(),
        source,
    })?;

    // Suffix match rather than Path::extension(), so a file literally
    // named ".log" still counts.
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|name| name.ends_with(LOG_SUFFIX))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.log"), "x").unwrap();
        fs::write(dir.path().join("a.log"), "y").unwrap();
        fs::write(dir.path().join("notes.txt"), "z").unwrap();
        fs::create_dir(dir.path().join("sub.log")).unwrap();

        let names = scan(dir.path()).unwrap();
        assert_eq!(names, vec!["a.log".to_string(), "b.log".to_string()]);
    }

    #[test]
    fn bare_dot_log_filename_is_tracked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".log"), "x").unwrap();
        fs::write(dir.path().join("logfile"), "y").unwrap();

        let names = scan(dir.path()).unwrap();
        assert_eq!(names, vec![".log".to_string()]);
    }

    #[test]
    fn empty_dir_is_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_dir_is_scan_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone");
        assert!(scan(&gone).is_err());
    }
}

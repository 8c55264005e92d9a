//! Shared utility functions for tree walking

use std::fs;
use std::path::Path;

/// Outcome of trying to size a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measured {
    Size(u64),
    /// The stat call failed: broken link, vanished file, permission denied.
    Unreadable,
    /// The time budget ran out before this file was reached.
    OverBudget,
}

impl Measured {
    pub fn size(self) -> Option<u64> {
        match self {
            Measured::Size(n) => Some(n),
            Measured::Unreadable | Measured::OverBudget => None,
        }
    }
}

/// Stat a file (following symlinks) and report its length.
pub fn measure_file(path: &Path) -> Measured {
    match fs::metadata(path) {
        Ok(meta) => Measured::Size(meta.len()),
        Err(e) => {
            log::warn!("could not access size of file {}: {}", path.display(), e);
            Measured::Unreadable
        }
    }
}

/// Display name for a path: its basename, or the whole path for `/`.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0M");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0G");
    }

    #[test]
    fn test_entry_name() {
        assert_eq!(entry_name(Path::new("/a/b/c.txt")), "c.txt");
        assert_eq!(entry_name(Path::new("/")), "/");
    }

    #[test]
    fn test_measure_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ten.txt");
        fs::write(&file, "0123456789").unwrap();
        assert_eq!(measure_file(&file), Measured::Size(10));
        assert_eq!(measure_file(&dir.path().join("gone.txt")), Measured::Unreadable);
    }

    #[test]
    fn test_measured_size() {
        assert_eq!(Measured::Size(3).size(), Some(3));
        assert_eq!(Measured::Unreadable.size(), None);
        assert_eq!(Measured::OverBudget.size(), None);
    }
}

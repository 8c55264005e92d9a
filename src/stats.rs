//! Walk statistics collection and display
//!
//! Counts what the tree builder saw: folders, files, and why some file sizes
//! are missing. The counts are reported in logs and never written into the
//! tree document.

use std::time::Duration;

use crate::tree::{Measured, format_size};

/// Collected statistics about one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Folder nodes, including the root
    pub folders: usize,
    /// File nodes
    pub files: usize,
    /// Files with a known size
    pub measured_files: usize,
    /// Files whose stat call failed
    pub unreadable_files: usize,
    /// Files reached after the time budget ran out
    pub over_budget_files: usize,
    /// Folders that could not be listed (emitted without children)
    pub unreadable_folders: usize,
    /// Symlinks to directories, emitted as childless folders
    pub symlinked_folders: usize,
    /// Entries skipped by an ignore rule
    pub ignored: usize,
    /// Sum of all measured file sizes
    pub measured_bytes: u64,
    /// Wall time of the walk
    pub elapsed: Duration,
    /// Elapsed time at which the budget ran out
    pub budget_exhausted_at: Option<Duration>,
}

impl WalkStats {
    /// Record a visited file.
    pub fn record_file(&mut self, measured: Measured) {
        self.files += 1;
        match measured {
            Measured::Size(n) => {
                self.measured_files += 1;
                self.measured_bytes = self.measured_bytes.saturating_add(n);
            }
            Measured::Unreadable => self.unreadable_files += 1,
            Measured::OverBudget => self.over_budget_files += 1,
        }
    }

    /// Record a folder node.
    pub fn record_folder(&mut self) {
        self.folders += 1;
    }

    /// Total nodes in the tree.
    pub fn nodes(&self) -> usize {
        self.folders + self.files
    }

    /// True when at least one file size is unknown.
    pub fn is_partial(&self) -> bool {
        self.unreadable_files > 0 || self.over_budget_files > 0
    }

    /// One-line summary for status output.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} folders, {} files, {} measured in {:.2}s",
            self.folders,
            self.files,
            format_size(self.measured_bytes),
            self.elapsed.as_secs_f64()
        );
        if self.unreadable_files > 0 {
            line.push_str(&format!(", {} unreadable", self.unreadable_files));
        }
        if self.over_budget_files > 0 {
            line.push_str(&format!(
                ", {} unsized after time budget",
                self.over_budget_files
            ));
        }
        line
    }
}

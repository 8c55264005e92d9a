//! Configuration types for the tree builder

use std::time::Duration;

/// Directory names skipped when no ignore list is given.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "bin",
    "__pycache__",
    ".ipynb_checkpoints",
];

/// Time budget applied when the caller does not pick one.
pub const DEFAULT_MAX_SECONDS: f64 = 15.0;

/// Configuration for a single walk.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Exact basenames to exclude, together with everything beneath them.
    pub ignore_names: Vec<String>,
    /// Seconds after which file sizes are no longer read.
    /// Zero, negative or non-finite values disable the budget.
    pub max_seconds: f64,
}

impl BuildConfig {
    /// Default ignore list with no time budget.
    pub fn unlimited() -> Self {
        Self {
            max_seconds: 0.0,
            ..Default::default()
        }
    }

    pub fn with_ignore_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_seconds(mut self, max_seconds: f64) -> Self {
        self.max_seconds = max_seconds;
        self
    }

    /// The budget as a duration, or `None` when it is disabled.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.max_seconds > 0.0 {
            // Out of range for a Duration (including infinity) means no limit
            Duration::try_from_secs_f64(self.max_seconds).ok()
        } else {
            None
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            ignore_names: DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect(),
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }
}

//! Output configuration types

use std::path::PathBuf;

/// File name the visualization page fetches.
pub const DEFAULT_FILENAME: &str = "data.json";

/// Configuration for writing the tree document.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory receiving the document; created if missing.
    pub output_dir: PathBuf,
    pub filename: String,
    /// Indent the JSON with two spaces
    pub pretty: bool,
}

impl OutputConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the document this config writes.
    pub fn target(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            filename: DEFAULT_FILENAME.to_string(),
            pretty: true,
        }
    }
}

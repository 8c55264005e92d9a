//! Directory tree walking logic
//!
//! `TreeBuilder` walks a directory depth-first and builds the full tree in
//! memory. File sizes are read until the time budget runs out; after that the
//! walk still visits every entry but leaves file sizes unknown. Folder sizes
//! are always the sum of whatever child sizes are known.

mod budget;
mod config;
mod filter;
mod node;
mod utils;
mod walker;

use std::path::Path;

use crate::error::BuildError;

// Re-export public types
pub use budget::{Budget, Clock, SystemClock};
pub use config::{BuildConfig, DEFAULT_IGNORES, DEFAULT_MAX_SECONDS};
pub use filter::IgnoreFilter;
pub use node::{Iter, Node, NodeKind};
pub use utils::{Measured, entry_name, format_size, measure_file};
pub use walker::{TreeBuilder, Walk};

/// Build the tree for `root`, skipping `ignore_names` and reading sizes for
/// at most `max_seconds` (`<= 0` for no limit).
pub fn build<I, S>(root: &Path, ignore_names: I, max_seconds: f64) -> Result<Node, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = BuildConfig::default()
        .with_ignore_names(ignore_names)
        .with_max_seconds(max_seconds);
    TreeBuilder::new(config).build(root)
}

//! dir-graph - Walk a directory tree under a time budget and emit a JSON hierarchy

pub mod error;
pub mod logging;
pub mod output;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{BuildError, OutputError};
pub use output::{OutputConfig, StatusPrinter, print_json, read_tree_json, write_tree_json};
pub use stats::WalkStats;
pub use tree::{
    BuildConfig, Clock, DEFAULT_IGNORES, Node, NodeKind, SystemClock, TreeBuilder, Walk, build,
};

//! Tree output
//!
//! - `config` - Output configuration types
//! - `json` - JSON document writing and reading
//! - `status` - Colored console status lines for the CLI

mod config;
mod json;
mod status;

pub use config::{DEFAULT_FILENAME, OutputConfig};
pub use json::{print_json, read_tree_json, write_json, write_tree_json};
pub use status::StatusPrinter;

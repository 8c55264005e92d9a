//! JSON output formatting

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::OutputError;
use crate::tree::Node;

use super::config::OutputConfig;

/// Serialize a tree to any writer, followed by a newline.
pub fn write_json<W: Write>(mut writer: W, node: &Node, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, node)?;
    } else {
        serde_json::to_writer(&mut writer, node)?;
    }
    writeln!(writer)
}

/// Print tree node as pretty-printed JSON to stdout.
pub fn print_json(node: &Node) -> io::Result<()> {
    let json = serde_json::to_string_pretty(node).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Write the tree document into the configured directory, creating the
/// directory if needed. Returns the path of the written file.
pub fn write_tree_json(node: &Node, config: &OutputConfig) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(&config.output_dir).map_err(|e| OutputError::Io {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let path = config.target();
    let io_err = |e: io::Error| OutputError::Io {
        path: path.clone(),
        source: e,
    };

    let file = File::create(&path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, node, config.pretty).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Read a tree document back.
pub fn read_tree_json(path: &std::path::Path) -> Result<Node, OutputError> {
    let file = File::open(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_reader(io::BufReader::new(file))?)
}

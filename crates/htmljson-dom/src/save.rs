//! Writing trees to JSON files and reading them back.
//!
//! Files hold compact JSON followed by a newline. Encoding and decoding go
//! through [`crate::json`], so trees of any depth round-trip. Failures carry
//! the path and the underlying I/O or encoding error unchanged; a partially
//! written file is left as the OS leaves it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::{Node, json};

/// Where [`save`] writes a single tree.
pub const DEFAULT_NODE_PATH: &str = "./html_node.json";

/// Where [`save_nodes`] writes a list of nodes.
pub const DEFAULT_NODES_PATH: &str = "./html_nodes.json";

/// Error type for saving trees.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The output file could not be created.
    #[error("failed to create '{}': {source}", .path.display())]
    Create {
        /// Output path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// Encoding or writing the JSON failed.
    #[error("failed to write JSON to '{}': {source}", .path.display())]
    Encode {
        /// Output path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Flushing buffered output failed.
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Error type for loading a saved tree.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        /// Input path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The file is not a valid serialized tree.
    #[error("failed to decode '{}': {source}", .path.display())]
    Decode {
        /// Input path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Save `node` to [`DEFAULT_NODE_PATH`].
///
/// # Errors
///
/// Returns a [`SaveError`] if the file cannot be created or written.
pub fn save(node: &Node) -> Result<(), SaveError> {
    save_to_path(node, DEFAULT_NODE_PATH)
}

/// Save `nodes` as a JSON array to [`DEFAULT_NODES_PATH`].
///
/// # Errors
///
/// Returns a [`SaveError`] if the file cannot be created or written.
pub fn save_nodes(nodes: &[&Node]) -> Result<(), SaveError> {
    save_nodes_to_path(nodes, DEFAULT_NODES_PATH)
}

/// Save `node` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns a [`SaveError`] if the file cannot be created or written.
pub fn save_to_path(node: &Node, path: impl AsRef<Path>) -> Result<(), SaveError> {
    write_json(node, path.as_ref())
}

/// Save `nodes` as a JSON array to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns a [`SaveError`] if the file cannot be created or written.
pub fn save_nodes_to_path(nodes: &[&Node], path: impl AsRef<Path>) -> Result<(), SaveError> {
    write_json(nodes, path.as_ref())
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), SaveError> {
    let file = File::create(path).map_err(|source| SaveError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    json::to_writer(&mut writer, value, false).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| SaveError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a tree previously written by [`save_to_path`].
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be opened or does not contain
/// a serialized tree.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Node, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

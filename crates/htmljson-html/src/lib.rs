//! HTML to simplified-tree conversion for the htmljson crates.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tree conversion** - any parse tree exposed through [`SourceNode`] is
//!   copied into an owned [`htmljson_dom::Node`] tree of the same shape
//! - **html5ever adapter** - [`SourceNode`] for `markup5ever_rcdom` handles
//! - **Entry points** - parse from a string, bytes, a reader, or a file
//!
//! Parsing itself is delegated to `html5ever`, which recovers from malformed
//! markup the way browsers do. The only failures surfaced here are I/O errors
//! while reading input.

/// Parse tree to simplified tree conversion.
pub mod convert;
/// `SourceNode` implementation for html5ever's reference-counted DOM.
pub mod rcdom;
/// The interface a parse tree must expose to be converted.
pub mod source;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use htmljson_dom::Node;
use markup5ever_rcdom::RcDom;
use thiserror::Error;

pub use convert::convert;
pub use source::SourceNode;

/// Error type for reading HTML input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be opened.
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        /// Input path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// Reading from the input stream failed.
    #[error(transparent)]
    Read(#[from] io::Error),
}

fn parser() -> html5ever::Parser<RcDom> {
    parse_document(RcDom::default(), ParseOpts::default())
}

/// Parse an HTML string and convert the resulting document.
#[must_use]
pub fn parse_str(html: &str) -> Node {
    let dom = parser().one(html);
    convert(&dom.document)
}

/// Parse HTML bytes and convert the resulting document.
///
/// Input is decoded as UTF-8; invalid sequences become U+FFFD.
#[must_use]
pub fn parse_bytes(bytes: &[u8]) -> Node {
    let dom = parser().from_utf8().one(bytes);
    convert(&dom.document)
}

/// Read HTML from `reader` until EOF and convert the resulting document.
///
/// # Errors
///
/// Returns [`ParseError::Read`] if reading fails.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Node, ParseError> {
    let dom = parser().from_utf8().read_from(&mut reader)?;
    Ok(convert(&dom.document))
}

/// Read and convert the HTML file at `path`.
///
/// # Errors
///
/// Returns [`ParseError::Open`] if the file cannot be opened and
/// [`ParseError::Read`] if reading it fails.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(file))
}

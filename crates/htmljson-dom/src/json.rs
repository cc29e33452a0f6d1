//! JSON encoding and decoding that copes with arbitrarily deep trees.
//!
//! Each tree level nests two JSON values (the node object and its `child`
//! array), so plain `serde_json` calls hit its recursion limit on documents
//! only ~64 levels deep and overflow the stack on very deep ones. These
//! helpers lift the recursion limit and run through `serde_stacker`, which
//! moves onto a fresh heap-allocated stack segment whenever the current one
//! runs low.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Write `value` as JSON, compact or pretty-printed.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    pretty: bool,
) -> serde_json::Result<()> {
    if pretty {
        let mut ser = serde_json::Serializer::pretty(writer);
        value.serialize(serde_stacker::Serializer::new(&mut ser))
    } else {
        let mut ser = serde_json::Serializer::new(writer);
        value.serialize(serde_stacker::Serializer::new(&mut ser))
    }
}

/// Encode `value` as a compact JSON string.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    to_writer(&mut out, value, false)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Read one JSON value from `reader`, rejecting trailing data.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not a valid `T`.
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Decode one JSON value from a string, rejecting trailing data.
///
/// # Errors
///
/// Returns an error if the input is not a valid `T`.
pub fn from_str<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

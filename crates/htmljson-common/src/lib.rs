//! Common utilities for the htmljson crates.
//!
//! This crate provides shared infrastructure used by the converter and the CLI:
//! - **Warning System** - deduplicated, colored stderr diagnostics

pub mod warning;

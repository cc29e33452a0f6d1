//! Converter warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same oddity reports it
//! once. Used by the converter to surface parser output it does not recognize.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When set, warnings are still recorded but never printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Warn about unexpected input (prints once per unique message).
///
/// Returns `true` the first time a given component/message pair is seen.
///
/// # Example
/// ```
/// use htmljson_common::warning::warn_once;
///
/// let first = warn_once("Convert", "unrecognized node kind");
/// let again = warn_once("Convert", "unrecognized node kind");
/// assert!(first);
/// assert!(!again);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{YELLOW}[htmljson {component}] ⚠ {message}{RESET}");
    }
    first_time
}

/// Clear all recorded warnings (call before converting a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Silence (or re-enable) printing of warnings process-wide.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

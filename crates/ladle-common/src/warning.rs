//! Parser warnings with colored terminal output.
//!
//! Each distinct message is printed once per process (until [`clear_warnings`]),
//! so a document with a thousand `&amp;` references produces a single line.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When set, warnings are still recorded but never printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Warn about unsupported input (prints once per unique message).
///
/// Returns `true` if this call was the first to report the message.
///
/// # Example
/// ```
/// use ladle_common::warning::warn_once;
///
/// let _ = warn_once("Tokenizer", "character references are not decoded");
/// assert!(!warn_once("Tokenizer", "character references are not decoded"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first && !QUIET.load(Ordering::Relaxed) {
        eprintln!(
            "{} {}",
            format!("[Ladle {component}] ⚠").yellow().bold(),
            message.yellow()
        );
    }
    first
}

/// Silence (or re-enable) warning output for the whole process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_message_is_reported_once() {
        set_quiet(true);
        let message = "repeated_message_is_reported_once";
        let first = warn_once("Test", message);
        let second = warn_once("Test", message);
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn components_are_deduplicated_separately() {
        set_quiet(true);
        let message = "components_are_deduplicated_separately";
        assert!(warn_once("A", message));
        assert!(warn_once("B", message));
    }
}

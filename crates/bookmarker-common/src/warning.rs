//! Parse warnings with colored terminal output.
//!
//! Recoverable markup errors (stray `<`, duplicate attributes, ...) are not
//! fatal: the tokenizer reports them here and keeps going. Messages are
//! deduplicated so a document full of the same defect warns once.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

fn warned_set() -> &'static Mutex<HashSet<String>> {
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Warn about a recoverable parse error (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "duplicate attribute at position 42");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = warned_set().lock().unwrap().insert(key);

    if should_print {
        eprintln!("{YELLOW}[bookmarker {component}] \u{26a0} {message}{RESET}");
    }
}

/// Clear all recorded warnings (call between documents)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    warned_set().lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_once_deduplicates() {
        clear_warnings();
        warn_once("Test", "same message");
        warn_once("Test", "same message");
        let set = warned_set().lock().unwrap();
        assert_eq!(
            set.iter().filter(|k| k.contains("same message")).count(),
            1
        );
    }
}

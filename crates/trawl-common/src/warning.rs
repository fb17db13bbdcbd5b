//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the batch runner to report documents it had to skip.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a skipped document or degraded result (prints once per unique
/// message). Returns whether the message was printed.
///
/// # Example
/// ```ignore
/// warn_once("fetch", "example.invalid is not available, check your internet connection");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[trawl {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before starting a new batch)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// One document-level problem recorded during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Document the problem belongs to.
    pub url: String,
    /// Human-readable description.
    pub message: String,
}

/// Per-run record of skipped documents.
///
/// Unlike [`warn_once`], nothing here is deduplicated or global: every
/// entry belongs to the run that created the collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Record a problem without printing it.
    pub fn record(&mut self, url: &str, message: &str) {
        self.entries.push(Diagnostic {
            url: url.to_string(),
            message: message.to_string(),
        });
    }

    /// Record a problem and print it through [`warn_once`].
    pub fn warn(&mut self, component: &str, url: &str, message: &str) {
        let _ = warn_once(component, &format!("{url}: {message}"));
        self.record(url, message);
    }

    /// Recorded problems in the order they happened.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of recorded problems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the run was clean.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

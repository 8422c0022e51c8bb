//! Diagnostic sinks
//!
//! Some rules notice suspicious input that is not worth a violation on its
//! own (a cross-field rule pointing at a property that does not exist, a
//! numeric rule fed a value that cannot be a number). They report it to a
//! [`DiagnosticSink`] instead of a global logger, so callers choose where the
//! warning goes and tests can assert on it.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receives warnings emitted by rule functions.
pub trait DiagnosticSink: Send + Sync {
    /// Records a warning raised by `rule`.
    fn warn(&self, rule: &str, message: &str);
}

/// Discards every warning. Default for all built-in rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn warn(&self, _rule: &str, _message: &str) {}
}

/// Forwards warnings to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, rule: &str, message: &str) {
        tracing::warn!(rule, "{message}");
    }
}

/// A single captured warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rule that raised the warning.
    pub rule: String,
    /// Warning text.
    pub message: String,
}

/// Keeps every warning in memory.
///
/// # Examples
///
/// ```
/// use ruletree_validator::foundation::{CollectingSink, DiagnosticSink};
///
/// let sink = CollectingSink::new();
/// sink.warn("equalToProperty", "property /password does not exist");
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink ready to hand to rules.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns a copy of the captured warnings, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Number of captured warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, rule: &str, message: &str) {
        self.entries.lock().push(Diagnostic {
            rule: rule.to_owned(),
            message: message.to_owned(),
        });
    }
}

/// The sink used by rules that were not given one.
#[must_use]
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(NoopSink)
}

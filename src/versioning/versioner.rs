//! Versioned path computation.

use super::{Strategy, Trace, strategy};

/// Produces versioned asset paths with a strategy fixed at construction.
///
/// `apply` is a pure function of `(path, version)`; the optional trace
/// hook only observes changes.
#[derive(Debug, Clone, Default)]
pub struct PathVersioner {
    strategy: Strategy,
    trace: Option<Trace>,
}

impl PathVersioner {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            trace: None,
        }
    }

    /// Attach a hook notified of every path this versioner changes.
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Version `path` with the configured strategy.
    ///
    /// Returns `path` unchanged when either input is empty. Not idempotent:
    /// feeding the output back in versions it a second time.
    pub fn apply(&self, path: &str, version: &str) -> String {
        let versioned = match self.strategy {
            Strategy::Prefix => self.apply_prefix(path, version),
            Strategy::ExtensionInsertion => self.apply_before_extension(path, version),
        };
        if let Some(trace) = &self.trace {
            trace.emit(path, &versioned);
        }
        versioned
    }

    /// Prefix strategy regardless of configuration.
    pub fn apply_prefix(&self, path: &str, version: &str) -> String {
        strategy::prepend_version(path, version)
    }

    /// Extension-insertion strategy regardless of configuration.
    pub fn apply_before_extension(&self, path: &str, version: &str) -> String {
        strategy::insert_before_extension(path, version)
    }
}

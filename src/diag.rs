//! Injected diagnostic sink.
//!
//! Recoverable conditions (missing file, duplicate entry, refused move) are
//! reported as [`Diagnostic`] events through a caller-supplied sink instead of
//! module-global logging calls. [`LogSink`] forwards to `tracing`, [`NullSink`]
//! discards, and [`Capture`] collects events so tests can assert on them.

use std::sync::Mutex;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// One human-readable diagnostic event
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Receiver for diagnostic events
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);

    fn info(&self, message: &str) {
        self.emit(Diagnostic {
            severity: Severity::Info,
            message: message.to_owned(),
        });
    }

    fn warn(&self, message: &str) {
        self.emit(Diagnostic {
            severity: Severity::Warning,
            message: message.to_owned(),
        });
    }
}

/// Default sink: forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!("{}", diagnostic.message),
            Severity::Warning => tracing::warn!("{}", diagnostic.message),
        }
    }
}

/// Sink that discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Sink that records events for later inspection (test helper)
#[derive(Debug, Default)]
pub struct Capture {
    events: Mutex<Vec<Diagnostic>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in emission order
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of captured events at the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }
}

impl DiagnosticSink for Capture {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().unwrap().push(diagnostic);
    }
}

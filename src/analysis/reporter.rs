//! Diagnostic sinks.
//!
//! A [`Reporter`] receives every diagnostic of a run. Reporters are shared
//! across the worker threads that analyze units, so they synchronize
//! internally.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::diagnostic::Diagnostic;

/// Sink for diagnostics.
pub trait Reporter: Send + Sync {
    /// Accept one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic in memory.
///
/// Used for the buffered output formats and in tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded diagnostics, sorted by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        diagnostics.sort();
        diagnostics
    }

    /// Consume the recorder, returning diagnostics sorted by position.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut diagnostics = self
            .diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        diagnostics.sort();
        diagnostics
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Writes one `<position>: <message> (<rule>)` line per diagnostic as it arrives.
#[derive(Debug)]
pub struct HumanReporter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> HumanReporter<W> {
    /// Stream diagnostics to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Reporter for HumanReporter<W> {
    fn report(&self, diagnostic: Diagnostic) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{diagnostic}") {
            warn!("Failed to write diagnostic: {}", e);
        }
    }
}

/// Forwards to another reporter while counting.
pub struct CountingReporter<'a> {
    inner: &'a dyn Reporter,
    count: AtomicUsize,
}

impl<'a> CountingReporter<'a> {
    /// Wrap `inner`.
    pub fn new(inner: &'a dyn Reporter) -> Self {
        Self {
            inner,
            count: AtomicUsize::new(0),
        }
    }

    /// Diagnostics forwarded so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Reporter for CountingReporter<'_> {
    fn report(&self, diagnostic: Diagnostic) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.report(diagnostic);
    }
}

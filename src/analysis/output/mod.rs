//! Buffered diagnostic formatters.
//!
//! Human output is streamed by [`HumanReporter`](super::HumanReporter) as
//! diagnostics arrive. The machine-readable formats need the whole run, so
//! they are written from recorded diagnostics once analysis is done.

pub mod json;
pub mod sarif;

use std::io::Write;

use clap::ValueEnum;

use super::Diagnostic;

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<position>: <message> (<rule>)` line per diagnostic.
    #[default]
    Human,
    /// A JSON document with diagnostics and a summary.
    Json,
    /// SARIF 2.1.0.
    Sarif,
}

/// Trait for formatting recorded diagnostics.
pub trait LintFormatter {
    /// Format diagnostics to the given writer.
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W)
        -> std::io::Result<()>;
}

pub use json::JsonFormatter;
pub use sarif::SarifFormatter;

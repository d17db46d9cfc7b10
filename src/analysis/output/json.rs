//! JSON output formatter.
//!
//! Formats diagnostics as machine-readable JSON for tooling integration.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use super::LintFormatter;
use crate::analysis::Diagnostic;

/// Formats diagnostics as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Packages analyzed, reported in the summary.
    pub units: usize,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule: &'a str,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    total: usize,
    units: usize,
    by_rule: BTreeMap<&'a str, usize>,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new(units: usize) -> Self {
        Self { units }
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| JsonDiagnostic {
                rule: &d.rule,
                message: &d.message,
                file: d.position.filename.display().to_string(),
                line: d.position.line,
                column: d.position.column,
            })
            .collect();

        let mut by_rule = BTreeMap::new();
        for d in diagnostics {
            *by_rule.entry(d.rule.as_str()).or_insert(0) += 1;
        }

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary: JsonSummary {
                total: diagnostics.len(),
                units: self.units,
                by_rule,
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

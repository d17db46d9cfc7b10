//! Helpers for rule tests.

use std::path::Path;

use crate::analysis::{Diagnostic, Pass, RecordingReporter, Rule};
use crate::loader::CompilationUnit;
use crate::syntax::{FileSet, GoParser};

/// Parse `files` as one unit.
pub fn unit(files: &[(&str, &str)]) -> CompilationUnit {
    let mut parser = GoParser::new().unwrap();
    let mut fset = FileSet::new();
    let parsed = files
        .iter()
        .map(|(name, src)| parser.parse_file(&mut fset, Path::new(name), src).unwrap())
        .collect();
    CompilationUnit::new("example.com/a", parsed, fset)
}

/// Run `rule` over a single file named `a.go`.
pub fn check(rule: &dyn Rule, source: &str) -> Vec<Diagnostic> {
    check_unit(rule, &unit(&[("a.go", source)]))
}

/// Run `rule` over every file of `unit`.
pub fn check_unit(rule: &dyn Rule, unit: &CompilationUnit) -> Vec<Diagnostic> {
    let recorder = RecordingReporter::new();
    let pass = Pass::new(rule.name(), unit, unit.files().iter().collect(), &recorder);
    rule.run(&pass).unwrap();
    recorder.into_diagnostics()
}

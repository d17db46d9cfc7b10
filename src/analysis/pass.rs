//! Per-invocation rule context.

use super::diagnostic::Diagnostic;
use super::message::Message;
use super::reporter::Reporter;
use crate::loader::{CompilationUnit, TypeInfo};
use crate::syntax::{File, FileSet, Pos};

/// Everything one rule invocation may look at for one unit.
///
/// A pass only hands out shared borrows, so rules cannot alter the unit.
pub struct Pass<'a> {
    rule: &'static str,
    unit: &'a CompilationUnit,
    files: Vec<&'a File>,
    reporter: &'a dyn Reporter,
}

impl<'a> Pass<'a> {
    /// Create a pass for `rule` over the given files of `unit`.
    pub fn new(
        rule: &'static str,
        unit: &'a CompilationUnit,
        files: Vec<&'a File>,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            rule,
            unit,
            files,
            reporter,
        }
    }

    /// Files to analyze. Generated files are already excluded.
    pub fn files(&self) -> &[&'a File] {
        &self.files
    }

    /// Name bindings of the unit.
    pub fn types(&self) -> &'a TypeInfo {
        self.unit.types()
    }

    /// Position resolver of the unit.
    pub fn fset(&self) -> &'a FileSet {
        self.unit.fset()
    }

    /// Report `message` at `pos`.
    pub fn report(&self, pos: Pos, message: Message) {
        let position = self.fset().position(pos);
        self.reporter
            .report(Diagnostic::new(position, message.text(), self.rule));
    }
}

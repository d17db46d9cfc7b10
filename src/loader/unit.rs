//! Compilation units.

use super::types::TypeInfo;
use crate::syntax::{File, FileSet};

/// One Go package: its parsed files, their positions and name bindings.
///
/// Units are read-only once loaded.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    id: String,
    files: Vec<File>,
    fset: FileSet,
    types: TypeInfo,
}

impl CompilationUnit {
    /// Assemble a unit from files parsed into `fset`.
    pub fn new(id: impl Into<String>, files: Vec<File>, fset: FileSet) -> Self {
        let package = files
            .first()
            .map(|f| f.package.clone())
            .unwrap_or_default();
        let types = TypeInfo::from_files(package, &files);
        Self {
            id: id.into(),
            files,
            fset,
            types,
        }
    }

    /// Import path (or directory-relative path outside a module).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Package name from the package clause.
    pub fn package_name(&self) -> &str {
        self.types.package_name()
    }

    /// Parsed files in file name order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Position resolver for the unit's files.
    pub fn fset(&self) -> &FileSet {
        &self.fset
    }

    /// Name bindings of the unit.
    pub fn types(&self) -> &TypeInfo {
        &self.types
    }
}

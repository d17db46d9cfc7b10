//! Resolved package-level type information.
//!
//! Full type checking is out of scope; what the rules need is to know which
//! imported package an identifier refers to. [`TypeInfo`] records, per file,
//! the local names bound by import declarations.

use std::collections::HashMap;

use crate::syntax::{File, FileId, ImportSpec};

/// Name bindings of a compilation unit.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    package: String,
    imports: HashMap<FileId, HashMap<String, String>>,
}

impl TypeInfo {
    /// Collect import bindings from the files of a package.
    pub fn from_files(package: impl Into<String>, files: &[File]) -> Self {
        let imports = files
            .iter()
            .map(|file| {
                let bindings = file
                    .imports
                    .iter()
                    .filter_map(|spec| {
                        local_name(spec).map(|name| (name.to_string(), spec.path.clone()))
                    })
                    .collect();
                (file.id, bindings)
            })
            .collect();

        Self {
            package: package.into(),
            imports,
        }
    }

    /// Package name shared by the unit's files.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// Import path of the package `ident` refers to in `file`, if it names one.
    pub fn resolve_package(&self, file: FileId, ident: &str) -> Option<&str> {
        self.imports
            .get(&file)
            .and_then(|bindings| bindings.get(ident))
            .map(String::as_str)
    }
}

/// Name an import binds in file scope. Blank and dot imports bind none.
pub fn local_name(spec: &ImportSpec) -> Option<&str> {
    match spec.name.as_deref() {
        Some("_") | Some(".") => None,
        Some(name) => Some(name),
        None => Some(default_package_name(&spec.path)),
    }
}

/// Conventional package name of an import path: its last element, skipping
/// a major version suffix (`/v2`) and a gopkg.in style `.vN` suffix.
pub fn default_package_name(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    let last = if is_major_version(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    };

    match last.rsplit_once(".v") {
        Some((name, version)) if !name.is_empty() && version.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

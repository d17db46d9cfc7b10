//! Package loading.
//!
//! The [`Loader`] resolves a package pattern into [`CompilationUnit`]s:
//! it expands the pattern into package directories, parses every Go file
//! that builds for the host platform, groups files by package clause and
//! collects their name bindings.
//!
//! Loading is all-or-nothing: a missing directory, an unreadable file or a
//! syntax error anywhere fails the whole load.
//!
//! # Example
//!
//! ```
//! use gopolicy::loader::Loader;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("go.mod"), "module example.com/demo\n").unwrap();
//! fs::write(temp.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
//!
//! let units = Loader::new(temp.path()).load("./...").unwrap();
//! assert_eq!(units.len(), 1);
//! assert_eq!(units[0].id(), "example.com/demo");
//! ```

pub mod constraint;
pub mod pattern;
pub mod types;
pub mod unit;

pub use constraint::BuildContext;
pub use pattern::Pattern;
pub use types::TypeInfo;
pub use unit::CompilationUnit;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{PolicyError, Result};
use crate::syntax::{File, FileSet, GoParser};

/// Options controlling which files are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Include `_test.go` files.
    pub include_tests: bool,
    /// Extra directory names skipped when expanding `...`.
    pub exclude: Vec<String>,
    /// Build tags satisfied in addition to the host platform's.
    pub build_tags: Vec<String>,
}

/// Loads Go packages below a project root.
#[derive(Debug, Clone)]
pub struct Loader {
    root: PathBuf,
    options: LoadOptions,
}

impl Loader {
    /// Create a loader for the given project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: LoadOptions::default(),
        }
    }

    /// Set load options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the project root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `pattern` into compilation units.
    ///
    /// # Errors
    ///
    /// Returns `PatternNotFound` if the pattern's directory does not exist,
    /// `ParseFailed` for the first file with a syntax error, and `Io` for
    /// unreadable directories or files.
    pub fn load(&self, pattern: &str) -> Result<Vec<CompilationUnit>> {
        let parsed = Pattern::parse(pattern);
        let base = parsed.base(&self.root);
        if !base.is_dir() {
            return Err(PolicyError::PatternNotFound {
                pattern: pattern.to_string(),
                path: base,
            });
        }

        let module = find_module(&self.root);
        let build = BuildContext::host().with_tags(self.options.build_tags.clone());
        let mut parser = GoParser::new()?;
        let mut units = Vec::new();

        for dir in self.package_dirs(&base, parsed.recursive)? {
            units.extend(self.load_dir(&mut parser, &build, &dir, module.as_ref())?);
        }

        if units.is_empty() {
            warn!("pattern '{}' matched no packages", pattern);
        }
        Ok(units)
    }

    fn package_dirs(&self, base: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if !recursive {
            return Ok(vec![base.to_path_buf()]);
        }

        let exclude = &self.options.exclude;
        let walker = WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !pattern::is_ignored_dir(&entry.file_name().to_string_lossy(), exclude)
            });

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| PolicyError::Io(e.into()))?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    fn go_files(&self, build: &BuildContext, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type()?.is_file()
                || !name.ends_with(".go")
                || name.starts_with('.')
                || name.starts_with('_')
            {
                continue;
            }
            if name.ends_with("_test.go") && !self.options.include_tests {
                continue;
            }
            if !build.matches_file_name(&name) {
                debug!(file = %name, "excluded by file name constraint");
                continue;
            }
            files.push(entry.path());
        }
        files.sort();
        Ok(files)
    }

    fn load_dir(
        &self,
        parser: &mut GoParser,
        build: &BuildContext,
        dir: &Path,
        module: Option<&Module>,
    ) -> Result<Vec<CompilationUnit>> {
        let paths = self.go_files(build, dir)?;
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let mut fset = FileSet::new();
        let mut by_package: BTreeMap<String, Vec<File>> = BTreeMap::new();
        for path in &paths {
            let source = fs::read_to_string(path)?;
            let display = self.display_path(path);
            if !build.matches_header(&display, &source)? {
                let shown = display.display();
                debug!(file = %shown, "excluded by build constraint");
                continue;
            }
            let file = parser.parse_file(&mut fset, &display, &source)?;
            by_package.entry(file.package.clone()).or_default().push(file);
        }

        let base_id = unit_id(module, dir, &self.root);
        let units: Vec<_> = by_package
            .into_iter()
            .enumerate()
            .map(|(index, (package, files))| {
                let id = if package.ends_with("_test") {
                    format!("{base_id}_test")
                } else if index > 0 {
                    format!("{base_id} ({package})")
                } else {
                    base_id.clone()
                };
                debug!(unit = %id, package = %package, files = files.len(), "loaded package");
                CompilationUnit::new(id, files, fset.clone())
            })
            .collect();

        Ok(units)
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// The Go module enclosing the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Module {
    root: PathBuf,
    path: String,
}

fn find_module(start: &Path) -> Option<Module> {
    start.ancestors().find_map(|dir| {
        let content = fs::read_to_string(dir.join("go.mod")).ok()?;
        let path = parse_module_path(&content)?;
        Some(Module {
            root: dir.to_path_buf(),
            path,
        })
    })
}

/// Extract the module path from go.mod contents.
fn parse_module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.split("//").next()?.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

fn unit_id(module: Option<&Module>, dir: &Path, root: &Path) -> String {
    if let Some(module) = module {
        if let Ok(rel) = dir.strip_prefix(&module.root) {
            let rel = slash_path(rel);
            return if rel.is_empty() {
                module.path.clone()
            } else {
                format!("{}/{}", module.path, rel)
            };
        }
    }

    match dir.strip_prefix(root).map(slash_path) {
        Ok(rel) if !rel.is_empty() => format!("./{rel}"),
        Ok(_) => ".".to_string(),
        Err(_) => slash_path(dir),
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

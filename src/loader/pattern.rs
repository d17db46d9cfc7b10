//! Package patterns.
//!
//! Supports the directory forms of the go tool's patterns: `.`, `./dir`,
//! and the recursive `./...` / `./dir/...`.

use std::path::{Component, Path, PathBuf};

/// A parsed package pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Directory the pattern starts at, relative to the project root unless absolute.
    pub dir: PathBuf,
    /// Whether packages in subdirectories match too.
    pub recursive: bool,
}

impl Pattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Self {
        let trimmed = pattern.trim();
        let (dir, recursive) = match trimmed.strip_suffix("...") {
            Some(prefix) => (prefix.trim_end_matches('/'), true),
            None => (trimmed.trim_end_matches('/'), false),
        };
        let dir = if dir.is_empty() { "." } else { dir };

        Self {
            dir: PathBuf::from(dir),
            recursive,
        }
    }

    /// Base directory of the pattern under `root`.
    pub fn base(&self, root: &Path) -> PathBuf {
        if self.dir.is_absolute() {
            return self.dir.clone();
        }
        let relative: PathBuf = self
            .dir
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if relative.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        }
    }
}

/// Directories the go tool never descends into when expanding `...`.
pub fn is_ignored_dir(name: &str, extra: &[String]) -> bool {
    name.starts_with('.')
        || name.starts_with('_')
        || name == "testdata"
        || name == "vendor"
        || extra.iter().any(|e| e == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recursive_root() {
        let p = Pattern::parse("./...");
        assert_eq!(p.dir, PathBuf::from("."));
        assert!(p.recursive);
    }

    #[test]
    fn parses_bare_ellipsis() {
        let p = Pattern::parse("...");
        assert_eq!(p.dir, PathBuf::from("."));
        assert!(p.recursive);
    }

    #[test]
    fn parses_single_directory() {
        let p = Pattern::parse("./cmd");
        assert_eq!(p.dir, PathBuf::from("./cmd"));
        assert!(!p.recursive);
    }

    #[test]
    fn parses_recursive_subdirectory() {
        let p = Pattern::parse("./pkg/...");
        assert_eq!(p.dir, PathBuf::from("./pkg"));
        assert!(p.recursive);
    }

    #[test]
    fn base_joins_relative_patterns() {
        let p = Pattern::parse("./pkg/...");
        assert_eq!(p.base(Path::new("/repo")), PathBuf::from("/repo/pkg"));
    }

    #[test]
    fn base_of_current_directory_is_root() {
        let p = Pattern::parse("./...");
        assert_eq!(p.base(Path::new("/repo")), PathBuf::from("/repo"));
    }

    #[test]
    fn ignores_hidden_underscore_testdata_and_vendor() {
        assert!(is_ignored_dir(".git", &[]));
        assert!(is_ignored_dir("_scratch", &[]));
        assert!(is_ignored_dir("testdata", &[]));
        assert!(is_ignored_dir("vendor", &[]));
        assert!(!is_ignored_dir("cmd", &[]));
        assert!(is_ignored_dir("gen", &["gen".to_string()]));
    }
}

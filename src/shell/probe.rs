//! Locating external tools on PATH.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PolicyError, Result};

/// Check whether a file has any execute permission bit set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    path_entries.iter().find_map(|dir| {
        candidates(tool)
            .into_iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file() && is_executable(candidate))
    })
}

#[cfg(windows)]
fn candidates(tool: &str) -> Vec<String> {
    vec![format!("{tool}.exe"), tool.to_string()]
}

#[cfg(not(windows))]
fn candidates(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// Parse the system PATH into directory entries.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve `tool`, failing with a descriptive error when it is missing.
///
/// A tool given as a path is used as is. Nothing is ever installed.
pub fn require_tool(tool: &str) -> Result<PathBuf> {
    let given = Path::new(tool);
    if given.components().count() > 1 {
        if given.is_file() && is_executable(given) {
            return Ok(given.to_path_buf());
        }
    } else if let Some(path) = resolve_tool_path(tool, &parse_system_path()) {
        debug!("Resolved {} to {}", tool, path.display());
        return Ok(path);
    }

    Err(PolicyError::ToolMissing {
        tool: tool.to_string(),
        hint: install_hint(tool),
    })
}

fn install_hint(tool: &str) -> String {
    match tool {
        "golangci-lint" => "install it from https://golangci-lint.run/welcome/install/ \
                            or disable the check with --no-vet"
            .to_string(),
        _ => "install it or disable the check with --no-vet".to_string(),
    }
}

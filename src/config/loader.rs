//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::PolicyConfig;
use crate::error::{PolicyError, Result};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".gopolicy.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `go.mod` (the module root)
/// 2. `.git` (fallback)
///
/// # Returns
///
/// The path to the project root, or None if not found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let by_marker = |marker: &str| {
        start
            .ancestors()
            .find(|dir| dir.join(marker).exists())
            .map(Path::to_path_buf)
    };
    by_marker("go.mod").or_else(|| by_marker(".git"))
}

/// Load a single config file and parse it into PolicyConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PolicyConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PolicyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PolicyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into PolicyConfig.
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PolicyConfig> {
    if content.trim().is_empty() {
        return Ok(PolicyConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PolicyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the configuration for a project.
///
/// An explicit path must exist. Without one, `.gopolicy.yml` in the
/// project root is used if present, otherwise defaults apply.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<PolicyConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    let path = project_root.join(CONFIG_FILE);
    if path.is_file() {
        debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(PolicyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_module_root_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod"), "module x\n").unwrap();
        let nested = temp.path().join("pkg").join("deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn prefers_go_mod_over_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let module = temp.path().join("service");
        fs::create_dir(&module).unwrap();
        fs::write(module.join("go.mod"), "module x\n").unwrap();

        assert_eq!(find_project_root(&module), Some(module.clone()));
    }

    #[test]
    fn falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        assert_eq!(
            find_project_root(temp.path()),
            Some(temp.path().to_path_buf())
        );
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn loads_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "jobs: 2\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.jobs, 2);
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, PolicyError::ConfigNotFound { .. }));
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("  \n", Path::new("x.yml")).unwrap();
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let err = parse_config("jobs: [", Path::new("x.yml")).unwrap_err();
        match err {
            PolicyError::ConfigParseError { path, .. } => assert_eq!(path, Path::new("x.yml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Configuration schema for `.gopolicy.yml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Every field is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Rule selection.
    pub rules: RulesConfig,

    /// Include `_test.go` files.
    #[serde(skip_serializing_if = "is_false")]
    pub include_tests: bool,

    /// Worker threads for analysis (0 = one per CPU).
    #[serde(skip_serializing_if = "is_zero")]
    pub jobs: usize,

    /// Extra directory names skipped when expanding `./...`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Build tags satisfied in addition to the host platform's.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub build_tags: Vec<String>,

    /// External verification tool run before the rules.
    pub vet: VetConfig,
}

/// Rule selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Names of rules not to run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disable: Vec<String>,
}

/// External verification tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VetConfig {
    /// Whether to run the tool at all.
    pub enabled: bool,

    /// Executable, looked up on PATH.
    pub command: String,

    /// Arguments passed to the executable.
    pub args: Vec<String>,

    /// Timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl VetConfig {
    /// Timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl Default for VetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "golangci-lint".to_string(),
            args: vec!["run".to_string(), "./...".to_string()],
            timeout: None,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

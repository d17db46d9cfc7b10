//! Configuration loading and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use gopolicy::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".gopolicy.yml"), "include_tests: true\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.include_tests);
//! assert!(config.vet.enabled);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_project_root, load_config, load_config_file, parse_config, CONFIG_FILE};
pub use schema::{PolicyConfig, RulesConfig, VetConfig};

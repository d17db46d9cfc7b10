//! gopolicy - Pluggable policy analysis for Go packages.
//!
//! gopolicy loads Go packages, runs a set of policy rules over their syntax
//! trees and reports every violation as a positioned diagnostic. The CLI runs
//! an external verification tool first and fails if either step finds
//! problems.
//!
//! # Modules
//!
//! - [`analysis`] - Rules, passes, reporters and the engine
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.gopolicy.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`loader`] - Package patterns and compilation units
//! - [`shell`] - External tool lookup and execution
//! - [`syntax`] - Go parsing, positions and doc comments
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use gopolicy::analysis::{list_rules, RuleRegistry};
//!
//! let names: Vec<_> = list_rules(&RuleRegistry::with_builtins())
//!     .into_iter()
//!     .map(|info| info.name)
//!     .collect();
//! assert_eq!(names, ["pkgerrors", "nocomments"]);
//! ```
//!
//! For running rules over a source tree, see [`analysis::run_rules`].

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod shell;
pub mod syntax;
pub mod ui;

pub use error::{PolicyError, Result};

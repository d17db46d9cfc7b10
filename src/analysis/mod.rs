//! Policy analysis of Go packages.
//!
//! This module provides a pluggable, rule-based analysis engine.
//!
//! # Overview
//!
//! The analysis system consists of:
//!
//! - **Rules** - Individual policy checks ([`Rule`] trait)
//! - **Messages** - Fixed violation texts owned by a rule ([`Message`])
//! - **Passes** - What a rule sees of one package ([`Pass`])
//! - **Reporters** - Where diagnostics go ([`Reporter`])
//! - **Engine** - Runs rules over loaded packages ([`Engine`], [`run_rules`])
//!
//! # Example
//!
//! ```
//! use gopolicy::analysis::{RecordingReporter, RuleRegistry, RunOptions, run_rules};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("go.mod"), "module example.com/demo\n").unwrap();
//! fs::write(temp.path().join("a.go"), "package demo\n\nimport \"errors\"\n").unwrap();
//!
//! let rules = RuleRegistry::with_builtins();
//! let reporter = RecordingReporter::new();
//! let summary = run_rules(temp.path(), "./...", &rules, &RunOptions::default(), &reporter).unwrap();
//!
//! assert_eq!(summary.diagnostics, 1);
//! assert_eq!(reporter.diagnostics()[0].rule, "pkgerrors");
//! ```

pub mod diagnostic;
pub mod engine;
pub mod generated;
pub mod message;
pub mod output;
pub mod pass;
pub mod registry;
pub mod reporter;
pub mod rule;
pub mod rules;

pub use diagnostic::Diagnostic;
pub use engine::{run_rules, Engine, RunOptions, RunSummary};
pub use generated::is_generated;
pub use message::Message;
pub use output::{JsonFormatter, LintFormatter, OutputFormat, SarifFormatter};
pub use pass::Pass;
pub use registry::RuleRegistry;
pub use reporter::{CountingReporter, HumanReporter, RecordingReporter, Reporter};
pub use rule::{Rule, RuleInfo};
pub use rules::{NoCommentsRule, PkgErrorsRule, MSG_NO_COMMENTS, MSG_PKG_ERRORS, NOTE_PREFIXES};

/// Describe every rule of `rules`, in order. Loads nothing.
pub fn list_rules(rules: &RuleRegistry) -> Vec<RuleInfo> {
    rules.list()
}

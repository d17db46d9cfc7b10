//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running without a subcommand is
//! the same as `gopolicy lint`.

pub mod dispatcher;
pub mod lint;
pub mod rules;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_ERROR, EXIT_VIOLATIONS};
pub use lint::LintCommand;
pub use rules::{render_rule_list, RulesCommand};

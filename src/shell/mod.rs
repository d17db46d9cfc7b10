//! External tool lookup and execution.

pub mod command;
pub mod probe;

pub use command::{run_tool, CommandOptions, CommandResult};
pub use probe::{is_executable, parse_system_path, require_tool, resolve_tool_path};

//! Running external tools.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{PolicyError, Result};

/// How often a running tool is polled for exit when a timeout is set.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of running an external tool.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the tool was killed for exceeding its timeout.
    pub timed_out: bool,

    /// Whether the tool succeeded (exit code 0).
    pub success: bool,
}

/// Options for running a tool.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Timeout (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Run `program` with `args`, output going straight to the terminal.
///
/// # Errors
///
/// Returns `CommandFailed` if the process cannot be started.
pub fn run_tool(program: &Path, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    debug!("Running {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|_| PolicyError::CommandFailed {
        command: command_line.clone(),
        code: None,
    })?;

    let status = match options.timeout {
        None => Some(child.wait()?),
        Some(limit) => loop {
            if let Some(status) = child.try_wait()? {
                break Some(status);
            }
            if start.elapsed() >= limit {
                warn!("{} timed out after {:?}", command_line, limit);
                child.kill()?;
                child.wait()?;
                break None;
            }
            thread::sleep(POLL_INTERVAL);
        },
    };

    let duration = start.elapsed();
    let exit_code = status.and_then(|s| s.code());
    let success = status.is_some_and(|s| s.success());
    debug!(?exit_code, ?duration, "{} finished", command_line);

    Ok(CommandResult {
        exit_code,
        duration,
        timed_out: status.is_none(),
        success,
    })
}

fn display_command(program: &Path, args: &[String]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

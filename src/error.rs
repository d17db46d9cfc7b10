//! Error types for gopolicy operations.
//!
//! This module defines [`PolicyError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PolicyError` for failures that abort a run (load, config, tooling)
//! - Policy violations are never errors; they are counted diagnostics
//! - Rules return `anyhow::Result` and their failures are isolated by the engine

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gopolicy operations.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A package pattern points at a directory that does not exist.
    #[error("Pattern '{pattern}' does not match a directory: {path}")]
    PatternNotFound { pattern: String, path: PathBuf },

    /// A Go source file could not be parsed.
    #[error("{}:{line}:{column}: syntax error: {message}", path.display())]
    ParseFailed {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The Go grammar could not be loaded into the parser.
    #[error("Failed to load Go grammar: {message}")]
    Language { message: String },

    /// A required external tool is not available on PATH.
    #[error("Required tool '{tool}' not found on PATH: {hint}")]
    ToolMissing { tool: String, hint: String },

    /// External command could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gopolicy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;

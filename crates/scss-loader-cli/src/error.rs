//! CLI error type.
//!
//! Library config errors keep their diagnostic codes and help text when
//! rendered by miette at the top level.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Config discovery, parsing or option building failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] scss_loader::ConfigError),

    /// The Tailwind config path could not be resolved for a file
    #[error(transparent)]
    #[diagnostic(code(scss_loader_cli::resolve))]
    Resolve(#[from] anyhow::Error),

    #[error("config file has no parent directory: {}", .0.display())]
    #[diagnostic(code(scss_loader_cli::config_path))]
    ConfigPath(PathBuf),

    #[error("JSON error: {0}")]
    #[diagnostic(code(scss_loader_cli::json))]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(code(scss_loader_cli::io))]
    Io(#[from] std::io::Error),
}

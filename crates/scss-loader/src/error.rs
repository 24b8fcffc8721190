//! Error types for rule configuration and config file loading.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building loader options.
///
/// Failures of the Tailwind config path callback are not represented here.
/// They are returned unchanged from [`crate::PostcssOptionsResolver::resolve`].
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// No `scss-loader.toml` and no `scssLoader` field in `package.json`
    #[error("no scss-loader config found in {}", .0.display())]
    #[diagnostic(
        code(scss_loader::config::not_found),
        help("Create scss-loader.toml or add a \"scssLoader\" field to package.json")
    )]
    NotFound(PathBuf),

    /// The rule pattern failed to compile
    #[error("invalid pattern `{pattern}`: {source}")]
    #[diagnostic(
        code(scss_loader::config::invalid_pattern),
        help("Patterns use Rust regex syntax, e.g. \"\\\\.scss$\"")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A config value could not be parsed or has the wrong type
    #[error("invalid config value for `{field}`")]
    #[diagnostic(code(scss_loader::config::invalid_value))]
    InvalidValue {
        field: String,
        #[help]
        hint: Option<String>,
    },

    /// Walking an import directory base failed
    #[error("failed to read directory {}: {source}", .path.display())]
    #[diagnostic(code(scss_loader::dirs::read_failed))]
    DirRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("I/O error: {0}")]
    #[diagnostic(code(scss_loader::io))]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }
}

//! Command-line front end for `scss-loader`.
//!
//! Loads `scss-loader.toml` (or the `scssLoader` field of `package.json`) and
//! prints the resulting module rule, per-file PostCSS options, or import
//! directories as JSON.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

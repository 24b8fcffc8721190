//! Command-line interface definition.
//!
//! - `scss-loader rule` - Print the module rule as JSON
//! - `scss-loader resolve <PATH>` - Print the PostCSS options for one file
//! - `scss-loader dirs <BASE>` - List import directories under a base path

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect SCSS module rules built from scss-loader.toml
#[derive(Parser, Debug)]
#[command(name = "scss-loader", version, about = "Inspect SCSS module rules and PostCSS options")]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to load instead of discovering one
    ///
    /// Relative paths in the config resolve against the file's directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project directory used for config discovery
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the module rule as JSON
    Rule(RuleArgs),

    /// Print the PostCSS options computed for a resource path
    ///
    /// Prints `{}` when the path does not match the rule pattern.
    Resolve(ResolveArgs),

    /// List sub-directories usable as import paths
    Dirs(DirsArgs),
}

#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Force development mode (style-loader)
    #[arg(long, conflicts_with = "prod")]
    pub dev: bool,

    /// Force production mode (CSS extraction)
    #[arg(long)]
    pub prod: bool,
}

impl RuleArgs {
    /// Mode override requested on the command line, if any
    pub fn dev_override(&self) -> Option<bool> {
        match (self.dev, self.prod) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Absolute path of the file being transformed
    #[arg(value_name = "RESOURCE_PATH")]
    pub resource_path: String,
}

#[derive(Args, Debug)]
pub struct DirsArgs {
    /// Directory whose children are listed
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Only keep directories whose name matches this pattern
    #[arg(short, long)]
    pub pattern: Option<String>,
}

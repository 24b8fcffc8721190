//! Subcommand implementations.
//!
//! Each command writes its JSON result to the given writer so tests can
//! capture output without spawning a process.

use scss_loader::{
    resolve_dirs, ConfigDiscovery, LoaderConfig, LoaderContext, Pattern, ScssLoader,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::{Cli, Command, DirsArgs, ResolveArgs, RuleArgs};
use crate::error::{CliError, Result};

/// Run the parsed command line
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Rule(args) => rule_execute(cli, args, out),
        Command::Resolve(args) => resolve_execute(cli, args, out),
        Command::Dirs(args) => dirs_execute(cli, args, out),
    }
}

/// Locate and load config, returning it with the root relative paths resolve against
fn load_config(cli: &Cli) -> Result<(LoaderConfig, PathBuf)> {
    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    match &cli.config {
        Some(path) => {
            let path = cwd.join(path);
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| CliError::ConfigPath(path.clone()))?;
            let config = ConfigDiscovery::new(&root).load_from(&path)?;
            Ok((config, root))
        }
        None => {
            let config = ConfigDiscovery::new(&cwd).load()?;
            Ok((config, cwd))
        }
    }
}

fn loader(cli: &Cli, dev_override: Option<bool>) -> Result<ScssLoader> {
    let (mut config, root) = load_config(cli)?;
    if let Some(dev) = dev_override {
        debug!("Overriding dev = {} from the command line", dev);
        config.dev = dev;
    }
    Ok(ScssLoader::new(config.into_options(&root)?))
}

pub fn rule_execute(cli: &Cli, args: &RuleArgs, out: &mut impl Write) -> Result<()> {
    let rule = loader(cli, args.dev_override())?.rule();
    info!("Built rule with {} steps", rule.uses.len());

    serde_json::to_writer_pretty(&mut *out, &rule)?;
    writeln!(out)?;
    Ok(())
}

pub fn resolve_execute(cli: &Cli, args: &ResolveArgs, out: &mut impl Write) -> Result<()> {
    let rule = loader(cli, None)?.rule();
    let options = match rule.postcss_resolver() {
        Some(resolver) => resolver.resolve(&LoaderContext::new(&args.resource_path))?,
        None => Default::default(),
    };
    if options.is_empty() {
        info!("{} does not match {}", args.resource_path, rule.test);
    }

    serde_json::to_writer_pretty(&mut *out, &options)?;
    writeln!(out)?;
    Ok(())
}

pub fn dirs_execute(cli: &Cli, args: &DirsArgs, out: &mut impl Write) -> Result<()> {
    let base = match &cli.cwd {
        Some(cwd) => cwd.join(&args.base),
        None => args.base.clone(),
    };
    let pattern = args.pattern.as_deref().map(Pattern::new).transpose()?;
    let dirs: Vec<String> = resolve_dirs(&base, pattern.as_ref())?
        .iter()
        .map(|dir| dir.to_string_lossy().into_owned())
        .collect();

    serde_json::to_writer_pretty(&mut *out, &dirs)?;
    writeln!(out)?;
    Ok(())
}

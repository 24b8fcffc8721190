//! scss-loader CLI entry point.

use clap::Parser;
use miette::Result;
use scss_loader_cli::{cli, commands, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let stdout = std::io::stdout();
    commands::execute(&args, &mut stdout.lock())?;
    Ok(())
}

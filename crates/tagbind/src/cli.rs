use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::Project;
use crate::commands::TagbindCommand;
use crate::exit::Exit;

/// Inspect tag helper catalogs and the bindings they produce.
#[derive(Parser)]
#[command(name = "tagbind")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: TagbindCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<Exit> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    let project = Project::load()?;
    crate::logging::init_tracing(&cli.args.global, project.settings.debug);

    cli.command.execute(&cli.args, &project)
}

//! dirpack CLI - Command-line utility for packing directories into archives
//! and unpacking them again.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli.command, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(command_name(&cli.command), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: &cli::Commands, formatter: &dyn output::OutputFormatter) -> Result<()> {
    match command {
        cli::Commands::Pack(args) => commands::pack::execute(args, formatter),
        cli::Commands::Unpack(args) => commands::unpack::execute(args, formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}

const fn command_name(command: &cli::Commands) -> &'static str {
    match command {
        cli::Commands::Pack(_) => "pack",
        cli::Commands::Unpack(_) => "unpack",
        cli::Commands::Completion { .. } => "completion",
    }
}

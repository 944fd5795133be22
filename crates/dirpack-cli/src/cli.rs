//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a directory into an archive
    #[command(after_help = "Examples:\n  dirpack pack zip 5 ./myfolder ./archive.zip\n  dirpack pack tar.gz ./logs ./logs.tar.gz")]
    Pack(PackArgs),
    /// Unpack an archive into a directory
    #[command(after_help = "Example:\n  dirpack unpack tar.gz ./archive.tar.gz ./extracted")]
    Unpack(UnpackArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct PackArgs {
    /// Archive format (zip, tar.gz, tar)
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// [LEVEL] SOURCE DEST, where LEVEL is a compression level from -1 to 9
    #[arg(
        value_name = "ARGS",
        num_args = 2..=3,
        required = true,
        allow_negative_numbers = true
    )]
    pub operands: Vec<String>,
}

/// Positional operands of `pack` once the optional level is split off.
#[derive(Debug, PartialEq, Eq)]
pub struct PackOperands {
    pub level: Option<String>,
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl PackArgs {
    /// Splits `[LEVEL] SOURCE DEST` into its parts.
    pub fn operands(&self) -> anyhow::Result<PackOperands> {
        Ok(match self.operands.as_slice() {
            [level, source, dest] => PackOperands {
                level: Some(level.clone()),
                source: PathBuf::from(source),
                dest: PathBuf::from(dest),
            },
            [source, dest] => PackOperands {
                level: None,
                source: PathBuf::from(source),
                dest: PathBuf::from(dest),
            },
            other => anyhow::bail!("pack takes 2 or 3 operands, got {}", other.len()),
        })
    }
}

#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Archive format (zip, tar.gz, tar)
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// Path to the archive file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination directory
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,
}

//! Unpack command implementation.

use crate::cli::UnpackArgs;
use crate::error::add_archive_context;
use crate::output::Operation;
use crate::output::OutputFormatter;
use anyhow::Result;
use dirpack_core::new_archiver;

pub fn execute(args: &UnpackArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let archiver = add_archive_context(new_archiver(&args.format), &args.source)?;
    let report = add_archive_context(archiver.unpack(&args.source, &args.dest), &args.source)?;

    let operation = Operation {
        format: &args.format,
        source: &args.source,
        dest: &args.dest,
    };
    formatter.format_unpack_result(&operation, &report)
}

//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::add_archive_context;
use crate::error::add_pack_context;
use crate::error::convert_archive_error;
use crate::output::Operation;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::anyhow;
use dirpack_core::CompressionLevel;
use dirpack_core::new_archiver;
use dirpack_core::set_compression_level;

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let operands = args.operands()?;
    let level = match operands.level.as_deref() {
        Some(raw) => parse_level(raw)?,
        None => CompressionLevel::DEFAULT,
    };

    let mut archiver = add_archive_context(new_archiver(&args.format), &operands.dest)?;

    // Only an ignored level is tolerated here; an invalid one was already
    // rejected above.
    let mut warnings = Vec::new();
    if let Err(err) = set_compression_level(archiver.as_mut(), level.get()) {
        if !err.is_advisory() {
            return Err(convert_archive_error(err, &operands.dest));
        }
        let message = err.to_string();
        formatter.format_warning(&message);
        warnings.push(message);
    }

    let report = add_pack_context(
        archiver.archive(&operands.source, &operands.dest),
        &operands.source,
        &operands.dest,
    )?;

    let operation = Operation {
        format: &args.format,
        source: &operands.source,
        dest: &operands.dest,
    };
    formatter.format_pack_result(&operation, &report, &warnings)
}

/// Parses a textual compression level in `[-1, 9]`.
fn parse_level(raw: &str) -> Result<CompressionLevel> {
    raw.parse::<i32>()
        .ok()
        .and_then(|level| CompressionLevel::new(level).ok())
        .ok_or_else(|| {
            anyhow!(
                "Invalid compression level '{raw}'; must be integer between -1 and 9\n\
                 HINT: Use -1 for the codec default, 0 for no compression, 9 for best compression."
            )
        })
}

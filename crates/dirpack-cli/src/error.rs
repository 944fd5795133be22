//! Error conversion utilities for CLI.
//!
//! Converts dirpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirpack_core::ArchiveError;
use dirpack_core::ArchiveFormat;
use std::path::Path;

/// Converts an `ArchiveError` raised while working on `target`.
pub fn convert_archive_error(err: ArchiveError, target: &Path) -> anyhow::Error {
    match err {
        ArchiveError::IllegalPath { path } => {
            anyhow!(
                "Security violation: Archive '{}' contains an entry escaping the destination: '{}'\n\
                 HINT: This archive may be malicious. Do not unpack from untrusted sources.",
                target.display(),
                path.display()
            )
        }
        ArchiveError::UnsupportedFormat { format } => {
            anyhow!(
                "Unsupported archive format: {format}\n\
                 HINT: Supported formats: {}",
                supported_formats()
            )
        }
        ArchiveError::InvalidCompressionLevel { level } => {
            anyhow!(
                "Invalid compression level {level}; must be integer between -1 and 9\n\
                 HINT: Use -1 for the codec default, 0 for no compression, 9 for best compression."
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, or the format argument may not match the file.",
                target.display(),
                reason
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {}", target.display(), io_err)
        }
        ArchiveError::UnsupportedCapability { .. } => anyhow::Error::from(err),
    }
}

/// Adds context to an archive operation result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    target: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, target))
}

/// Adds context to a pack result, naming both ends of the operation.
///
/// A pack touches two paths, and an I/O failure can come from either: the
/// source walk and reads, or the archive write.
pub fn add_pack_context<T>(
    result: Result<T, ArchiveError>,
    source: &Path,
    dest: &Path,
) -> anyhow::Result<T> {
    result.map_err(|err| match err {
        ArchiveError::Io(io_err) => anyhow!(
            "I/O error while packing '{}' into '{}': {}",
            source.display(),
            dest.display(),
            io_err
        ),
        other => convert_archive_error(other, dest),
    })
}

fn supported_formats() -> String {
    ArchiveFormat::ALL
        .into_iter()
        .map(ArchiveFormat::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

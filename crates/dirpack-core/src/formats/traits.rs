//! Common traits for archive engines.

use std::path::Path;

use crate::CompressionLevel;
use crate::CreationReport;
use crate::ExtractionReport;
use crate::Result;

/// An engine bound to one container format.
///
/// Every engine can pack and unpack. Optional capabilities are exposed
/// through probe methods that default to `None`, so callers never need to
/// know which concrete format they hold.
pub trait Archiver {
    /// Packs every file below `source_dir` into a new archive at `dest_file`.
    ///
    /// `dest_file` is created or truncated. On error a partial archive may
    /// remain on disk.
    ///
    /// # Errors
    ///
    /// Returns the first I/O or walk error encountered.
    fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<CreationReport>;

    /// Extracts `archive_file` into `dest_dir`, creating directories as
    /// needed.
    ///
    /// Entries are processed in stored order. Entries written before a
    /// failure stay on disk.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::IllegalPath` for an entry escaping `dest_dir`,
    /// or the first I/O or container error.
    fn unpack(&self, archive_file: &Path, dest_dir: &Path) -> Result<ExtractionReport>;

    /// Returns the format identifier this engine handles.
    fn format_name(&self) -> &str;

    /// Returns the compression-level capability, if this engine has one.
    fn as_level_setter(&mut self) -> Option<&mut dyn CompressionLevelSetter> {
        None
    }
}

/// Capability of engines whose output can be tuned by compression level.
pub trait CompressionLevelSetter {
    /// Sets the level used by the next `archive` call.
    fn set_compression_level(&mut self, level: CompressionLevel);

    /// Returns the currently configured level.
    fn compression_level(&self) -> CompressionLevel;
}

//! Common extraction utilities shared between archive engines.
//!
//! # Functions
//!
//! - [`create_directory`]: Directory creation with stored mode (idempotent)
//! - [`create_parent_dirs`]: Parent creation for file entries (mode 0755)
//! - [`write_file`]: Buffered file write with stored mode

use std::fs::DirBuilder;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::Result;

/// Mode applied to parent directories created for file entries.
pub const PARENT_DIR_MODE: u32 = 0o755;

/// Mode applied to file entries whose archive stores no mode.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Creates `path` and any missing ancestors with permission bits `mode`.
///
/// Existing directories are left untouched. The process umask applies.
pub fn create_directory(path: &Path, mode: u32) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)?;
    Ok(())
}

/// Creates the missing parent directories of `path` with mode 0755.
pub fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            create_directory(parent, PARENT_DIR_MODE)
        }
        _ => Ok(()),
    }
}

/// Streams `reader` into the file at `path`, created with `mode` if new.
///
/// An existing file is truncated and keeps its permissions. Returns the
/// number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the copy fails.
pub fn write_file<R: Read>(reader: &mut R, path: &Path, mode: u32) -> Result<u64> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let file = options.open(path)?;
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);
    let bytes_written = std::io::copy(reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes_written)
}

//! High-level public API for engine selection and tuning.

use crate::ArchiveError;
use crate::Archiver;
use crate::CompressionLevel;
use crate::Result;
use crate::formats::Registry;

/// Returns a new engine for `format` from the built-in registry.
///
/// # Errors
///
/// Returns `ArchiveError::UnsupportedFormat` naming `format` if it is not one
/// of the built-in identifiers (`zip`, `tar.gz`, `tar`).
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::new_archiver;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archiver = new_archiver("tar.gz")?;
/// let report = archiver.archive(Path::new("./data"), Path::new("data.tar.gz"))?;
/// println!("Packed {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn new_archiver(format: &str) -> Result<Box<dyn Archiver>> {
    Registry::builtin().create(format)
}

/// Applies a compression level to `archiver` if it supports one.
///
/// The level is validated before the capability is probed, so an invalid
/// level is reported even for engines that would ignore it.
///
/// # Errors
///
/// - `ArchiveError::InvalidCompressionLevel` if `level` is outside `[-1, 9]`
/// - `ArchiveError::UnsupportedCapability` if the engine cannot be tuned.
///   This error is advisory: the engine is unchanged and still usable.
///
/// # Examples
///
/// ```
/// use dirpack_core::new_archiver;
/// use dirpack_core::set_compression_level;
///
/// let mut zip = new_archiver("zip")?;
/// set_compression_level(zip.as_mut(), 9)?;
///
/// let mut tar = new_archiver("tar")?;
/// let err = set_compression_level(tar.as_mut(), 9).unwrap_err();
/// assert!(err.is_advisory());
///
/// assert!(!set_compression_level(zip.as_mut(), 10).unwrap_err().is_advisory());
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub fn set_compression_level(archiver: &mut dyn Archiver, level: i32) -> Result<()> {
    let level = CompressionLevel::new(level)?;

    match archiver.as_level_setter() {
        Some(setter) => {
            setter.set_compression_level(level);
            Ok(())
        }
        None => Err(ArchiveError::UnsupportedCapability {
            format: archiver.format_name().to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_archiver_known_formats() {
        assert_eq!(new_archiver("zip").unwrap().format_name(), "zip");
        assert_eq!(new_archiver("tar.gz").unwrap().format_name(), "tar.gz");
        assert_eq!(new_archiver("tar").unwrap().format_name(), "tar");
    }

    #[test]
    fn test_new_archiver_unknown_format() {
        let err = new_archiver("rar").err().unwrap();
        assert!(matches!(err, ArchiveError::UnsupportedFormat { format } if format == "rar"));
    }

    #[test]
    fn test_set_level_applies() {
        let mut archiver = new_archiver("tar.gz").unwrap();
        set_compression_level(archiver.as_mut(), 3).unwrap();
        let level = archiver.as_level_setter().unwrap().compression_level();
        assert_eq!(level.get(), 3);
    }

    #[test]
    fn test_set_level_bounds() {
        let mut archiver = new_archiver("zip").unwrap();
        for level in -1..=9 {
            assert!(set_compression_level(archiver.as_mut(), level).is_ok());
        }
        for level in [-2, 10] {
            let err = set_compression_level(archiver.as_mut(), level).unwrap_err();
            assert!(matches!(err, ArchiveError::InvalidCompressionLevel { level: l } if l == level));
        }
    }

    #[test]
    fn test_invalid_level_wins_over_missing_capability() {
        let mut archiver = new_archiver("tar").unwrap();
        let err = set_compression_level(archiver.as_mut(), 42).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidCompressionLevel { .. }));
    }

    #[test]
    fn test_missing_capability_is_advisory() {
        let mut archiver = new_archiver("tar").unwrap();
        let err = set_compression_level(archiver.as_mut(), 5).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsupportedCapability { ref format } if format == "tar"));
        assert!(err.is_advisory());
    }

    #[test]
    fn test_rejected_level_leaves_previous_setting() {
        let mut archiver = new_archiver("zip").unwrap();
        set_compression_level(archiver.as_mut(), 7).unwrap();
        assert!(set_compression_level(archiver.as_mut(), 10).is_err());
        let level = archiver.as_level_setter().unwrap().compression_level();
        assert_eq!(level.get(), 7);
    }
}

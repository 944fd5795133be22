//! Error types for packing and unpacking operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while packing or unpacking an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container data is malformed or uses an unsupported feature.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Format identifier does not name a registered engine.
    #[error("unsupported archive format: {format}")]
    UnsupportedFormat {
        /// The identifier that was requested.
        format: String,
    },

    /// Compression level outside the accepted `[-1, 9]` range.
    #[error("invalid compression level {level}: must be between -1 and 9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: i32,
    },

    /// The engine cannot honor a compression level; the setting was ignored.
    #[error("{format} archiver does not support compression levels, ignoring")]
    UnsupportedCapability {
        /// Format name of the engine that lacks the capability.
        format: String,
    },

    /// Entry would be extracted outside the destination directory.
    #[error("illegal file path: {path}")]
    IllegalPath {
        /// The offending entry name as stored in the archive.
        path: PathBuf,
    },
}

impl ArchiveError {
    /// Returns `true` if the error only reports an ignored setting.
    ///
    /// Advisory errors leave the engine fully usable; callers typically
    /// print them as warnings and continue.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ArchiveError;
    ///
    /// let err = ArchiveError::UnsupportedCapability {
    ///     format: "tar".into(),
    /// };
    /// assert!(err.is_advisory());
    ///
    /// let err = ArchiveError::InvalidCompressionLevel { level: 10 };
    /// assert!(!err.is_advisory());
    /// ```
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(self, Self::UnsupportedCapability { .. })
    }

    /// Returns `true` if this error represents a path-escape attempt.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::IllegalPath {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::IllegalPath { .. })
    }

    /// Returns `true` for failures of the underlying reads and writes,
    /// including malformed container data.
    #[must_use]
    pub const fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::InvalidArchive(_))
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

//! Archive format identifiers.

use std::fmt;
use std::str::FromStr;

use crate::ArchiveError;

/// Container format understood by the built-in engines.
///
/// `zip` and `tar.gz` are the core pair. [`Tar`](Self::Tar) is an
/// extension on top of them: it is registered under `"tar"` like any other
/// engine, but callers that expect only the core pair should check
/// [`is_extension`](Self::is_extension). It has no compression stage, so
/// setting a level on it is reported as ignored.
///
/// # Examples
///
/// ```
/// use dirpack_core::ArchiveFormat;
///
/// let format: ArchiveFormat = "tar.gz".parse()?;
/// assert_eq!(format, ArchiveFormat::TarGz);
/// assert_eq!(format.as_str(), "tar.gz");
///
/// assert!("rar".parse::<ArchiveFormat>().is_err());
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP container with per-entry deflate.
    Zip,
    /// Gzip-compressed tape archive.
    TarGz,
    /// Uncompressed tape archive.
    ///
    /// Extension format beyond `zip` and `tar.gz`; not tunable.
    Tar,
}

impl ArchiveFormat {
    /// Every built-in format, in registration order.
    pub const ALL: [Self; 3] = [Self::Zip, Self::TarGz, Self::Tar];

    /// Returns `true` for formats registered beyond the `zip`/`tar.gz` pair.
    ///
    /// ```
    /// use dirpack_core::ArchiveFormat;
    ///
    /// assert!(!ArchiveFormat::Zip.is_extension());
    /// assert!(ArchiveFormat::Tar.is_extension());
    /// ```
    #[must_use]
    pub const fn is_extension(self) -> bool {
        matches!(self, Self::Tar)
    }

    /// Returns the identifier used on the command line and in the registry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::Tar => "tar",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ArchiveError::UnsupportedFormat {
                format: s.to_string(),
            })
    }
}

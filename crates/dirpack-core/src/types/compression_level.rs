//! Validated compression level.
//!
//! Levels follow the deflate scale shared by the ZIP and gzip engines:
//!
//! - **-1**: codec default
//! - **0**: no compression
//! - **1**: fastest
//! - **9**: smallest output

use std::fmt;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::ArchiveError;
use crate::Result;

/// Compression level in the range `[-1, 9]`.
///
/// A level is attached to a single engine instance and only affects the
/// next archive it writes. It is never stored in the container.
///
/// # Examples
///
/// ```
/// use dirpack_core::CompressionLevel;
///
/// let level = CompressionLevel::new(5)?;
/// assert_eq!(level.get(), 5);
///
/// assert!(CompressionLevel::new(10).is_err());
/// assert_eq!(CompressionLevel::default(), CompressionLevel::DEFAULT);
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Codec default level.
    pub const DEFAULT: Self = Self(-1);
    /// Store data without compression.
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const BEST_SPEED: Self = Self(1);
    /// Smallest output.
    pub const BEST_COMPRESSION: Self = Self(9);

    /// Lowest accepted raw value.
    pub const MIN: i32 = -1;
    /// Highest accepted raw value.
    pub const MAX: i32 = 9;

    /// Validates `level` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidCompressionLevel` if `level` is outside
    /// `[-1, 9]`.
    pub fn new(level: i32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ArchiveError::InvalidCompressionLevel { level })
        }
    }

    /// Returns the raw level.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns `true` for the codec-default sentinel.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT.0
    }

    /// Converts to a flate2 level for gzip streams.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::CompressionLevel;
    ///
    /// assert_eq!(
    ///     CompressionLevel::DEFAULT.to_flate2(),
    ///     flate2::Compression::default()
    /// );
    /// assert_eq!(
    ///     CompressionLevel::BEST_COMPRESSION.to_flate2(),
    ///     flate2::Compression::best()
    /// );
    /// ```
    #[must_use]
    pub fn to_flate2(self) -> flate2::Compression {
        match u32::try_from(self.0) {
            Ok(n) => flate2::Compression::new(n),
            Err(_) => flate2::Compression::default(),
        }
    }

    /// Builds ZIP entry options for this level.
    ///
    /// Level 0 stores entries; every other level deflates them, with the
    /// default sentinel leaving the level choice to the codec.
    #[must_use]
    pub fn to_zip_options(self) -> SimpleFileOptions {
        match self.0 {
            0 => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            -1 => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(None),
            n => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(n))),
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = ArchiveError;

    fn try_from(level: i32) -> Result<Self> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for i32 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

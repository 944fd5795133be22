//! Format registry mapping identifiers to engine constructors.

use std::collections::BTreeMap;

use super::tar::TarArchiver;
use super::tar::TarGzArchiver;
use super::traits::Archiver;
use super::zip::ZipArchiver;
use crate::ArchiveError;
use crate::ArchiveFormat;
use crate::Result;

/// Constructor producing a fresh engine.
pub type ArchiverConstructor = fn() -> Box<dyn Archiver>;

/// Mapping from format identifier to engine constructor.
///
/// Adding a format is an additive [`register`](Self::register) call; lookup
/// never branches on the format itself.
///
/// # Examples
///
/// ```
/// use dirpack_core::formats::Registry;
///
/// let registry = Registry::builtin();
/// let archiver = registry.create("zip")?;
/// assert_eq!(archiver.format_name(), "zip");
/// assert!(registry.create("rar").is_err());
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    constructors: BTreeMap<String, ArchiverConstructor>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in format.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for format in ArchiveFormat::ALL {
            registry.register(format.as_str(), builtin_constructor(format));
        }
        registry
    }

    /// Registers `constructor` under `format`, replacing any previous entry.
    pub fn register(&mut self, format: impl Into<String>, constructor: ArchiverConstructor) {
        self.constructors.insert(format.into(), constructor);
    }

    /// Builds a new engine for `format`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::UnsupportedFormat` naming `format` if nothing
    /// is registered under it.
    pub fn create(&self, format: &str) -> Result<Box<dyn Archiver>> {
        self.constructors
            .get(format)
            .map(|constructor| constructor())
            .ok_or_else(|| ArchiveError::UnsupportedFormat {
                format: format.to_string(),
            })
    }

    /// Returns `true` if `format` is registered.
    #[must_use]
    pub fn supports(&self, format: &str) -> bool {
        self.constructors.contains_key(format)
    }

    /// Returns the registered identifiers in sorted order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

fn builtin_constructor(format: ArchiveFormat) -> ArchiverConstructor {
    match format {
        ArchiveFormat::Zip => || Box::new(ZipArchiver::new()),
        ArchiveFormat::TarGz => || Box::new(TarGzArchiver::new()),
        ArchiveFormat::Tar => || Box::new(TarArchiver::new()),
    }
}

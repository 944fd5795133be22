//! Directory packing and unpacking behind one pluggable interface.
//!
//! `dirpack-core` turns a directory tree into a single archive file and
//! restores it again. Every container format is an engine implementing
//! [`Archiver`]; engines are looked up by identifier (`zip`, `tar.gz`, `tar`)
//! so callers never branch on the format themselves.
//!
//! Unpacking rejects any entry that would land outside the destination
//! directory with [`ArchiveError::IllegalPath`].
//!
//! # Examples
//!
//! ```no_run
//! use dirpack_core::new_archiver;
//! use dirpack_core::set_compression_level;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut archiver = new_archiver("zip")?;
//! set_compression_level(archiver.as_mut(), 9)?;
//!
//! let created = archiver.archive(Path::new("./project"), Path::new("project.zip"))?;
//! println!("Packed {} files", created.files_added);
//!
//! let extracted = archiver.unpack(Path::new("project.zip"), Path::new("./restored"))?;
//! println!("Unpacked {} files", extracted.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod creation;
pub mod error;
pub mod formats;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::new_archiver;
pub use api::set_compression_level;
pub use creation::CreationReport;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::Archiver;
pub use formats::CompressionLevelSetter;
pub use report::ExtractionReport;

// Re-export types module for easier access
pub use types::ArchiveFormat;
pub use types::CompressionLevel;
pub use types::EntryType;

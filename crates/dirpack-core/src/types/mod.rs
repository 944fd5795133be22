//! Core domain types.

mod compression_level;
mod entry_type;
mod format;

pub use compression_level::CompressionLevel;
pub use entry_type::EntryType;
pub use format::ArchiveFormat;

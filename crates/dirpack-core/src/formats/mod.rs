//! Archive engine implementations.

pub mod common;
pub mod registry;
pub mod tar;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use registry::Registry;
pub use tar::TarArchiver;
pub use tar::TarGzArchiver;
pub use traits::Archiver;
pub use traits::CompressionLevelSetter;
pub use zip::ZipArchiver;

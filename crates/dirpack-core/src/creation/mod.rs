//! Archive creation support shared by the packing engines.

pub mod report;
pub mod walker;

pub use report::CreationReport;
pub use walker::SourceEntry;
pub use walker::SourceWalker;

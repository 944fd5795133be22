//! Extraction safety checks.

pub mod path;

pub use path::clean_path;
pub use path::resolve_entry_path;

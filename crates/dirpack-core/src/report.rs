//! Unpack operation reporting.

use std::time::Duration;

/// Report of an unpack operation.
///
/// Counts only what was actually materialized on disk.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of explicit directory entries materialized.
    ///
    /// Parent directories created implicitly for file entries are not
    /// counted.
    pub directories_created: usize,

    /// Number of entries skipped because their type is not supported
    /// (symlinks, hardlinks, devices).
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the unpack operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries materialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::ExtractionReport;
    ///
    /// let mut report = ExtractionReport::new();
    /// report.files_extracted = 3;
    /// report.directories_created = 1;
    /// report.entries_skipped = 2;
    /// assert_eq!(report.total_items(), 4);
    /// ```
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

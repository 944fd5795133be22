//! Output formatter trait for CLI results.

use anyhow::Result;
use dirpack_core::CreationReport;
use dirpack_core::ExtractionReport;
use serde::Serialize;
use std::path::Path;

/// What a finished command operated on.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    pub format: &'a str,
    pub source: &'a Path,
    pub dest: &'a Path,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format pack result
    fn format_pack_result(
        &self,
        operation: &Operation<'_>,
        report: &CreationReport,
        warnings: &[String],
    ) -> Result<()>;

    /// Format unpack result
    fn format_unpack_result(&self, operation: &Operation<'_>, report: &ExtractionReport)
    -> Result<()>;

    /// Format error message for a failed command
    fn format_error(&self, command: &str, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn warning(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Warning,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

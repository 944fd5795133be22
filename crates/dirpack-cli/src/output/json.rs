//! JSON output formatter for machine-readable results.
//!
//! Results and errors go to stdout as a single document. Warnings are
//! written to stderr so stdout stays parseable; pack results repeat them
//! under `warnings`.

use super::formatter::JsonOutput;
use super::formatter::Operation;
use super::formatter::OutputFormatter;
use anyhow::Result;
use dirpack_core::CreationReport;
use dirpack_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct PackOutput {
    format: String,
    source: String,
    dest: String,
    files_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct UnpackOutput {
    format: String,
    source: String,
    dest: String,
    files_extracted: usize,
    directories_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn pack_output(
        operation: &Operation<'_>,
        report: &CreationReport,
        warnings: &[String],
    ) -> JsonOutput<PackOutput> {
        JsonOutput::success(
            "pack",
            PackOutput {
                format: operation.format.to_string(),
                source: operation.source.display().to_string(),
                dest: operation.dest.display().to_string(),
                files_added: report.files_added,
                bytes_written: report.bytes_written,
                bytes_compressed: report.bytes_compressed,
                compression_ratio: report.compression_ratio(),
                compression_percentage: report.compression_percentage(),
                duration_ms: report.duration.as_millis(),
                warnings: warnings.to_vec(),
            },
        )
    }

    fn unpack_output(operation: &Operation<'_>, report: &ExtractionReport) -> JsonOutput<UnpackOutput> {
        JsonOutput::success(
            "unpack",
            UnpackOutput {
                format: operation.format.to_string(),
                source: operation.source.display().to_string(),
                dest: operation.dest.display().to_string(),
                files_extracted: report.files_extracted,
                directories_created: report.directories_created,
                entries_skipped: report.entries_skipped,
                bytes_written: report.bytes_written,
                duration_ms: report.duration.as_millis(),
            },
        )
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(
        &self,
        operation: &Operation<'_>,
        report: &CreationReport,
        warnings: &[String],
    ) -> Result<()> {
        Self::output(&Self::pack_output(operation, report, warnings))
    }

    fn format_unpack_result(
        &self,
        operation: &Operation<'_>,
        report: &ExtractionReport,
    ) -> Result<()> {
        Self::output(&Self::unpack_output(operation, report))
    }

    fn format_error(&self, command: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(command, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let output = JsonOutput::warning("warning", WarningData { message });
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}

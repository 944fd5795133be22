//! Human-readable output formatter with colors and styling.

use super::formatter::Operation;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use dirpack_core::CreationReport;
use dirpack_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(
        &self,
        operation: &Operation<'_>,
        report: &CreationReport,
        _warnings: &[String],
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        // Warnings were already printed as they happened.
        self.write_headline(&format!(
            "Successfully archived {} to {} using {} format",
            operation.source.display(),
            operation.dest.display(),
            operation.format
        ));

        if !self.verbose {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.bytes_compressed)
        ));
        if report.bytes_written > 0 {
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }
        let _ = self
            .term
            .write_line(&format!("  Duration:         {:?}", report.duration));

        Ok(())
    }

    fn format_unpack_result(
        &self,
        operation: &Operation<'_>,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_headline(&format!(
            "Successfully unpacked {} to {} using {} format",
            operation.source.display(),
            operation.dest.display(),
            operation.format
        ));

        if report.entries_skipped > 0 {
            let _ = self.term.write_line(&format!(
                "  Entries skipped:  {} (unsupported entry types)",
                Self::format_number(report.entries_skipped)
            ));
        }

        if !self.verbose {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "  Files extracted:  {}",
            Self::format_number(report.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self
            .term
            .write_line(&format!("  Duration:         {:?}", report.duration));

        Ok(())
    }

    fn format_error(&self, _command: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

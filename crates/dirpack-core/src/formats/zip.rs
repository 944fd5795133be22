//! ZIP archive engine.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::common::DEFAULT_FILE_MODE;
use super::common::PARENT_DIR_MODE;
use super::common::create_directory;
use super::common::create_parent_dirs;
use super::common::write_file;
use super::traits::Archiver;
use super::traits::CompressionLevelSetter;
use crate::CompressionLevel;
use crate::CreationReport;
use crate::ExtractionReport;
use crate::Result;
use crate::creation::SourceEntry;
use crate::creation::SourceWalker;
use crate::creation::walker::permission_bits;
use crate::security::resolve_entry_path;

/// Entries at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// ZIP archive engine.
///
/// Directories are never written as entries; readers rebuild them from the
/// file names. Compression level defaults to -1 (codec default).
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::Archiver;
/// use dirpack_core::CompressionLevel;
/// use dirpack_core::formats::ZipArchiver;
/// use std::path::Path;
///
/// let archiver = ZipArchiver::with_compression_level(CompressionLevel::BEST_COMPRESSION);
/// let report = archiver.archive(Path::new("./site"), Path::new("site.zip"))?;
/// println!("added {} files", report.files_added);
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZipArchiver {
    level: CompressionLevel,
}

impl ZipArchiver {
    /// Creates a ZIP engine with the default compression level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ZIP engine with an explicit compression level.
    #[must_use]
    pub fn with_compression_level(level: CompressionLevel) -> Self {
        Self { level }
    }
}

impl Archiver for ZipArchiver {
    fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<CreationReport> {
        let start = Instant::now();
        let file = File::create(dest_file)?;
        let mut zip = ZipWriter::new(file);
        let options = self.level.to_zip_options();
        let mut report = CreationReport::default();

        for entry in SourceWalker::new(source_dir).excluding(dest_file).files() {
            add_file_to_zip(&mut zip, &entry?, options, &mut report)?;
        }

        // Writes the central directory; the file is closed on drop.
        let mut file = zip.finish()?;
        file.flush()?;

        report.bytes_compressed = file.metadata()?.len();
        report.duration = start.elapsed();
        Ok(report)
    }

    fn unpack(&self, archive_file: &Path, dest_dir: &Path) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut archive = ZipArchive::new(File::open(archive_file)?)?;
        let mut report = ExtractionReport::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let target = resolve_entry_path(dest_dir, entry.name())?;

            if entry.is_dir() {
                create_directory(&target, entry.unix_mode().unwrap_or(PARENT_DIR_MODE))?;
                report.directories_created += 1;
                continue;
            }

            create_parent_dirs(&target)?;
            let mode = entry.unix_mode().unwrap_or(DEFAULT_FILE_MODE);
            report.bytes_written += write_file(&mut entry, &target, mode)?;
            report.files_extracted += 1;
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    fn format_name(&self) -> &str {
        "zip"
    }

    fn as_level_setter(&mut self) -> Option<&mut dyn CompressionLevelSetter> {
        Some(self)
    }
}

impl CompressionLevelSetter for ZipArchiver {
    fn set_compression_level(&mut self, level: CompressionLevel) {
        self.level = level;
    }

    fn compression_level(&self) -> CompressionLevel {
        self.level
    }
}

/// Adds a single source file to the ZIP archive.
fn add_file_to_zip<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    entry: &SourceEntry,
    options: SimpleFileOptions,
    report: &mut CreationReport,
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let file_options = options
        .unix_permissions(permission_bits(&metadata))
        .large_file(metadata.len() >= ZIP64_THRESHOLD);

    zip.start_file(entry.archive_name.clone(), file_options)?;
    let bytes_written = std::io::copy(&mut file, zip)?;

    report.files_added += 1;
    report.bytes_written += bytes_written;
    Ok(())
}

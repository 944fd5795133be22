//! Tar archive engines: gzip-compressed and plain.

use std::fs::File;
use std::fs::Metadata;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use tar::Builder;
use tar::Header;

use super::common::create_directory;
use super::common::create_parent_dirs;
use super::common::write_file;
use super::traits::Archiver;
use super::traits::CompressionLevelSetter;
use crate::CompressionLevel;
use crate::CreationReport;
use crate::ExtractionReport;
use crate::Result;
use crate::creation::SourceWalker;
use crate::creation::walker::permission_bits;
use crate::security::resolve_entry_path;
use crate::types::EntryType;

/// Gzip-compressed tar engine (`tar.gz`).
///
/// Layers are stacked file → gzip encoder → tar builder when packing and
/// file → gzip decoder → tar reader when unpacking. Compression level
/// defaults to -1 (codec default).
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::Archiver;
/// use dirpack_core::formats::TarGzArchiver;
/// use std::path::Path;
///
/// let archiver = TarGzArchiver::new();
/// archiver.archive(Path::new("./logs"), Path::new("logs.tar.gz"))?;
/// archiver.unpack(Path::new("logs.tar.gz"), Path::new("./restored"))?;
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TarGzArchiver {
    level: CompressionLevel,
}

impl TarGzArchiver {
    /// Creates a tar.gz engine with the default compression level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tar.gz engine with an explicit compression level.
    #[must_use]
    pub fn with_compression_level(level: CompressionLevel) -> Self {
        Self { level }
    }
}

impl Archiver for TarGzArchiver {
    fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<CreationReport> {
        let start = Instant::now();
        let file = File::create(dest_file)?;
        let encoder = GzEncoder::new(file, self.level.to_flate2());
        let mut builder = Builder::new(encoder);

        let mut report = append_source_tree(&mut builder, source_dir, dest_file)?;

        // Finish innermost first: tar trailer, gzip trailer, then the file.
        let encoder = builder.into_inner()?;
        let mut file = encoder.finish()?;
        file.flush()?;

        report.bytes_compressed = file.metadata()?.len();
        report.duration = start.elapsed();
        Ok(report)
    }

    fn unpack(&self, archive_file: &Path, dest_dir: &Path) -> Result<ExtractionReport> {
        let file = File::open(archive_file)?;
        let decoder = MultiGzDecoder::new(BufReader::new(file));
        unpack_tar_stream(decoder, dest_dir)
    }

    fn format_name(&self) -> &str {
        "tar.gz"
    }

    fn as_level_setter(&mut self) -> Option<&mut dyn CompressionLevelSetter> {
        Some(self)
    }
}

impl CompressionLevelSetter for TarGzArchiver {
    fn set_compression_level(&mut self, level: CompressionLevel) {
        self.level = level;
    }

    fn compression_level(&self) -> CompressionLevel {
        self.level
    }
}

/// Uncompressed tar engine (`tar`).
///
/// Has no compression stage and therefore no compression-level capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarArchiver;

impl TarArchiver {
    /// Creates a plain tar engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for TarArchiver {
    fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<CreationReport> {
        let start = Instant::now();
        let file = File::create(dest_file)?;
        let mut builder = Builder::new(BufWriter::new(file));

        let mut report = append_source_tree(&mut builder, source_dir, dest_file)?;

        let mut writer = builder.into_inner()?;
        writer.flush()?;

        report.bytes_compressed = writer.get_ref().metadata()?.len();
        report.duration = start.elapsed();
        Ok(report)
    }

    fn unpack(&self, archive_file: &Path, dest_dir: &Path) -> Result<ExtractionReport> {
        let file = File::open(archive_file)?;
        unpack_tar_stream(BufReader::new(file), dest_dir)
    }

    fn format_name(&self) -> &str {
        "tar"
    }
}

/// Appends every file below `source_dir` as a regular-file entry.
///
/// `dest_file` is the archive being written; it is skipped if it lies
/// inside the source tree.
fn append_source_tree<W: Write>(
    builder: &mut Builder<W>,
    source_dir: &Path,
    dest_file: &Path,
) -> Result<CreationReport> {
    let mut report = CreationReport::default();

    for entry in SourceWalker::new(source_dir).excluding(dest_file).files() {
        let entry = entry?;
        let mut file = File::open(&entry.path)?;
        let metadata = file.metadata()?;
        let size = metadata.len();

        let mut header = Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(size);
        set_header_metadata(&mut header, &metadata);

        // append_data writes the name (GNU long-name records if needed) and
        // the checksum. The body must not outgrow the size already in the
        // header, so a file that grows while being read is cut at `size`.
        builder.append_data(&mut header, &entry.archive_name, (&mut file).take(size))?;

        report.files_added += 1;
        report.bytes_written += size;
    }

    Ok(report)
}

/// Extracts a decoded tar stream into `dest_dir`.
///
/// Every entry name is checked before its type is considered, so even
/// skipped entries abort the unpack if they point outside `dest_dir`.
fn unpack_tar_stream<R: Read>(reader: R, dest_dir: &Path) -> Result<ExtractionReport> {
    let start = Instant::now();
    let mut archive = tar::Archive::new(reader);
    let mut report = ExtractionReport::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let target = resolve_entry_path(dest_dir, &name)?;

        // The mode field is only parsed for entries that are materialized.
        match EntryType::from_tar(entry.header().entry_type()) {
            EntryType::Directory => {
                create_directory(&target, entry.header().mode()?)?;
                report.directories_created += 1;
            }
            EntryType::File => {
                let mode = entry.header().mode()?;
                create_parent_dirs(&target)?;
                report.bytes_written += write_file(&mut entry, &target, mode)?;
                report.files_extracted += 1;
            }
            EntryType::Unsupported => {
                report.entries_skipped += 1;
            }
        }
    }

    report.duration = start.elapsed();
    Ok(report)
}

/// Sets mode, ownership and mtime in a tar header from file metadata.
#[cfg(unix)]
fn set_header_metadata(header: &mut Header, metadata: &Metadata) {
    use std::os::unix::fs::MetadataExt;
    header.set_mode(permission_bits(metadata));
    header.set_uid(u64::from(metadata.uid()));
    header.set_gid(u64::from(metadata.gid()));
    // mtime can be negative for dates before epoch, clamp to 0
    #[allow(clippy::cast_sign_loss)]
    let mtime = metadata.mtime().max(0) as u64;
    header.set_mtime(mtime);
}

#[cfg(not(unix))]
fn set_header_metadata(header: &mut Header, metadata: &Metadata) {
    header.set_mode(permission_bits(metadata));
    if let Ok(modified) = metadata.modified()
        && let Ok(duration) = modified.duration_since(std::time::UNIX_EPOCH)
    {
        header.set_mtime(duration.as_secs());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ArchiveError;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::gzip;
    use flate2::read::GzDecoder;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn sample_tree() -> TempDir {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("file1.txt"), "Hello, World!").unwrap();
        fs::create_dir_all(source.path().join("subdir/nested")).unwrap();
        fs::write(source.path().join("subdir/file2.txt"), "This is file 2").unwrap();
        fs::write(
            source.path().join("subdir/nested/file3"),
            "Nested file content",
        )
        .unwrap();
        source
    }

    fn read_tar_gz_contents(path: &Path) -> BTreeMap<String, String> {
        let decoder = GzDecoder::new(File::open(path).unwrap());
        let mut archive = tar::Archive::new(decoder);
        let mut contents = BTreeMap::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            assert_eq!(entry.header().entry_type(), tar::EntryType::Regular);
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut buf = String::new();
            entry.read_to_string(&mut buf).unwrap();
            contents.insert(name, buf);
        }
        contents
    }

    fn write_archive(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_tar_gz_archiver_new() {
        let archiver = TarGzArchiver::new();
        assert_eq!(archiver.format_name(), "tar.gz");
        assert_eq!(archiver.compression_level(), CompressionLevel::DEFAULT);
        assert_eq!(TarArchiver::new().format_name(), "tar");
    }

    #[test]
    fn test_archive_contains_only_regular_files() {
        let source = sample_tree();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("test.tar.gz");

        let report = TarGzArchiver::new().archive(source.path(), &output).unwrap();
        assert_eq!(report.files_added, 3);
        assert_eq!(report.bytes_written, 13 + 14 + 19);

        let contents = read_tar_gz_contents(&output);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents["file1.txt"], "Hello, World!");
        assert_eq!(contents["subdir/file2.txt"], "This is file 2");
        assert_eq!(contents["subdir/nested/file3"], "Nested file content");
    }

    #[test]
    fn test_archive_long_names() {
        let source = TempDir::new().unwrap();
        let deep = source.path().join("a".repeat(60)).join("b".repeat(60));
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("c".repeat(60)), "deep").unwrap();

        let temp = TempDir::new().unwrap();
        let output = temp.path().join("long.tar.gz");
        let archiver = TarGzArchiver::new();
        archiver.archive(source.path(), &output).unwrap();

        let dest = temp.path().join("out");
        archiver.unpack(&output, &dest).unwrap();
        let expected = dest
            .join("a".repeat(60))
            .join("b".repeat(60))
            .join("c".repeat(60));
        assert_eq!(fs::read_to_string(expected).unwrap(), "deep");
    }

    #[test]
    fn test_compression_levels_change_output() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("repetitive.txt"), "abc".repeat(10_000)).unwrap();
        let temp = TempDir::new().unwrap();

        let stored = temp.path().join("stored.tar.gz");
        let best = temp.path().join("best.tar.gz");
        TarGzArchiver::with_compression_level(CompressionLevel::NONE)
            .archive(source.path(), &stored)
            .unwrap();
        TarGzArchiver::with_compression_level(CompressionLevel::BEST_COMPRESSION)
            .archive(source.path(), &best)
            .unwrap();

        let stored_len = fs::metadata(&stored).unwrap().len();
        let best_len = fs::metadata(&best).unwrap().len();
        assert!(best_len < stored_len);
    }

    #[test]
    fn test_unpack_roundtrip() {
        let source = sample_tree();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("test.tar.gz");
        let dest = temp.path().join("unpacked");

        let archiver = TarGzArchiver::new();
        archiver.archive(source.path(), &output).unwrap();
        let report = archiver.unpack(&output, &dest).unwrap();

        assert_eq!(report.files_extracted, 3);
        assert_eq!(report.directories_created, 0);
        assert_eq!(
            fs::read_to_string(dest.join("subdir/file2.txt")).unwrap(),
            "This is file 2"
        );
    }

    #[test]
    fn test_plain_tar_roundtrip() {
        let source = sample_tree();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("test.tar");
        let dest = temp.path().join("unpacked");

        let report = TarArchiver::new().archive(source.path(), &output).unwrap();
        assert_eq!(report.files_added, 3);
        // Uncompressed tar is block-aligned.
        assert_eq!(report.bytes_compressed % 512, 0);

        TarArchiver::new().unpack(&output, &dest).unwrap();
        assert_eq!(
            fs::read_to_string(dest.join("file1.txt")).unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_plain_tar_has_no_level_capability() {
        let mut archiver = TarArchiver::new();
        assert!(archiver.as_level_setter().is_none());
    }

    #[test]
    fn test_unpack_directory_entries_materialized() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("empty/")
            .add_file("docs/readme.txt", b"read me")
            .build();
        let archive = write_archive(&temp, "dirs.tar.gz", &gzip(&data));

        let dest = temp.path().join("out");
        let report = TarGzArchiver::new().unpack(&archive, &dest).unwrap();
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_extracted, 1);
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn test_unpack_skips_symlinks() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("target.txt", b"content")
            .add_symlink("link", "target.txt")
            .build();
        let archive = write_archive(&temp, "links.tar.gz", &gzip(&data));

        let dest = temp.path().join("out");
        let report = TarGzArchiver::new().unpack(&archive, &dest).unwrap();
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.entries_skipped, 1);
        assert!(fs::symlink_metadata(dest.join("link")).is_err());
    }

    #[test]
    fn test_unpack_skips_unsupported_entry_with_garbled_mode() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("before.txt", b"first")
            .add_symlink_with_garbled_mode("link", "before.txt")
            .add_file("after.txt", b"second")
            .build();
        let archive = write_archive(&temp, "garbled.tar", &data);

        let dest = temp.path().join("out");
        let report = TarArchiver::new().unpack(&archive, &dest).unwrap();
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.entries_skipped, 1);
        assert_eq!(fs::read_to_string(dest.join("after.txt")).unwrap(), "second");
        assert!(fs::symlink_metadata(dest.join("link")).is_err());
    }

    #[test]
    fn test_unpack_traversal_rejected() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("good.txt", b"ok")
            .add_raw_file("../../etc/passwd", b"root::0:0")
            .build();
        let archive = write_archive(&temp, "evil.tar.gz", &gzip(&data));

        let dest = temp.path().join("nested/out");
        let err = TarGzArchiver::new().unpack(&archive, &dest).unwrap_err();
        assert!(matches!(err, ArchiveError::IllegalPath { .. }));
        assert!(dest.join("good.txt").exists());
        assert!(!temp.path().join("etc").exists());
    }

    #[test]
    fn test_unpack_traversal_in_skipped_entry_rejected() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_raw_symlink("../escape", "/etc/passwd")
            .build();
        let archive = write_archive(&temp, "evil-link.tar.gz", &gzip(&data));

        let err = TarGzArchiver::new()
            .unpack(&archive, &temp.path().join("out"))
            .unwrap_err();
        assert!(err.is_security_violation());
    }

    #[test]
    fn test_unpack_not_gzip() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(&temp, "plain.tar.gz", b"this is not gzip data at all");

        let err = TarGzArchiver::new()
            .unpack(&archive, &temp.path().join("out"))
            .unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_unpack_missing_archive() {
        let temp = TempDir::new().unwrap();
        let err = TarGzArchiver::new()
            .unpack(&temp.path().join("missing.tar.gz"), &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_roundtrip_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let source = TempDir::new().unwrap();
        let script = source.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

        let temp = TempDir::new().unwrap();
        let output = temp.path().join("modes.tar.gz");
        let dest = temp.path().join("out");
        let archiver = TarGzArchiver::new();
        archiver.archive(source.path(), &output).unwrap();
        archiver.unpack(&output, &dest).unwrap();

        let mode = fs::metadata(dest.join("run.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}

//! Source tree walking for archive creation.
//!
//! Every packing engine walks its source the same way: recursively, in the
//! filesystem's natural order, skipping directories and naming each remaining
//! entry by its path relative to the source root with `/` separators.

use std::fs::Metadata;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use same_file::Handle;
use walkdir::WalkDir;

use crate::ArchiveError;
use crate::Result;

/// Walks a source directory and yields the entries to archive.
///
/// Symbolic links are not followed during the walk; a link is reported like
/// any other non-directory entry and opening it reads its target.
///
/// A walker built with [`excluding`](Self::excluding) never yields the
/// excluded file, under any name. Engines exclude their own output so that
/// an archive written inside its source tree does not read itself.
///
/// # Examples
///
/// ```no_run
/// use dirpack_core::creation::SourceWalker;
/// use std::path::Path;
///
/// let walker = SourceWalker::new(Path::new("./project"));
/// for entry in walker.files() {
///     let entry = entry?;
///     println!("would add: {}", entry.archive_name);
/// }
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub struct SourceWalker<'a> {
    root: &'a Path,
    excluded: Option<Handle>,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            excluded: None,
        }
    }

    /// Skips the file at `path` wherever it appears below the root.
    ///
    /// Identity is by device and inode (or file index), so hard links and
    /// symlinks to the file are skipped too. A path that cannot be opened
    /// excludes nothing.
    #[must_use]
    pub fn excluding(mut self, path: &Path) -> Self {
        self.excluded = Handle::from_path(path).ok();
        self
    }

    /// Returns an iterator over all non-directory entries below the root.
    ///
    /// The order is whatever the underlying directory listing returns; it is
    /// not sorted.
    ///
    /// # Errors
    ///
    /// Items are errors if a directory cannot be read, metadata cannot be
    /// obtained, or a relative path is not valid UTF-8.
    pub fn files(&self) -> impl Iterator<Item = Result<SourceEntry>> + '_ {
        WalkDir::new(self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_dir() || self.is_excluded(&entry) => None,
                Ok(entry) => Some(self.build_entry(&entry)),
                Err(e) => Some(Err(walk_error(e))),
            })
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };
        // Only regular files and links can resolve to the output file; opening
        // a FIFO here could block.
        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            return false;
        }
        Handle::from_path(entry.path()).is_ok_and(|handle| handle == *excluded)
    }

    fn build_entry(&self, entry: &walkdir::DirEntry) -> Result<SourceEntry> {
        let path = entry.path().to_path_buf();
        let relative = path.strip_prefix(self.root).map_err(|_| {
            ArchiveError::Io(std::io::Error::other(format!(
                "walked path {} is outside source root {}",
                path.display(),
                self.root.display()
            )))
        })?;
        let archive_name = archive_name(relative)?;
        if archive_name.is_empty() {
            return Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("source is not a directory: {}", self.root.display()),
            )));
        }

        Ok(SourceEntry { path, archive_name })
    }
}

/// A file found below the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Name to store in the archive: relative, `/`-separated.
    pub archive_name: String,
}

/// Converts a relative filesystem path to an archive entry name.
///
/// Components are joined with `/` regardless of the host separator.
///
/// # Errors
///
/// Returns an error if the path is absolute, contains `..`, or is not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::walker::archive_name;
/// use std::path::Path;
///
/// let name = archive_name(&Path::new("subdir").join("nested").join("file3"))?;
/// assert_eq!(name, "subdir/nested/file3");
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub fn archive_name(relative: &Path) -> Result<String> {
    let mut segments = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment.to_str().ok_or_else(|| {
                    ArchiveError::Io(std::io::Error::other(format!(
                        "path is not valid UTF-8: {}",
                        relative.display()
                    )))
                })?;
                segments.push(segment);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ArchiveError::Io(std::io::Error::other(format!(
                    "path is not relative to the source root: {}",
                    relative.display()
                ))));
            }
        }
    }

    Ok(segments.join("/"))
}

/// Returns the Unix permission bits to store for a source file.
#[cfg(unix)]
pub(crate) fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
pub(crate) fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

fn walk_error(err: walkdir::Error) -> ArchiveError {
    let message = err.to_string();
    err.into_io_error().map_or_else(
        || ArchiveError::Io(std::io::Error::other(format!("walkdir error: {message}"))),
        ArchiveError::Io,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn names(root: &Path) -> BTreeSet<String> {
        SourceWalker::new(root)
            .files()
            .map(|e| e.unwrap().archive_name)
            .collect()
    }

    #[test]
    fn test_walker_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file1.txt"), "content1").unwrap();
        fs::create_dir_all(temp.path().join("subdir/nested")).unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("subdir/nested/file3"), "content3").unwrap();

        let found = names(temp.path());
        let expected: BTreeSet<String> = ["file1.txt", "subdir/nested/file3"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_walker_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(names(temp.path()).is_empty());
    }

    #[test]
    fn test_walker_includes_hidden_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".hidden"), "").unwrap();
        assert!(names(temp.path()).contains(".hidden"));
    }

    #[test]
    fn test_walker_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let first = SourceWalker::new(&missing).files().next().unwrap();
        assert!(matches!(first, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn test_walker_rejects_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let first = SourceWalker::new(&file).files().next().unwrap();
        assert!(matches!(first, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn test_walker_entry_paths_are_absolute_to_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let entry = SourceWalker::new(temp.path()).files().next().unwrap().unwrap();
        assert_eq!(entry.path, temp.path().join("a.txt"));
    }

    #[test]
    fn test_walker_excluding_skips_output_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "keep").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let output = temp.path().join("sub/out.archive");
        fs::write(&output, "partial").unwrap();

        let found: BTreeSet<String> = SourceWalker::new(temp.path())
            .excluding(&output)
            .files()
            .map(|e| e.unwrap().archive_name)
            .collect();
        assert_eq!(found, BTreeSet::from(["keep.txt".to_string()]));
    }

    #[test]
    fn test_walker_excluding_matches_by_identity() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "a").unwrap();
        let output = source.join("out.archive");
        fs::write(&output, "").unwrap();

        // Same file, spelled through a `..` detour.
        let detour = source.join("..").join("src").join("out.archive");
        let found: Vec<String> = SourceWalker::new(&source)
            .excluding(&detour)
            .files()
            .map(|e| e.unwrap().archive_name)
            .collect();
        assert_eq!(found, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_walker_excluding_missing_path_excludes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let found: Vec<String> = SourceWalker::new(temp.path())
            .excluding(&temp.path().join("missing"))
            .files()
            .map(|e| e.unwrap().archive_name)
            .collect();
        assert_eq!(found, vec!["a.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_excluding_skips_symlink_to_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.archive");
        fs::write(&output, "").unwrap();
        std::os::unix::fs::symlink(&output, temp.path().join("alias")).unwrap();

        assert!(
            SourceWalker::new(temp.path())
                .excluding(&output)
                .files()
                .next()
                .is_none()
        );
    }

    #[test]
    fn test_archive_name_uses_forward_slashes() {
        let relative = Path::new("a").join("b").join("c.txt");
        assert_eq!(archive_name(&relative).unwrap(), "a/b/c.txt");
    }

    #[test]
    fn test_archive_name_rejects_escaping_paths() {
        assert!(archive_name(Path::new("../x")).is_err());
        assert!(archive_name(Path::new("/abs")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("script.sh");
        fs::write(&file, "#!/bin/sh").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o750)).unwrap();

        let metadata = fs::metadata(&file).unwrap();
        assert_eq!(permission_bits(&metadata), 0o750);
    }
}

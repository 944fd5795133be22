//! Path-escape validation for extracted entries.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// Computes the extraction target of `entry_name` under `dest` and verifies
/// it stays inside `dest`.
///
/// The entry name is appended component by component, so a leading `/` does
/// not replace the destination root. Both paths are then cleaned lexically
/// and the target must be a strict descendant of the cleaned root: the root
/// itself is rejected too. No filesystem access is performed, so `dest` does
/// not need to exist yet.
///
/// # Errors
///
/// Returns `ArchiveError::IllegalPath` naming `entry_name` if the target
/// escapes `dest`.
///
/// # Examples
///
/// ```
/// use dirpack_core::security::resolve_entry_path;
/// use std::path::Path;
///
/// let target = resolve_entry_path(Path::new("/srv/out"), "docs/readme.txt")?;
/// assert_eq!(target, Path::new("/srv/out/docs/readme.txt"));
///
/// assert!(resolve_entry_path(Path::new("/srv/out"), "../../etc/passwd").is_err());
/// # Ok::<(), dirpack_core::ArchiveError>(())
/// ```
pub fn resolve_entry_path(dest: &Path, entry_name: &str) -> Result<PathBuf> {
    let mut joined = dest.to_path_buf();
    for segment in entry_name.split(is_separator).filter(|s| !s.is_empty()) {
        joined.push(segment);
    }

    let root = clean_path(dest);
    let target = clean_path(&joined);

    if is_strict_descendant(&target, &root) {
        Ok(target)
    } else {
        Err(ArchiveError::IllegalPath {
            path: PathBuf::from(entry_name),
        })
    }
}

/// Lexically normalizes `path` without touching the filesystem.
///
/// `.` components are dropped and `..` removes the preceding normal
/// component. `..` directly under a root stays at the root; `..` at the start
/// of a relative path is kept. An input that cleans to nothing yields an
/// empty path.
///
/// # Examples
///
/// ```
/// use dirpack_core::security::clean_path;
/// use std::path::Path;
///
/// assert_eq!(clean_path(Path::new("a/./b/../c")), Path::new("a/c"));
/// assert_eq!(clean_path(Path::new("/../etc")), Path::new("/etc"));
/// assert_eq!(clean_path(Path::new("../x")), Path::new("../x"));
/// ```
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                parts.push(component);
            }
        }
    }

    parts.iter().collect()
}

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

fn is_strict_descendant(target: &Path, root: &Path) -> bool {
    target
        .strip_prefix(root)
        .ok()
        .and_then(|rest| rest.components().next())
        .is_some_and(|first| matches!(first, Component::Normal(_)))
}

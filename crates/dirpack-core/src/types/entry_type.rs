//! Archive entry classification.

/// Payload type of an archive entry as seen during unpacking.
///
/// Only regular files and directories are materialized; everything else
/// (symlinks, hardlinks, devices, FIFOs) is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Any other entry type.
    Unsupported,
}

impl EntryType {
    /// Classifies a tar header type.
    ///
    /// Both the `'0'` flag and the legacy NUL flag count as regular files.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirpack_core::types::EntryType;
    ///
    /// assert_eq!(EntryType::from_tar(tar::EntryType::Regular), EntryType::File);
    /// assert_eq!(EntryType::from_tar(tar::EntryType::Symlink), EntryType::Unsupported);
    /// ```
    #[must_use]
    pub fn from_tar(kind: tar::EntryType) -> Self {
        if kind.is_dir() {
            Self::Directory
        } else if kind.is_file() {
            Self::File
        } else {
            Self::Unsupported
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tar() {
        assert_eq!(EntryType::from_tar(tar::EntryType::Regular), EntryType::File);
        assert_eq!(
            EntryType::from_tar(tar::EntryType::new(b'\0')),
            EntryType::File
        );
        assert_eq!(
            EntryType::from_tar(tar::EntryType::Directory),
            EntryType::Directory
        );
        for kind in [
            tar::EntryType::Symlink,
            tar::EntryType::Link,
            tar::EntryType::Char,
            tar::EntryType::Block,
            tar::EntryType::Fifo,
        ] {
            assert_eq!(EntryType::from_tar(kind), EntryType::Unsupported);
        }
    }

    #[test]
    fn test_predicates() {
        assert!(EntryType::File.is_file());
        assert!(!EntryType::File.is_directory());
        assert!(EntryType::Directory.is_directory());
        assert!(!EntryType::Unsupported.is_file());
    }
}

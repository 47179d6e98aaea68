use std::path::{Path, PathBuf};

/// A single file or directory name inside one parent directory.
///
/// Identity is the `(parent, name)` pair. The parent path does not change
/// during one audit pass because directories are visited bottom-up: by the
/// time a directory's children are examined, nothing below them is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Directory that contains the entry.
    pub parent: PathBuf,

    /// The entry's own name, a single path component.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(parent: impl Into<PathBuf>, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            parent: parent.into(),
            name: name.into(),
            kind,
        }
    }

    /// Full path to the entry.
    pub fn path(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    /// Path a sibling called `name` would have.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.parent.join(name)
    }

    /// Classify whatever currently lives at `path` without following symlinks.
    pub(crate) fn kind_of(path: &Path) -> std::io::Result<EntryKind> {
        let ft = std::fs::symlink_metadata(path)?.file_type();
        Ok(if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        })
    }
}

/// The kind of a directory entry.
///
/// Symlinks are renamed as links and never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

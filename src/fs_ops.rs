use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

use crate::entry::EntryKind;
use crate::traits::FileOps;

/// File operations backed by `std::fs`.
///
/// `rename` refuses to replace an existing target; on Unix a plain
/// `fs::rename` would silently overwrite it. Directories are deleted
/// together with their contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileOps;

impl FileOps for StdFileOps {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        if self.exists(to) {
            return Err(Error::new(ErrorKind::AlreadyExists, "target already exists"));
        }
        fs::rename(from, to)
    }

    fn remove(&self, path: &Path, kind: EntryKind) -> std::io::Result<()> {
        match kind {
            EntryKind::Dir => fs::remove_dir_all(path),
            EntryKind::File | EntryKind::Symlink | EntryKind::Other => fs::remove_file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let err = StdFileOps.rename(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    }

    #[test]
    fn dangling_symlink_exists() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(dir.path().join("missing"), &link).unwrap();
            assert!(StdFileOps.exists(&link));
        }
        #[cfg(not(unix))]
        assert!(!StdFileOps.exists(&link));
    }

    #[test]
    fn removes_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("f"), "").unwrap();

        StdFileOps.remove(&sub, EntryKind::Dir).unwrap();
        assert!(!sub.exists());
    }
}

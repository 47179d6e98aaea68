use std::path::PathBuf;
use std::time::Duration;

use crate::error::SafenamesError;

/// The output of a completed audit.
#[derive(Debug, Default)]
pub struct AuditResults {
    /// Entries examined, across all inputs.
    pub visited: usize,

    /// Entries renamed, whether to the proposed name or a typed one.
    pub renamed: usize,

    pub deleted: usize,

    /// Entries left alone by the exception gate.
    pub protected: usize,

    /// Proposals the operator turned down.
    pub declined: usize,

    /// Case-only duplicate groups, in the order they were found.
    pub duplicates: Vec<DuplicateGroup>,

    /// Failures that were reported and skipped (unreadable directories,
    /// failed renames, invalid inputs). Cancellation never ends up here.
    pub errors: Vec<SafenamesError>,

    pub stats: ScanStats,
}

impl AuditResults {
    /// Whether the audit changed anything on disk.
    pub fn changed_anything(&self) -> bool {
        self.renamed > 0 || self.deleted > 0
    }
}

/// Siblings whose names differ only by case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub dir: PathBuf,
    pub names: Vec<String>,
}

/// Traversal statistics for a completed audit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanStats {
    /// Non-directory entries examined.
    pub files: usize,

    /// Directories whose listings were scanned.
    pub dirs: usize,

    /// Wall-clock time from audit start to completion, including time spent
    /// waiting for the operator.
    pub duration: Duration,
}

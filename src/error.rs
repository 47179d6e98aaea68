use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafenamesError {
    // Input validation
    #[error("not a file or directory: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("invalid name {0:?}: must be a single non-empty path component")]
    InvalidName(String),

    // File operations
    #[error("could not rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Interaction
    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("cancelled by operator")]
    Cancelled,
}

impl SafenamesError {
    /// The path this error occurred at, if applicable.
    /// Reporters use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidInput(p)
            | Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::Rename { from: p, .. }
            | Self::Delete { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the audit can continue after this error.
    ///
    /// Everything that concerns a single entry or a single input is
    /// recoverable: it is reported, collected, and the audit moves on.
    ///
    /// Cancellation is the only fatal error and ends the run immediately.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Map an IO error raised while touching `path` to the closest variant.
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }
}

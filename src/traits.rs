use std::path::Path;

use crate::decision::Keystroke;
use crate::entry::EntryKind;
use crate::error::SafenamesError;
use crate::report::Message;

/// Where operator decisions come from.
///
/// Implement this to drive the confirmation protocol from anything that can
/// produce keystrokes, such as a raw terminal or a recorded script.
/// [`TerminalDecisions`](crate::TerminalDecisions) reads real keypresses;
/// [`ScriptedDecisions`](crate::ScriptedDecisions) replays a fixed sequence.
///
/// # Cancellation
///
/// Return [`SafenamesError::Cancelled`] when the operator interrupts the
/// read (Ctrl-C). The audit stops immediately and the entry being decided is
/// left untouched.
///
/// # Example
///
/// ```rust
/// use safenames::{DecisionSource, Keystroke, SafenamesError};
///
/// /// Accepts every proposal.
/// struct AlwaysYes;
///
/// impl DecisionSource for AlwaysYes {
///     fn read_decision(&mut self) -> Result<Keystroke, SafenamesError> {
///         Ok(Keystroke::Char('y'))
///     }
///
///     fn read_name(&mut self, _prompt: &str, default: Option<&str>) -> Result<String, SafenamesError> {
///         Ok(default.unwrap_or_default().to_string())
///     }
/// }
/// ```
pub trait DecisionSource {
    /// Block until a single keypress arrives.
    fn read_decision(&mut self) -> Result<Keystroke, SafenamesError>;

    /// Read a free-form, line-buffered name.
    ///
    /// When `default` is given and the operator enters nothing, the default
    /// is returned.
    fn read_name(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SafenamesError>;
}

impl<D: DecisionSource + ?Sized> DecisionSource for &mut D {
    fn read_decision(&mut self) -> Result<Keystroke, SafenamesError> {
        (**self).read_decision()
    }

    fn read_name(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SafenamesError> {
        (**self).read_name(prompt, default)
    }
}

/// The filesystem mutations the audit is allowed to request.
///
/// [`StdFileOps`](crate::StdFileOps) is the real implementation. Any
/// operation may fail; failures are reported per entry and never abort the
/// audit.
pub trait FileOps {
    /// Whether anything (file, directory, dangling symlink) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Rename `from` to `to`. Must fail with
    /// [`std::io::ErrorKind::AlreadyExists`] rather than overwrite `to`.
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Permanently remove the entry at `path`.
    fn remove(&self, path: &Path, kind: EntryKind) -> std::io::Result<()>;
}

/// Sink for everything the audit wants to tell the operator.
///
/// The core never prints; it hands structured [`Message`]s to a reporter.
/// [`ConsoleReporter`](crate::ConsoleReporter) renders them on stdout,
/// [`CollectingReporter`](crate::CollectingReporter) keeps them for inspection.
pub trait Reporter {
    fn report(&mut self, message: Message);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, message: Message) {
        (**self).report(message)
    }
}

use std::path::PathBuf;

use crate::config::Config;
use crate::engine::{run, EngineOptions};
use crate::error::SafenamesError;
use crate::exceptions::{Exception, ExceptionGate};
use crate::fs_ops::StdFileOps;
use crate::report::ConsoleReporter;
use crate::results::AuditResults;
use crate::terminal::TerminalDecisions;
use crate::traits::{DecisionSource, FileOps, Reporter};

// ---------------------------------------------------------------------------
// AuditBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and running an audit.
///
/// Created via [`safenames::audit()`](crate::audit). Configure with chained
/// builder methods, then call [`run()`](AuditBuilder::run).
///
/// Collaborators default to the real ones: keypresses from the terminal,
/// messages to stdout, `std::fs` for renames and deletes. Borrowed
/// collaborators (`&mut reporter`) are accepted so the caller can inspect
/// them afterwards.
///
/// # Example
///
/// ```rust,no_run
/// let results = safenames::audit()
///     .input("/Volumes/Archive")
///     .collapse_white(true)
///     .verbose(true)
///     .run()?;
/// println!("{} renamed", results.renamed);
/// # Ok::<(), safenames::SafenamesError>(())
/// ```
pub struct AuditBuilder<'a> {
    inputs:     Vec<PathBuf>,
    config:     Config,
    exceptions: ExceptionGate,
    decisions:  Option<Box<dyn DecisionSource + 'a>>,
    ops:        Option<Box<dyn FileOps + 'a>>,
    reporter:   Option<Box<dyn Reporter + 'a>>,
}

impl Default for AuditBuilder<'_> {
    fn default() -> Self {
        Self {
            inputs:     Vec::new(),
            config:     Config::default(),
            exceptions: ExceptionGate::default(),
            decisions:  None,
            ops:        None,
            reporter:   None,
        }
    }
}

impl<'a> AuditBuilder<'a> {
    // ── Inputs ────────────────────────────────────────────────────────────

    /// Add a file or directory to audit.
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Replace every option at once.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Collapse runs of whitespace to a single space. Off by default.
    pub fn collapse_white(mut self, yes: bool) -> Self {
        self.config.collapse_white = yes;
        self
    }

    /// Report every visited path.
    pub fn verbose(mut self, yes: bool) -> Self {
        self.config.verbose = yes;
        self
    }

    /// Internal trace output. Implies verbose.
    pub fn debug(mut self, yes: bool) -> Self {
        self.config.debug = yes;
        self
    }

    /// Append an exception to the built-in table.
    pub fn exception(mut self, exception: Exception) -> Self {
        self.exceptions = self.exceptions.with(exception);
        self
    }

    /// Replace the exception table entirely.
    pub fn exceptions(mut self, gate: ExceptionGate) -> Self {
        self.exceptions = gate;
        self
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    pub fn decisions(mut self, source: impl DecisionSource + 'a) -> Self {
        self.decisions = Some(Box::new(source));
        self
    }

    pub fn file_ops(mut self, ops: impl FileOps + 'a) -> Self {
        self.ops = Some(Box::new(ops));
        self
    }

    pub fn reporter(mut self, reporter: impl Reporter + 'a) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the audit over every input, in order.
    ///
    /// Blocks on each proposal until the decision source answers.
    ///
    /// # Errors
    ///
    /// Returns `Err(SafenamesError::Cancelled)` when the operator interrupts.
    /// Everything else (invalid inputs, failed renames, unreadable
    /// directories) is reported and collected into [`AuditResults::errors`].
    pub fn run(self) -> Result<AuditResults, SafenamesError> {
        let opts = EngineOptions {
            config:     self.config,
            exceptions: self.exceptions,
            decisions:  self.decisions.unwrap_or_else(|| Box::new(TerminalDecisions::new())),
            ops:        self.ops.unwrap_or_else(|| Box::new(StdFileOps)),
            reporter:   self.reporter.unwrap_or_else(|| Box::new(ConsoleReporter::new())),
        };

        run(&self.inputs, opts)
    }
}

//! # safenames
//!
//! Find and repair file and directory names that will not survive a copy
//! between Windows, Linux and macOS volumes.
//!
//! A name is checked against the union of every platform's rules: illegal
//! characters, reserved device names, leading or trailing whitespace, and
//! trailing periods. Each proposed fix is confirmed by the operator one
//! keypress at a time, made collision-free against its siblings, and applied
//! immediately. Names that only *look* illegal because an operating system
//! created them on purpose (`Icon\r`, AppleDouble sidecars, ...) are
//! recognised and left alone.
//!
//! # Quick Start
//!
//! ```rust
//! use safenames::{CollectingReporter, ScriptedDecisions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("|starts with illegal"), "").unwrap();
//!
//! let mut reporter = CollectingReporter::new();
//! let results = safenames::audit()
//!     .input(dir.path())
//!     .decisions(ScriptedDecisions::new().key('y'))
//!     .reporter(&mut reporter)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.renamed, 1);
//! assert!(dir.path().join("_starts with illegal").exists());
//! ```
//!
//! # Checking names without touching the disk
//!
//! ```rust
//! use safenames::{resolve, Config, RuleSet};
//!
//! let rules = RuleSet::new(&Config::default());
//! let diagnosis = resolve("ends in tab\t", &rules);
//! assert_eq!(diagnosis.candidate, "ends in tab_");
//! assert_eq!(diagnosis.findings[0].detail, "illegal character tab");
//! ```

#![forbid(unsafe_code)]

pub mod exceptions;
pub mod rules;

mod builder;
mod config;
mod confirm;
mod decision;
mod engine;
mod entry;
mod error;
mod finding;
mod fs_ops;
mod report;
mod resolver;
mod results;
mod terminal;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::AuditBuilder;
pub use config::Config;
pub use confirm::Controller;
pub use decision::{Decision, Keystroke, ScriptedDecisions};
pub use engine::case_duplicates;
pub use entry::{Entry, EntryKind};
pub use error::SafenamesError;
pub use exceptions::{Exception, ExceptionGate, Protection};
pub use finding::{Diagnosis, Disposition, Finding, FindingKind};
pub use fs_ops::StdFileOps;
pub use report::{CollectingReporter, ConsoleReporter, Message};
pub use resolver::{deconflict, next_version, resolve};
pub use results::{AuditResults, DuplicateGroup, ScanStats};
pub use rules::RuleSet;
pub use terminal::TerminalDecisions;
pub use traits::{DecisionSource, FileOps, Reporter};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`AuditBuilder`] to configure and run an audit.
///
/// # Example
///
/// ```rust,no_run
/// let results = safenames::audit()
///     .inputs(["/Volumes/Archive", "/Volumes/Backup"])
///     .collapse_white(true)
///     .run()?;
///
/// for group in &results.duplicates {
///     println!("{}: {:?}", group.dir.display(), group.names);
/// }
/// # Ok::<(), safenames::SafenamesError>(())
/// ```
pub fn audit<'a>() -> AuditBuilder<'a> {
    AuditBuilder::default()
}

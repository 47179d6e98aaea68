//! The per-entry confirmation protocol.
//!
//! A proposal is shown, one keypress decides it, and the chosen file
//! operation runs before the next entry is looked at:
//!
//! ```text
//! Proposed --y/Enter--> Accepted   rename to the deconflicted candidate
//!          --n/other--> Declined   nothing changes
//!          --t--------> Retyped    rename to a typed name (collision-checked only)
//!          --x--------> Deleted    remove the entry, no rename
//! ```
//!
//! Reserved and bad-idea names skip the keypress and go straight to a
//! mandatory name prompt.

use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::config::Config;
use crate::decision::Decision;
use crate::entry::Entry;
use crate::error::SafenamesError;
use crate::finding::{Diagnosis, Disposition};
use crate::report::Message;
use crate::resolver::{deconflict, next_version};
use crate::traits::{DecisionSource, FileOps, Reporter};

/// Number of times a rename is attempted when the target appears between
/// the collision check and the rename itself.
const RENAME_ATTEMPTS: usize = 2;

pub struct Controller<'a> {
    config: &'a Config,
    decisions: &'a mut dyn DecisionSource,
    ops: &'a dyn FileOps,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Controller<'a> {
    pub fn new(
        config: &'a Config,
        decisions: &'a mut dyn DecisionSource,
        ops: &'a dyn FileOps,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            config,
            decisions,
            ops,
            reporter,
        }
    }

    /// Drive the protocol for one entry and apply the outcome.
    ///
    /// # Errors
    ///
    /// [`SafenamesError::Cancelled`] when the operator interrupts; the entry
    /// is untouched. Any other error is recoverable: the entry is left in its
    /// prior state and the caller moves on.
    pub fn confirm(
        &mut self,
        entry: &Entry,
        diagnosis: &Diagnosis,
    ) -> Result<Disposition, SafenamesError> {
        if diagnosis.protected {
            return Ok(Disposition::Skipped);
        }
        if diagnosis.is_clean(&entry.name) {
            return Ok(Disposition::Clean);
        }
        if diagnosis.needs_manual_name() {
            return self.require_name(entry, diagnosis);
        }

        let preview = self.available(entry, &diagnosis.candidate);
        self.reporter.report(Message::Proposal {
            path: entry.path(),
            findings: diagnosis.findings.clone(),
            candidate: preview,
        });

        let decision = Decision::from(self.decisions.read_decision()?);
        debug!(
            name = ?entry.name,
            ?decision,
            collapse = self.config.collapse_white,
            "operator decision"
        );

        match decision {
            Decision::Accept => {
                let renamed = self.rename(entry, &diagnosis.candidate)?;
                Ok(Disposition::Accepted(renamed))
            }
            Decision::Retype => {
                let typed = self.decisions.read_name("new filename", None)?;
                if typed.is_empty() || typed == entry.name {
                    self.reporter.report(Message::Declined(entry.path()));
                    return Ok(Disposition::Rejected);
                }
                validate_name(&typed)?;
                let renamed = self.rename(entry, &typed)?;
                Ok(Disposition::Retyped(renamed))
            }
            Decision::Delete => {
                let path = entry.path();
                self.ops
                    .remove(&path, entry.kind)
                    .map_err(|source| SafenamesError::Delete {
                        path: path.clone(),
                        source,
                    })?;
                self.reporter.report(Message::Deleted(path));
                Ok(Disposition::Deleted)
            }
            Decision::Decline => {
                self.reporter.report(Message::Declined(entry.path()));
                Ok(Disposition::Rejected)
            }
        }
    }

    /// No automatic substitution is safe for a reserved token, so the
    /// operator names the entry. An empty answer takes the rule-derived default.
    fn require_name(
        &mut self,
        entry: &Entry,
        diagnosis: &Diagnosis,
    ) -> Result<Disposition, SafenamesError> {
        self.reporter.report(Message::NameRequired {
            path: entry.path(),
            findings: diagnosis.findings.clone(),
            default: diagnosis.candidate.clone(),
        });

        let prompt = format!("Enter new filename  default:[{}]", diagnosis.candidate);
        let typed = self.decisions.read_name(&prompt, Some(&diagnosis.candidate))?;

        if typed.is_empty() || typed == diagnosis.candidate {
            let renamed = self.rename(entry, &diagnosis.candidate)?;
            return Ok(Disposition::Accepted(renamed));
        }
        validate_name(&typed)?;
        let renamed = self.rename(entry, &typed)?;
        Ok(Disposition::Retyped(renamed))
    }

    /// First free variant of `wanted` next to `entry`.
    fn available(&self, entry: &Entry, wanted: &str) -> String {
        deconflict(&entry.parent, wanted, |p| self.ops.exists(p))
    }

    /// Rename `entry` to a free variant of `wanted`.
    ///
    /// The collision check happens immediately before the rename. If another
    /// process claims the name in between, the check and rename run once more.
    fn rename(&mut self, entry: &Entry, wanted: &str) -> Result<String, SafenamesError> {
        let from = entry.path();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let target = self.available(entry, wanted);
            let to = entry.sibling(&target);
            match self.ops.rename(&from, &to) {
                Ok(()) => {
                    self.report_collisions(wanted, &target);
                    self.reporter.report(Message::Renamed { from, to });
                    return Ok(target);
                }
                Err(source)
                    if source.kind() == ErrorKind::AlreadyExists && attempt < RENAME_ATTEMPTS =>
                {
                    warn!(
                        target = ?target,
                        "rename target appeared after collision check, retrying"
                    );
                }
                Err(source) => return Err(SafenamesError::Rename { from, to, source }),
            }
        }
    }

    /// One notice per version bump between `wanted` and the name in use.
    ///
    /// `used` was reached from `wanted` through [`next_version`], so the walk
    /// ends there.
    fn report_collisions(&mut self, wanted: &str, used: &str) {
        let mut name = wanted.to_string();
        while name != used {
            let next = next_version(&name);
            self.reporter.report(Message::Collision {
                wanted: name,
                resolved: next.clone(),
            });
            name = next;
        }
    }
}

/// An operator-typed name is trusted for its characters, but it must still
/// name a single entry in the same directory.
fn validate_name(name: &str) -> Result<(), SafenamesError> {
    let single_component = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
        && !(cfg!(windows) && name.contains('\\'));
    if single_component {
        Ok(())
    } else {
        Err(SafenamesError::InvalidName(name.to_string()))
    }
}

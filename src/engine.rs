use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::config::Config;
use crate::confirm::Controller;
use crate::entry::{Entry, EntryKind};
use crate::error::SafenamesError;
use crate::exceptions::ExceptionGate;
use crate::finding::Disposition;
use crate::report::Message;
use crate::resolver::resolve;
use crate::results::{AuditResults, DuplicateGroup, ScanStats};
use crate::rules::RuleSet;
use crate::traits::{DecisionSource, FileOps, Reporter};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Everything the builder hands to `run()`.
pub(crate) struct EngineOptions<'a> {
    pub config:     Config,
    pub exceptions: ExceptionGate,
    pub decisions:  Box<dyn DecisionSource + 'a>,
    pub ops:        Box<dyn FileOps + 'a>,
    pub reporter:   Box<dyn Reporter + 'a>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Audit every input in order.
///
/// Each entry is diagnosed, confirmed and mutated before the next one is
/// visited. Directories are processed bottom-up so that renaming a child
/// never invalidates a path that is still pending.
///
/// Returns `Err` only when the operator cancels; everything else is
/// reported, collected into [`AuditResults::errors`], and skipped.
pub(crate) fn run(
    inputs: &[PathBuf],
    opts: EngineOptions<'_>,
) -> Result<AuditResults, SafenamesError> {
    let EngineOptions { config, exceptions, mut decisions, ops, mut reporter } = opts;

    let mut driver = Driver {
        config:    &config,
        rules:     RuleSet::new(&config),
        gate:      &exceptions,
        decisions: &mut *decisions,
        ops:       &*ops,
        reporter:  &mut *reporter,
        results:   AuditResults::default(),
    };

    debug!(?config, exceptions = ?exceptions.labels().collect::<Vec<_>>(), "starting audit");
    let start = Instant::now();

    for input in inputs {
        driver.audit_input(input)?;
    }

    let mut results = driver.results;
    results.stats = ScanStats {
        duration: start.elapsed(),
        ..results.stats
    };
    Ok(results)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

struct Driver<'d> {
    config:    &'d Config,
    rules:     RuleSet,
    gate:      &'d ExceptionGate,
    decisions: &'d mut dyn DecisionSource,
    ops:       &'d dyn FileOps,
    reporter:  &'d mut dyn Reporter,
    results:   AuditResults,
}

impl Driver<'_> {
    fn audit_input(&mut self, input: &Path) -> Result<(), SafenamesError> {
        let meta = match fs::metadata(input) {
            Ok(meta) => meta,
            Err(err) => {
                self.recover(SafenamesError::from_io(input.to_path_buf(), err));
                return Ok(());
            }
        };

        if meta.is_dir() {
            for dir in self.directories_bottom_up(input) {
                self.visit_dir(&dir)?;
            }
            Ok(())
        } else if meta.is_file() {
            let name = input.file_name().and_then(|n| n.to_str());
            let parent = input.parent().filter(|p| !p.as_os_str().is_empty());
            match name {
                Some(name) => {
                    let parent = parent.unwrap_or_else(|| Path::new("."));
                    self.process_entry(Entry::new(parent, name, EntryKind::File))
                }
                None => {
                    self.recover(SafenamesError::InvalidInput(input.to_path_buf()));
                    Ok(())
                }
            }
        } else {
            self.recover(SafenamesError::InvalidInput(input.to_path_buf()));
            Ok(())
        }
    }

    /// Every directory under `root` (inclusive), children before parents.
    ///
    /// A pre-order walk lists each directory before its descendants, so the
    /// reversed list puts every descendant first.
    fn directories_bottom_up(&mut self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut dirs = Vec::new();
        for res in walker {
            match res {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        dirs.push(entry.into_path());
                    }
                }
                Err(err) => self.recover(map_ignore_error(err)),
            }
        }
        dirs.reverse();
        dirs
    }

    /// Scan one directory's current listing and process each child.
    fn visit_dir(&mut self, dir: &Path) -> Result<(), SafenamesError> {
        self.results.stats.dirs += 1;

        let listing = match fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(err) => {
                self.recover(SafenamesError::from_io(dir.to_path_buf(), err));
                return Ok(());
            }
        };

        let mut children: Vec<(String, EntryKind)> = Vec::new();
        for item in listing {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    self.recover(SafenamesError::from_io(dir.to_path_buf(), err));
                    continue;
                }
            };
            let kind = match item.file_type() {
                Ok(ft) if ft.is_dir() => EntryKind::Dir,
                Ok(ft) if ft.is_file() => EntryKind::File,
                Ok(ft) if ft.is_symlink() => EntryKind::Symlink,
                Ok(_) => EntryKind::Other,
                Err(_) => Entry::kind_of(&item.path()).unwrap_or(EntryKind::Other),
            };
            match item.file_name().into_string() {
                Ok(name) => children.push((name, kind)),
                Err(_) => self.reporter.report(Message::Unreadable {
                    path: item.path(),
                    reason: "name is not valid UTF-8".into(),
                }),
            }
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        let names: Vec<&str> = children.iter().map(|(n, _)| n.as_str()).collect();
        for names in case_duplicates(&names) {
            self.reporter.report(Message::CaseDuplicates {
                dir: dir.to_path_buf(),
                names: names.clone(),
            });
            self.results.duplicates.push(DuplicateGroup {
                dir: dir.to_path_buf(),
                names,
            });
        }

        for (name, kind) in children {
            self.process_entry(Entry::new(dir, name, kind))?;
        }
        Ok(())
    }

    /// Exception gate, then resolver, then confirmation, for one entry.
    fn process_entry(&mut self, entry: Entry) -> Result<(), SafenamesError> {
        self.results.visited += 1;
        if entry.kind != EntryKind::Dir {
            self.results.stats.files += 1;
        }
        if self.config.verbose() {
            self.reporter.report(Message::Visit(entry.path()));
        }

        let protection = self.gate.is_protected(&entry);
        let mut diagnosis = resolve(&entry.name, &self.rules);
        diagnosis.protected = protection.protected;
        trace!(
            name = ?entry.name,
            candidate = ?diagnosis.candidate,
            findings = diagnosis.findings.len(),
            "diagnosed"
        );

        for reason in protection.messages {
            self.reporter.report(Message::Protected {
                path: entry.path(),
                reason,
            });
        }

        let outcome = Controller::new(
            self.config,
            &mut *self.decisions,
            self.ops,
            &mut *self.reporter,
        )
        .confirm(&entry, &diagnosis);

        match outcome {
            Ok(disposition) => {
                debug!(
                    name = ?entry.name,
                    ?disposition,
                    now = ?disposition.final_name(&entry.name),
                    "disposition"
                );
                self.tally(&disposition);
                Ok(())
            }
            Err(err) if err.is_recoverable() => {
                self.recover(err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn tally(&mut self, disposition: &Disposition) {
        let results = &mut self.results;
        match disposition {
            Disposition::Clean => {}
            Disposition::Accepted(_) | Disposition::Retyped(_) => results.renamed += 1,
            Disposition::Rejected => results.declined += 1,
            Disposition::Deleted => results.deleted += 1,
            Disposition::Skipped => results.protected += 1,
        }
    }

    /// Report a recoverable error and keep it for the summary.
    fn recover(&mut self, err: SafenamesError) {
        self.reporter.report(Message::Failed {
            path: err.path().cloned(),
            error: err.to_string(),
        });
        self.results.errors.push(err);
    }
}

// ---------------------------------------------------------------------------
// Case-only duplicates
// ---------------------------------------------------------------------------

/// Groups of names that are distinct but equal once case-folded.
///
/// Only reported: a case-insensitive volume cannot hold both, and which one
/// to rename is the operator's call.
pub fn case_duplicates(names: &[&str]) -> Vec<Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in names {
        let group = groups.entry(name.to_lowercase()).or_default();
        if !group.iter().any(|n| n == name) {
            group.push(name.to_string());
        }
    }
    groups.into_values().filter(|g| g.len() > 1).collect()
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SafenamesError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> SafenamesError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => SafenamesError::from_io(path, io_err),
            other => SafenamesError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => {
            SafenamesError::Walk(format!("symlink loop at {}", child.display()))
        }
        ignore::Error::Io(io_err) => SafenamesError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => SafenamesError::Walk(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_only_duplicates_are_grouped() {
        let groups = case_duplicates(&["Report.txt", "notes", "report.txt", "REPORT.TXT"]);
        assert_eq!(
            groups,
            vec![vec![
                "Report.txt".to_string(),
                "report.txt".into(),
                "REPORT.TXT".into()
            ]]
        );
    }

    #[test]
    fn distinct_names_are_not_duplicates() {
        assert!(case_duplicates(&["a", "b", "c"]).is_empty());
    }
}

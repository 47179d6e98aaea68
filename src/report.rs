use std::io::Write;
use std::path::PathBuf;

use console::style;

use crate::finding::Finding;
use crate::traits::Reporter;

/// Everything the audit tells the operator, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// An entry is about to be examined (verbose mode only).
    Visit(PathBuf),

    /// The exception gate matched; the entry is left alone.
    Protected { path: PathBuf, reason: String },

    /// A fix is proposed and a keypress decision follows.
    Proposal {
        path: PathBuf,
        findings: Vec<Finding>,
        candidate: String,
    },

    /// A reserved or bad-idea name needs an operator-chosen replacement.
    NameRequired {
        path: PathBuf,
        findings: Vec<Finding>,
        default: String,
    },

    /// `wanted` was taken, so the counter moved on to `resolved`. Sent once
    /// per bump.
    Collision { wanted: String, resolved: String },

    Renamed { from: PathBuf, to: PathBuf },

    Declined(PathBuf),

    Deleted(PathBuf),

    /// Siblings whose names differ only by case.
    CaseDuplicates { dir: PathBuf, names: Vec<String> },

    /// An entry that could not be examined at all.
    Unreadable { path: PathBuf, reason: String },

    /// A recoverable failure; the audit continues.
    Failed { path: Option<PathBuf>, error: String },
}

/// Renders messages on stdout for a human at a terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

fn findings_line(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| f.detail.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, message: Message) {
        match message {
            Message::Visit(path) => println!("{}", path.display()),
            Message::Protected { path, reason } => {
                println!("{} {}", style("protected").cyan(), reason);
                tracing::debug!(path = %path.display(), "exception gate matched");
            }
            Message::Proposal { path, findings, candidate } => {
                println!("{}", path.display());
                println!("\t{}", style(findings_line(&findings)).yellow());
                let original = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                print!(
                    "replace {:?} with {:?}?  (Y/n/t/x : Yes/no/type/delete): ",
                    original, candidate
                );
                // The decision source reads the key right after this.
                let _ = std::io::stdout().flush();
            }
            Message::NameRequired { path, findings, default } => {
                println!("{}", path.display());
                println!(
                    "\t{} {}",
                    style("illegal filename:").red(),
                    findings_line(&findings)
                );
                tracing::debug!(default = %default, "manual name required");
            }
            Message::Collision { wanted, resolved } => {
                println!("{wanted:?} already exists, using {resolved:?}");
            }
            Message::Renamed { from, to } => {
                println!("old={from:?}, new={to:?}");
            }
            Message::Declined(path) => tracing::debug!(path = %path.display(), "declined"),
            Message::Deleted(path) => println!("{} {}", style("deleted").red(), path.display()),
            Message::CaseDuplicates { dir, names } => {
                println!(
                    "{} {}: names differ only by case: {}",
                    style("warning").yellow().bold(),
                    dir.display(),
                    names.iter().map(|n| format!("{n:?}")).collect::<Vec<_>>().join(", ")
                );
            }
            Message::Unreadable { path, reason } => {
                println!("{} {}: {}", style("skipped").yellow(), path.display(), reason);
            }
            Message::Failed { path, error } => match path {
                Some(path) => eprintln!(
                    "{} {}: {}",
                    style("error").red().bold(),
                    path.display(),
                    error
                ),
                None => eprintln!("{} {}", style("error").red().bold(), error),
            },
        }
    }
}

/// Keeps every message, in order. Useful for tests and for embedding the
/// audit in another program.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub messages: Vec<Message>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages matching `pred`.
    pub fn matching(&self, pred: impl Fn(&Message) -> bool) -> Vec<&Message> {
        self.messages.iter().filter(|m| pred(m)).collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, message: Message) {
        self.messages.push(message);
    }
}

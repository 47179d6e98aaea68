use std::fmt;

/// The closed set of issues the rule set can report for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// A character that is illegal (or a bad idea) on at least one platform.
    IllegalCharacter,

    /// A Windows device name or NTFS metafile name.
    ReservedName,

    /// Legal everywhere but harmful in practice, e.g. a bare `-`.
    BadIdeaName,

    /// The stem is empty once whitespace is trimmed.
    WhitespaceOnly,

    TrailingWhitespace,

    LeadingWhitespace,

    /// The stem or the extension ends in one or more periods.
    TrailingPeriod,

    /// Internal runs of more than one whitespace character.
    ExcessWhitespace,
}

impl FindingKind {
    /// Reserved and bad-idea names are never substituted automatically;
    /// the operator must choose a replacement.
    pub fn needs_manual_name(self) -> bool {
        matches!(self, Self::ReservedName | Self::BadIdeaName)
    }
}

/// One detected issue with an entry's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    pub kind: FindingKind,

    /// Human-readable detail, e.g. `illegal character tab`.
    pub detail: String,
}

impl Finding {
    pub fn new(kind: FindingKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Everything the resolver learned about one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    /// Findings in pipeline order, without duplicates.
    pub findings: Vec<Finding>,

    /// The name after every applicable fix, before collision resolution.
    pub candidate: String,

    /// Set when the exception gate protects the entry.
    pub protected: bool,
}

impl Diagnosis {
    /// Whether any finding asks for an operator-chosen name.
    pub fn needs_manual_name(&self) -> bool {
        self.findings.iter().any(|f| f.kind.needs_manual_name())
    }

    /// Whether the entry is a rename candidate at all.
    pub fn is_clean(&self, original: &str) -> bool {
        self.candidate == original
    }
}

/// The terminal outcome for one entry during one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The name had no findings; nothing was proposed.
    Clean,

    /// Renamed to the (deconflicted) proposed name.
    Accepted(String),

    /// The operator declined, or the change could not be applied.
    Rejected,

    /// Renamed to an operator-supplied (deconflicted) name.
    Retyped(String),

    /// Removed from the filesystem.
    Deleted,

    /// Protected by the exception gate.
    Skipped,
}

impl Disposition {
    /// The entry's name after this disposition, if it still exists.
    pub fn final_name<'a>(&'a self, original: &'a str) -> Option<&'a str> {
        match self {
            Self::Accepted(name) | Self::Retyped(name) => Some(name.as_str()),
            Self::Deleted => None,
            Self::Clean | Self::Rejected | Self::Skipped => Some(original),
        }
    }
}

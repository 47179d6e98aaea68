//! The rule set: what makes a name illegal or undesirable on at least one of
//! Windows, Linux and macOS, and how each problem is fixed.
//!
//! Every rule is a pure function from a name to an optional [`Fix`]. Rules
//! run in a fixed pipeline order and each one is idempotent on its own
//! output.

use crate::config::Config;
use crate::finding::{Finding, FindingKind};

/// Punctuation rejected by Windows, plus `/` (Linux) and `:` (macOS).
const ILLEGAL_PUNCTUATION: &[char] = &[':', '<', '>', '"', '\\', '/', '|', '?', '*'];

/// Windows device names and NTFS metafiles. Compared case-insensitively.
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "CLOCK$",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    "$ATTRDEF", "$BADCLUS", "$BITMAP", "$BOOT", "$LOGFILE", "$MFT", "$MFTMIRR",
    "PAGEFILE.SYS", "$SECURE", "$UPCASE", "$VOLUME", "$EXTEND",
];

/// Legal everywhere, but trouble for shells and command-line tools.
pub const BAD_IDEA_NAMES: &[&str] = &["-"];

pub const RESERVED_SUFFIX: &str = "_legal";
pub const BAD_IDEA_SUFFIX: &str = "_better_name";

/// Stem used when nothing is left of the original one.
const EMPTY_STEM: &str = "_";

/// The result of one rule firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub name: String,
    pub findings: Vec<Finding>,
}

impl Fix {
    fn single(name: String, kind: FindingKind, detail: impl Into<String>) -> Self {
        Self {
            name,
            findings: vec![Finding::new(kind, detail)],
        }
    }
}

type Rule = fn(&str) -> Option<Fix>;

/// Always-on rules, in the order their fixes are applied.
const PIPELINE: &[Rule] = &[
    illegal_characters,
    reserved_name,
    bad_idea_name,
    whitespace_only,
    trailing_whitespace,
    leading_whitespace,
    trailing_period,
];

/// The active rule pipeline for one audit.
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(config: &Config) -> Self {
        let mut rules = PIPELINE.to_vec();
        if config.collapse_white {
            rules.push(collapse_whitespace);
        }
        Self { rules }
    }

    /// Every issue the pipeline finds in `name`, in pipeline order.
    pub fn classify(&self, name: &str) -> Vec<Finding> {
        self.pass(name).1
    }

    /// Run each rule once, feeding every fix into the next rule.
    pub fn pass(&self, name: &str) -> (String, Vec<Finding>) {
        let mut current = name.to_string();
        let mut findings = Vec::new();
        for rule in &self.rules {
            if let Some(fix) = rule(&current) {
                current = fix.name;
                findings.extend(fix.findings);
            }
        }
        (current, findings)
    }
}

// ---------------------------------------------------------------------------
// Character and name predicates
// ---------------------------------------------------------------------------

/// Whether `c` is illegal on at least one target platform.
/// Tab is legal everywhere but counted as a bad idea.
pub fn is_illegal_char(c: char) -> bool {
    (c as u32) < 0x20 || c == '\x7f' || ILLEGAL_PUNCTUATION.contains(&c)
}

/// Whether `name` is a reserved Windows or NTFS name (case-insensitive).
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name))
}

pub fn is_bad_idea(name: &str) -> bool {
    BAD_IDEA_NAMES.contains(&name)
}

/// Readable rendering of an offending character.
pub fn describe_char(c: char) -> String {
    match c {
        '\t' => "tab".into(),
        '\n' => "newline".into(),
        '\r' => "carriage return".into(),
        '\0' => "NUL".into(),
        '\x7f' => "DEL".into(),
        c if (c as u32) < 0x20 => format!("control 0x{:02X}", c as u32),
        c => format!("'{c}'"),
    }
}

/// Split `name` into stem and extension.
///
/// The extension starts at the last `.` that is not part of a leading run
/// of dots, and never contains whitespace. `.bashrc` has no extension;
/// `notes. ` has no extension either.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(i) => {
            let dot = leading + i;
            let ext = &name[dot..];
            if ext.chars().any(char::is_whitespace) {
                (name, "")
            } else {
                (&name[..dot], ext)
            }
        }
        None => (name, ""),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Replace each illegal character with `_`, one finding per distinct character.
pub fn illegal_characters(name: &str) -> Option<Fix> {
    let mut offenders: Vec<char> = Vec::new();
    for c in name.chars().filter(|&c| is_illegal_char(c)) {
        if !offenders.contains(&c) {
            offenders.push(c);
        }
    }
    if offenders.is_empty() {
        return None;
    }

    let fixed = name
        .chars()
        .map(|c| if is_illegal_char(c) { '_' } else { c })
        .collect();
    let findings = offenders
        .into_iter()
        .map(|c| {
            Finding::new(
                FindingKind::IllegalCharacter,
                format!("illegal character {}", describe_char(c)),
            )
        })
        .collect();
    Some(Fix { name: fixed, findings })
}

pub fn reserved_name(name: &str) -> Option<Fix> {
    is_reserved(name).then(|| {
        Fix::single(
            format!("{name}{RESERVED_SUFFIX}"),
            FindingKind::ReservedName,
            format!("reserved name {name:?}"),
        )
    })
}

pub fn bad_idea_name(name: &str) -> Option<Fix> {
    is_bad_idea(name).then(|| {
        Fix::single(
            format!("{name}{BAD_IDEA_SUFFIX}"),
            FindingKind::BadIdeaName,
            format!("bad idea name {name:?}"),
        )
    })
}

pub fn whitespace_only(name: &str) -> Option<Fix> {
    let (stem, ext) = split_extension(name);
    stem.trim().is_empty().then(|| {
        Fix::single(
            format!("{EMPTY_STEM}{ext}"),
            FindingKind::WhitespaceOnly,
            "name is only whitespace",
        )
    })
}

pub fn trailing_whitespace(name: &str) -> Option<Fix> {
    let (stem, ext) = split_extension(name);
    let trimmed = stem.trim_end();
    (trimmed != stem).then(|| {
        Fix::single(
            format!("{trimmed}{ext}"),
            FindingKind::TrailingWhitespace,
            "trailing whitespace",
        )
    })
}

pub fn leading_whitespace(name: &str) -> Option<Fix> {
    let (stem, ext) = split_extension(name);
    let trimmed = stem.trim_start();
    (trimmed != stem).then(|| {
        Fix::single(
            format!("{trimmed}{ext}"),
            FindingKind::LeadingWhitespace,
            "leading whitespace",
        )
    })
}

/// Strip trailing periods from the stem and the extension independently.
pub fn trailing_period(name: &str) -> Option<Fix> {
    let (stem, ext) = split_extension(name);
    if !stem.ends_with('.') && !ext.ends_with('.') {
        return None;
    }
    let mut stem = stem.trim_end_matches('.');
    if stem.is_empty() {
        stem = EMPTY_STEM;
    }
    let ext = ext.trim_end_matches('.');
    Some(Fix::single(
        format!("{stem}{ext}"),
        FindingKind::TrailingPeriod,
        "trailing period",
    ))
}

/// Collapse every whitespace run in the whole name to one space, and trim.
pub fn collapse_whitespace(name: &str) -> Option<Fix> {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty() && collapsed != name).then(|| {
        Fix::single(collapsed, FindingKind::ExcessWhitespace, "excess whitespace")
    })
}

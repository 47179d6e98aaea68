use std::path::Path;

use tracing::{debug, trace};

use crate::finding::{Diagnosis, Finding};
use crate::rules::{split_extension, RuleSet};

/// Passes allowed beyond one per character. One fix can expose another
/// (`"CON."` loses its period and becomes reserved, `"a . ."` sheds one
/// period per pass), but every pass that changes the name either shortens it
/// or fires a rule that cannot fire again.
const EXTRA_PASSES: usize = 8;

/// Apply the rule pipeline to `name` until nothing changes.
///
/// Findings are collected across passes without duplicates, so a problem
/// that survives into a second pass is only counted once. The result is not
/// yet collision-free; see [`deconflict`].
pub fn resolve(name: &str, rules: &RuleSet) -> Diagnosis {
    let mut candidate = name.to_string();
    let mut findings: Vec<Finding> = Vec::new();

    let max_passes = name.chars().count() + EXTRA_PASSES;
    for pass in 0..max_passes {
        let (next, found) = rules.pass(&candidate);
        for finding in found {
            if !findings.contains(&finding) {
                findings.push(finding);
            }
        }
        if next == candidate {
            break;
        }
        trace!(pass, from = ?candidate, to = ?next, "rule pass changed name");
        candidate = next;
    }

    Diagnosis {
        findings,
        candidate,
        protected: false,
    }
}

/// Return `candidate`, or the first versioned variant of it that does not
/// exist in `parent` right now.
///
/// `"clean.txt"` becomes `"clean (1).txt"`; a stem that already ends in a
/// parenthesised number has that number incremented instead. The extension
/// is always preserved.
pub fn deconflict(parent: &Path, candidate: &str, exists: impl Fn(&Path) -> bool) -> String {
    let mut name = candidate.to_string();
    while exists(&parent.join(&name)) {
        let next = next_version(&name);
        debug!(existing = ?name, next = ?next, "name already exists, updating version");
        name = next;
    }
    name
}

/// `"foo (3).txt"` -> `"foo (4).txt"`, `"foo.txt"` -> `"foo (1).txt"`.
pub fn next_version(name: &str) -> String {
    let (stem, ext) = split_extension(name);
    match parse_version(stem).and_then(|(base, n)| Some((base, n.checked_add(1)?))) {
        Some((base, n)) => format!("{base}({n}){ext}"),
        None => format!("{stem} (1){ext}"),
    }
}

/// Split a trailing `(N)` off `stem`, keeping whatever precedes the `(`.
fn parse_version(stem: &str) -> Option<(&str, u64)> {
    let inner = stem.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let digits = &inner[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((&stem[..open], digits.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::finding::FindingKind;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn rules() -> RuleSet {
        RuleSet::new(&Config::default())
    }

    #[test]
    fn tab_becomes_underscore() {
        let diagnosis = resolve("ends in tab\t", &rules());
        assert_eq!(diagnosis.candidate, "ends in tab_");
        assert_eq!(diagnosis.findings[0].detail, "illegal character tab");
    }

    #[test]
    fn leading_pipe_becomes_underscore() {
        assert_eq!(resolve("|starts with illegal", &rules()).candidate, "_starts with illegal");
    }

    #[test]
    fn clean_name_has_no_findings() {
        let diagnosis = resolve("report.pdf", &rules());
        assert!(diagnosis.findings.is_empty());
        assert!(diagnosis.is_clean("report.pdf"));
    }

    #[test]
    fn later_passes_catch_exposed_problems() {
        let diagnosis = resolve("CON.", &rules());
        assert_eq!(diagnosis.candidate, "CON_legal");
        let kinds: Vec<_> = diagnosis.findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FindingKind::TrailingPeriod, FindingKind::ReservedName]);
    }

    #[test]
    fn findings_are_not_double_counted() {
        let diagnosis = resolve("a . ", &rules());
        assert_eq!(diagnosis.candidate, "a");
        let trailing = diagnosis
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::TrailingWhitespace)
            .count();
        assert_eq!(trailing, 1);
    }

    #[test]
    fn multiple_rules_fire_together() {
        let diagnosis = resolve("  a<b> .txt", &rules());
        assert_eq!(diagnosis.candidate, "a_b_.txt");
        assert_eq!(diagnosis.findings.len(), 4);
    }

    #[test]
    fn version_numbers_increment() {
        assert_eq!(next_version("clean.txt"), "clean (1).txt");
        assert_eq!(next_version("clean (1).txt"), "clean (2).txt");
        assert_eq!(next_version("clean (9)"), "clean (10)");
        assert_eq!(next_version("v(2).tar.gz"), "v(2).tar (1).gz");
        assert_eq!(next_version("odd ().txt"), "odd () (1).txt");
    }

    #[test]
    fn deconflict_skips_every_taken_name() {
        let parent = PathBuf::from("/d");
        let taken: HashSet<PathBuf> = ["clean.txt", "clean (1).txt", "clean (2).txt"]
            .iter()
            .map(|n| parent.join(n))
            .collect();
        let name = deconflict(&parent, "clean.txt", |p| taken.contains(p));
        assert_eq!(name, "clean (3).txt");
    }

    #[test]
    fn deconflict_keeps_free_name() {
        assert_eq!(deconflict(Path::new("/d"), "free.txt", |_| false), "free.txt");
    }
}

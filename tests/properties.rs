use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use safenames::rules::{is_illegal_char, is_reserved};
use safenames::{deconflict, resolve, Config, RuleSet};

/// Names mixing ordinary text with every kind of trouble the rules know about.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ a-zA-Z0-9._\\-]{0,12}",
        "[ \t.:<>\"\\\\/|?*a-z\\x00-\\x1f\\x7f]{0,12}",
        prop::sample::select(vec!["CON", "con.", " nul", "-", "LPT1 ", "$MFT", "...", " . "])
            .prop_map(str::to_string),
        "\\PC{0,10}",
    ]
}

fn rule_set(collapse_white: bool) -> RuleSet {
    RuleSet::new(&Config {
        collapse_white,
        ..Config::default()
    })
}

proptest! {
    #[test]
    fn resolve_is_idempotent(name in name_strategy(), collapse in any::<bool>()) {
        let rules = rule_set(collapse);
        let once = resolve(&name, &rules).candidate;
        let twice = resolve(&once, &rules).candidate;
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn candidates_are_legal(name in name_strategy(), collapse in any::<bool>()) {
        let rules = rule_set(collapse);
        let candidate = resolve(&name, &rules).candidate;
        prop_assert!(!candidate.chars().any(is_illegal_char));
        prop_assert!(!is_reserved(&candidate));
        prop_assert!(!candidate.starts_with(char::is_whitespace));
        prop_assert!(!candidate.ends_with(char::is_whitespace));
        prop_assert!(!candidate.ends_with('.'));
        prop_assert!(!candidate.is_empty());
    }

    #[test]
    fn deconflict_avoids_existing_names(
        existing in prop::collection::hash_set("[a-c]{1,2}( \\([0-9]\\))?(\\.txt)?", 0..20),
        candidate in "[a-c]{1,2}(\\.txt)?",
    ) {
        let parent = PathBuf::from("/d");
        let taken: HashSet<PathBuf> = existing.iter().map(|n| parent.join(n)).collect();
        let name = deconflict(Path::new("/d"), &candidate, |p| taken.contains(p));
        prop_assert!(!taken.contains(&parent.join(&name)));
    }
}

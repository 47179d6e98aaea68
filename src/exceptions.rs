//! Names that only look illegal.
//!
//! Some operating systems deliberately create entries that break the
//! portability rules. Renaming them would damage the owning application, so
//! they are recognised here and left alone. The table is known to be
//! incomplete; new cases are added as rows, not as new control flow.

use std::path::Path;

use crate::entry::Entry;

/// One known exception: a predicate over the entry and the reason it is left alone.
#[derive(Clone, Copy)]
pub struct Exception {
    pub label: &'static str,
    pub applies: fn(&Entry) -> bool,
    pub reason: &'static str,
}

/// Extensions used by macOS Address Book exports, whose names contain `:`.
const ADDRESS_BOOK_EXTENSIONS: &[&str] = &[".abcdg", ".abcdi", ".abcdp", ".abcds"];

/// Perl module manual pages are named after the module, e.g. `File::Spec.3pm`.
const MODULE_MANPAGE_SUFFIXES: &[&str] = &[".3pm", ".3pm.gz", ".3perl", ".3perl.gz"];

pub const BUILTIN_EXCEPTIONS: &[Exception] = &[
    Exception {
        label: "finder-icon",
        applies: is_finder_icon,
        reason: "Not Windows compatible but a macOS Finder custom icon file",
    },
    Exception {
        label: "apple-double",
        applies: is_apple_double_sidecar,
        reason: "contains an illegal colon but is a macOS AppleDouble extended attribute file",
    },
    Exception {
        label: "address-book",
        applies: is_address_book_export,
        reason: "contains an illegal colon but is a macOS Address Book file",
    },
    Exception {
        label: "photos-library",
        applies: is_inside_photos_library,
        reason: "is managed by a macOS Photos library bundle",
    },
    Exception {
        label: "module-manpage",
        applies: is_module_manpage,
        reason: "is third-party documentation that uses `::` by design",
    },
];

fn is_finder_icon(entry: &Entry) -> bool {
    entry.name == "Icon\r"
}

fn is_apple_double_sidecar(entry: &Entry) -> bool {
    let in_apple_double = entry
        .parent
        .components()
        .any(|c| c.as_os_str() == ".AppleDouble");
    // Covers `.Parent::EA`, `name::EA` and `name::EA::attr`.
    in_apple_double && entry.name.contains("::EA")
}

fn is_address_book_export(entry: &Entry) -> bool {
    entry.name.contains(':')
        && ADDRESS_BOOK_EXTENSIONS
            .iter()
            .any(|ext| entry.name.ends_with(ext))
}

fn is_inside_photos_library(entry: &Entry) -> bool {
    entry.path().components().any(|c| {
        Path::new(c.as_os_str())
            .extension()
            .is_some_and(|ext| ext == "photoslibrary")
    })
}

fn is_module_manpage(entry: &Entry) -> bool {
    entry.name.contains("::")
        && MODULE_MANPAGE_SUFFIXES
            .iter()
            .any(|suffix| entry.name.ends_with(suffix))
}

/// Verdict from the exception gate for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Protection {
    pub protected: bool,

    /// One message per matching exception, in table order.
    pub messages: Vec<String>,
}

/// Ordered table of exceptions consulted before any rename is proposed.
#[derive(Clone)]
pub struct ExceptionGate {
    table: Vec<Exception>,
}

impl Default for ExceptionGate {
    fn default() -> Self {
        Self {
            table: BUILTIN_EXCEPTIONS.to_vec(),
        }
    }
}

impl ExceptionGate {
    /// A gate with no exceptions at all.
    pub fn empty() -> Self {
        Self { table: Vec::new() }
    }

    /// Append an exception to the end of the table.
    pub fn with(mut self, exception: Exception) -> Self {
        self.table.push(exception);
        self
    }

    pub fn is_protected(&self, entry: &Entry) -> Protection {
        let messages: Vec<String> = self
            .table
            .iter()
            .filter(|ex| (ex.applies)(entry))
            .map(|ex| format!("{:?} {}. Will not change.", entry.name, ex.reason))
            .collect();
        Protection {
            protected: !messages.is_empty(),
            messages,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.iter().map(|ex| ex.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;

    fn file(parent: &str, name: &str) -> Entry {
        Entry::new(parent, name, EntryKind::File)
    }

    #[test]
    fn finder_icon_is_protected_anywhere() {
        let verdict = ExceptionGate::default().is_protected(&file("/any/where", "Icon\r"));
        assert!(verdict.protected);
        assert_eq!(verdict.messages.len(), 1);
        assert!(verdict.messages[0].contains("Finder"));
    }

    #[test]
    fn plain_icon_is_not_protected() {
        assert!(!ExceptionGate::default().is_protected(&file("/x", "Icon")).protected);
    }

    #[test]
    fn apple_double_needs_both_directory_and_pattern() {
        let gate = ExceptionGate::default();
        assert!(gate.is_protected(&file("/v/.AppleDouble", ".Parent::EA")).protected);
        assert!(gate.is_protected(&file("/v/.AppleDouble", "doc.txt::EA::com.apple")).protected);
        assert!(!gate.is_protected(&file("/v/other", ".Parent::EA")).protected);
        assert!(!gate.is_protected(&file("/v/.AppleDouble", "a:b")).protected);
    }

    #[test]
    fn address_book_requires_colon() {
        let gate = ExceptionGate::default();
        assert!(gate.is_protected(&file("/x", "Card:1.abcdp")).protected);
        assert!(!gate.is_protected(&file("/x", "Card.abcdp")).protected);
    }

    #[test]
    fn photos_library_contents_are_protected() {
        let gate = ExceptionGate::default();
        let entry = file("/Users/me/Pictures/Photos Library.photoslibrary/database", "a|b");
        assert!(gate.is_protected(&entry).protected);
    }

    #[test]
    fn module_manpages_are_protected() {
        assert!(ExceptionGate::default()
            .is_protected(&file("/usr/share/man/man3", "File::Spec.3pm.gz"))
            .protected);
    }

    #[test]
    fn table_is_extensible() {
        fn is_thumbs(entry: &Entry) -> bool {
            entry.name == "Thumbs:db"
        }
        let gate = ExceptionGate::empty().with(Exception {
            label: "thumbs",
            applies: is_thumbs,
            reason: "is a test fixture",
        });
        assert!(gate.is_protected(&file("/x", "Thumbs:db")).protected);
        assert!(!gate.is_protected(&file("/x", "Icon\r")).protected);
        assert_eq!(gate.labels().collect::<Vec<_>>(), vec!["thumbs"]);
    }
}

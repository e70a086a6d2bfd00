//! Exclude/include decisions for entries of an extracted package tree.
//!
//! The decision only looks at metadata: name, size, whether the entry is a directory and the
//! directory it lives in. File contents are never read.

use std::fmt;

use serde::Serialize;

use crate::builtins::{MAX_FILE_SIZE, SMALL_FILE_LIMIT};
use crate::filters::FilterConfig;

/// Metadata of one filesystem entry, as seen by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry<'a> {
    pub is_dir: bool,
    pub size: u64,
    pub base_name: &'a str,
    /// Directory containing the entry. A trailing `/` is significant.
    pub parent_dir: &'a str,
}

impl<'a> FileEntry<'a> {
    pub fn dir(base_name: &'a str, parent_dir: &'a str) -> Self {
        Self {
            is_dir: true,
            size: 0,
            base_name,
            parent_dir,
        }
    }

    pub fn file(base_name: &'a str, size: u64, parent_dir: &'a str) -> Self {
        Self {
            is_dir: false,
            size,
            base_name,
            parent_dir,
        }
    }
}

/// The rule that excluded an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    IgnoredDirname,
    TooLarge,
    IgnoredFilename,
    Readme,
    Changelog,
    ManpageSuffix,
    IgnoredSuffix,
    LargeOnlySmallFilesSuffix,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IgnoredDirname => "ignored directory name",
            Self::TooLarge => "larger than 1 GB",
            Self::IgnoredFilename => "ignored file name",
            Self::Readme => "readme file",
            Self::Changelog => "changelog outside debian/",
            Self::ManpageSuffix => "manpage suffix",
            Self::IgnoredSuffix => "ignored suffix",
            Self::LargeOnlySmallFilesSuffix => "suffix only indexed for small files",
        };
        f.write_str(text)
    }
}

type Rule = fn(&FileEntry<'_>, &FilterConfig) -> bool;

// Order matters: readme has no debian/ exception while changelog does, and the
// CMakeLists.txt rescue only applies to the suffix rule.
const FILE_RULES: &[(Reason, Rule)] = &[
    (Reason::TooLarge, exceeds_max_size),
    (Reason::IgnoredFilename, has_ignored_filename),
    (Reason::Readme, is_readme),
    (Reason::Changelog, is_changelog_outside_debian),
    (Reason::ManpageSuffix, has_manpage_suffix_rule),
    (Reason::IgnoredSuffix, has_ignored_suffix),
    (Reason::LargeOnlySmallFilesSuffix, is_large_only_small_files_suffix),
];

/// Returns true when the entry should be deleted and skipped during indexing.
pub fn classify(entry: &FileEntry<'_>, cfg: &FilterConfig) -> bool {
    explain(entry, cfg).is_some()
}

/// Like [`classify`], but names the first rule that excluded the entry.
pub fn explain(entry: &FileEntry<'_>, cfg: &FilterConfig) -> Option<Reason> {
    if entry.is_dir {
        return cfg
            .is_ignored_dirname(entry.base_name)
            .then_some(Reason::IgnoredDirname);
    }

    FILE_RULES
        .iter()
        .find(|(_, rule)| rule(entry, cfg))
        .map(|(reason, _)| *reason)
}

/// Matches names ending in `.[0-9]`, e.g. `ls.1`. `foo.30` does not match.
pub fn has_manpage_suffix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 2 && bytes[bytes.len() - 2] == b'.' && bytes[bytes.len() - 1].is_ascii_digit()
}

/// Text after the last `.`, if any.
pub fn suffix(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx + 1..])
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.to_lowercase().starts_with(prefix)
}

fn exceeds_max_size(entry: &FileEntry<'_>, _: &FilterConfig) -> bool {
    entry.size > MAX_FILE_SIZE
}

fn has_ignored_filename(entry: &FileEntry<'_>, cfg: &FilterConfig) -> bool {
    cfg.is_ignored_filename(entry.base_name)
}

fn is_readme(entry: &FileEntry<'_>, _: &FilterConfig) -> bool {
    starts_with_ignore_case(entry.base_name, "readme")
}

fn is_changelog_outside_debian(entry: &FileEntry<'_>, _: &FilterConfig) -> bool {
    !entry.parent_dir.ends_with("/debian/") && starts_with_ignore_case(entry.base_name, "changelog")
}

fn has_manpage_suffix_rule(entry: &FileEntry<'_>, _: &FilterConfig) -> bool {
    has_manpage_suffix(entry.base_name)
}

fn has_ignored_suffix(entry: &FileEntry<'_>, cfg: &FilterConfig) -> bool {
    suffix(entry.base_name).is_some_and(|s| cfg.is_ignored_suffix(s))
        && !starts_with_ignore_case(entry.base_name, "cmakelists.txt")
}

fn is_large_only_small_files_suffix(entry: &FileEntry<'_>, cfg: &FilterConfig) -> bool {
    entry.size > SMALL_FILE_LIMIT
        && suffix(entry.base_name).is_some_and(|s| cfg.is_only_small_files_suffix(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn excluded(entry: FileEntry<'_>) -> bool {
        classify(&entry, &FilterConfig::default())
    }

    fn reason(entry: FileEntry<'_>) -> Option<Reason> {
        explain(&entry, &FilterConfig::default())
    }

    #[test]
    fn excludes_ignored_dirnames() {
        assert!(excluded(FileEntry::dir(".git", "/pkg/")));
        assert!(excluded(FileEntry::dir("po", "/pkg/")));
        assert!(excluded(FileEntry::dir("libtool.m4", "/pkg/m4/")));
    }

    #[test]
    fn keeps_other_dirs() {
        assert!(!excluded(FileEntry::dir("src", "/pkg/")));
        assert!(!excluded(FileEntry::dir("debian", "/pkg/")));
    }

    #[test]
    fn file_rules_do_not_apply_to_dirs() {
        assert!(!excluded(FileEntry::dir("README", "/pkg/")));
        assert!(!excluded(FileEntry::dir("man.1", "/pkg/")));
        assert!(!excluded(FileEntry::dir("docs.xml", "/pkg/")));
        assert!(!excluded(FileEntry::dir("NEWS", "/pkg/")));
        assert!(!excluded(FileEntry {
            is_dir: true,
            size: MAX_FILE_SIZE + 1,
            base_name: "src",
            parent_dir: "/pkg/",
        }));
    }

    #[test]
    fn dirname_list_does_not_apply_to_files() {
        assert!(!excluded(FileEntry::file(".pc", 10, "/pkg/")));
    }

    #[test]
    fn excludes_files_above_one_gigabyte() {
        assert_eq!(
            reason(FileEntry::file("main.c", MAX_FILE_SIZE + 1, "/pkg/src/")),
            Some(Reason::TooLarge)
        );
        assert!(!excluded(FileEntry::file("main.c", MAX_FILE_SIZE, "/pkg/src/")));
    }

    #[test]
    fn excludes_ignored_filenames() {
        assert_eq!(
            reason(FileEntry::file("NEWS", 10, "/pkg/")),
            Some(Reason::IgnoredFilename)
        );
        assert!(excluded(FileEntry::file("config.guess", 10, "/pkg/")));
        assert!(excluded(FileEntry::file(".gitignore", 10, "/pkg/")));
        assert!(!excluded(FileEntry::file("configure", 10, "/pkg/")));
    }

    #[test]
    fn excludes_readme_even_in_debian() {
        assert_eq!(
            reason(FileEntry::file("README.md", 10, "/pkg/debian/")),
            Some(Reason::Readme)
        );
        assert!(excluded(FileEntry::file("readme", 10, "/pkg/")));
        assert!(excluded(FileEntry::file("ReadMe.rst", 10, "/pkg/src/")));
    }

    #[test]
    fn keeps_debian_changelog() {
        assert!(!excluded(FileEntry::file("changelog", 10, "/pkg/debian/")));
        assert!(!excluded(FileEntry::file("ChangeLog", 10, "/pkg/debian/")));
    }

    #[test]
    fn excludes_changelog_elsewhere() {
        assert_eq!(
            reason(FileEntry::file("changelog", 10, "/pkg/src/")),
            Some(Reason::Changelog)
        );
        assert!(excluded(FileEntry::file("ChangeLog.old", 10, "/pkg/")));
    }

    #[test]
    fn debian_exception_needs_trailing_separator() {
        assert!(excluded(FileEntry::file("changelog", 10, "/pkg/debian")));
        assert!(excluded(FileEntry::file("changelog", 10, "/pkg/notdebian")));
        assert!(!excluded(FileEntry::file("changelog", 10, "/a/b/debian/")));
    }

    #[test]
    fn excludes_single_digit_manpage_suffix() {
        assert_eq!(
            reason(FileEntry::file("foo.3", 10, "/pkg/")),
            Some(Reason::ManpageSuffix)
        );
        assert!(excluded(FileEntry::file("ls.1", 10, "/pkg/man/")));
        assert!(!excluded(FileEntry::file("foo.30", 10, "/pkg/")));
    }

    #[test]
    fn manpage_suffix_edge_cases() {
        assert!(has_manpage_suffix("a.0"));
        assert!(has_manpage_suffix("a.9"));
        assert!(!has_manpage_suffix(".1"));
        assert!(!has_manpage_suffix("1"));
        assert!(!has_manpage_suffix(""));
        assert!(!has_manpage_suffix("foo.a"));
        assert!(!has_manpage_suffix("foo-1"));
    }

    #[test]
    fn excludes_ignored_suffixes() {
        assert_eq!(
            reason(FileEntry::file("index.html", 10, "/pkg/doc/")),
            Some(Reason::IgnoredSuffix)
        );
        assert!(excluded(FileEntry::file("notes.txt", 10, "/pkg/")));
        assert!(!excluded(FileEntry::file("notes.TXT", 10, "/pkg/")));
    }

    #[test]
    fn keeps_cmakelists() {
        assert!(!excluded(FileEntry::file("CMakeLists.txt", 200_000, "/pkg/")));
        assert!(!excluded(FileEntry::file("cmakelists.txt", 10, "/pkg/")));
        assert!(!excluded(FileEntry::file("CMakeLists.txt.in", 10, "/pkg/")));
    }

    #[test]
    fn suffix_is_text_after_last_dot() {
        assert_eq!(suffix("a.tar.gz"), Some("gz"));
        assert_eq!(suffix("Makefile"), None);
        assert_eq!(suffix("trailing."), Some(""));
        assert_eq!(suffix(".bashrc"), Some("bashrc"));
    }

    #[test]
    fn name_without_dot_has_no_suffix_match() {
        let cfg = FilterConfig::build("", "", "Makefile", "");
        assert!(!classify(&FileEntry::file("Makefile", 10, "/pkg/"), &cfg));
    }

    #[test]
    fn excludes_large_only_small_files_suffix() {
        assert_eq!(
            reason(FileEntry::file("foo.json", 70_000, "/pkg/")),
            Some(Reason::LargeOnlySmallFilesSuffix)
        );
        assert!(!excluded(FileEntry::file("foo.json", 1_000, "/pkg/")));
    }

    #[test]
    fn small_files_limit_is_exclusive() {
        assert!(!excluded(FileEntry::file("data.csv", SMALL_FILE_LIMIT, "/pkg/")));
        assert!(excluded(FileEntry::file("data.csv", SMALL_FILE_LIMIT + 1, "/pkg/")));
    }

    #[test]
    fn keeps_source_files() {
        assert!(!excluded(FileEntry::file("main.c", 10_000, "/pkg/src/")));
        assert!(!excluded(FileEntry::file("lib.rs", 500_000, "/pkg/src/")));
        assert!(!excluded(FileEntry::file("Makefile.am", 10, "/pkg/")));
    }

    #[test]
    fn earlier_rules_win() {
        assert_eq!(
            reason(FileEntry::file("NEWS", MAX_FILE_SIZE + 1, "/pkg/")),
            Some(Reason::TooLarge)
        );
        assert_eq!(
            reason(FileEntry::file("README.txt", 10, "/pkg/")),
            Some(Reason::Readme)
        );
        assert_eq!(
            reason(FileEntry::file("changelog.1", 10, "/pkg/debian/")),
            Some(Reason::ManpageSuffix)
        );
    }

    #[test]
    fn uses_custom_lists() {
        let cfg = FilterConfig::build("build", "Cargo.lock", "lock", "rs");

        assert!(classify(&FileEntry::dir("build", "/pkg/"), &cfg));
        assert!(!classify(&FileEntry::dir(".git", "/pkg/"), &cfg));
        assert!(classify(&FileEntry::file("Cargo.lock", 10, "/pkg/"), &cfg));
        assert!(classify(&FileEntry::file("yarn.lock", 10, "/pkg/"), &cfg));
        assert!(classify(&FileEntry::file("big.rs", 70_000, "/pkg/"), &cfg));
        assert!(!classify(&FileEntry::file("notes.txt", 10, "/pkg/"), &cfg));
    }

    #[test]
    fn concurrent_callers_share_one_config() {
        let cfg = FilterConfig::default();
        let names = ["main.c", "NEWS", "foo.3", "README", "foo.json", "lib.rs"];

        let results: Vec<Vec<bool>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        names
                            .iter()
                            .map(|n| classify(&FileEntry::file(n, 70_000, "/pkg/"), &cfg))
                            .collect::<Vec<bool>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for r in &results {
            assert_eq!(r, &vec![false, true, true, true, true, false]);
        }
    }

    #[test]
    fn reason_displays_readable_text() {
        assert_eq!(Reason::Readme.to_string(), "readme file");
        assert_eq!(Reason::IgnoredDirname.to_string(), "ignored directory name");
    }

    proptest! {
        #[test]
        fn oversized_files_are_always_excluded(
            name in "\\PC*",
            parent in "\\PC*",
            size in (MAX_FILE_SIZE + 1)..u64::MAX,
        ) {
            let entry = FileEntry::file(&name, size, &parent);
            prop_assert_eq!(reason(entry), Some(Reason::TooLarge));
        }

        #[test]
        fn ignored_dirnames_ignore_size_and_parent(
            idx in 0usize..4,
            parent in "\\PC*",
            size in any::<u64>(),
        ) {
            let name = [".pc", "po", ".git", "libtool.m4"][idx];
            let entry = FileEntry { is_dir: true, size, base_name: name, parent_dir: &parent };
            prop_assert!(excluded(entry));
        }

        #[test]
        fn single_digit_suffix_is_excluded(stem in "[a-z_]{1,12}", digit in 0u8..10) {
            let name = format!("{stem}.{digit}");
            prop_assert!(excluded(FileEntry::file(&name, 10, "/pkg/src/")));
        }

        #[test]
        fn multi_digit_suffix_is_kept(stem in "[b-q]{1,12}", number in 10u32..100_000) {
            let name = format!("{stem}.{number}");
            prop_assert!(!excluded(FileEntry::file(&name, 10, "/pkg/src/")));
        }

        #[test]
        fn classify_agrees_with_explain(
            name in "\\PC{0,20}",
            parent in "(/[a-z]{1,6}){0,3}/",
            size in any::<u64>(),
            is_dir in any::<bool>(),
        ) {
            let entry = FileEntry { is_dir, size, base_name: &name, parent_dir: &parent };
            let cfg = FilterConfig::default();
            prop_assert_eq!(classify(&entry, &cfg), explain(&entry, &cfg).is_some());
            prop_assert_eq!(classify(&entry, &cfg), classify(&entry, &cfg));
        }
    }
}

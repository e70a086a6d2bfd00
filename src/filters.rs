use std::collections::HashSet;

use crate::builtins;

/// The four blacklists consulted by the classifier.
///
/// Built once from comma-separated lists and never mutated afterwards, so a single value can be
/// shared by reference between any number of walker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    ignored_dirnames: HashSet<String>,
    ignored_filenames: HashSet<String>,
    ignored_suffixes: HashSet<String>,
    only_small_files_suffixes: HashSet<String>,
}

/// Splits on `,` and keeps every token verbatim, including empty ones.
fn split_list(list: &str) -> HashSet<String> {
    list.split(',').map(str::to_string).collect()
}

impl FilterConfig {
    pub fn build(
        dirnames: &str,
        filenames: &str,
        suffixes: &str,
        only_small_files_suffixes: &str,
    ) -> Self {
        Self {
            ignored_dirnames: split_list(dirnames),
            ignored_filenames: split_list(filenames),
            ignored_suffixes: split_list(suffixes),
            only_small_files_suffixes: split_list(only_small_files_suffixes),
        }
    }

    pub fn is_ignored_dirname(&self, name: &str) -> bool {
        self.ignored_dirnames.contains(name)
    }

    pub fn is_ignored_filename(&self, name: &str) -> bool {
        self.ignored_filenames.contains(name)
    }

    pub fn is_ignored_suffix(&self, suffix: &str) -> bool {
        self.ignored_suffixes.contains(suffix)
    }

    pub fn is_only_small_files_suffix(&self, suffix: &str) -> bool {
        self.only_small_files_suffixes.contains(suffix)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::build(
            builtins::IGNORED_DIRNAMES,
            builtins::IGNORED_FILENAMES,
            builtins::IGNORED_SUFFIXES,
            builtins::ONLY_SMALL_FILES_SUFFIXES,
        )
    }
}

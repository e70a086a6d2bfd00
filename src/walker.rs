//! Walks an extracted package tree and applies the classifier to every entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::classifier::{self, FileEntry, Reason};
use crate::disksize;
use crate::filters::FilterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excluded {
    pub path: PathBuf,
    pub is_dir: bool,
    pub reason: Reason,
    /// Size of the file, or of everything below an excluded directory.
    pub bytes: u64,
}

#[derive(Debug, Default)]
pub struct Scan {
    pub excluded: Vec<Excluded>,
    pub kept: usize,
    pub warnings: Vec<String>,
}

impl Scan {
    pub fn excluded_bytes(&self) -> u64 {
        self.excluded
            .iter()
            .map(|e| e.bytes)
            .fold(0u64, u64::saturating_add)
    }
}

/// Absolute directory path with exactly one trailing `/`, as the classifier expects.
///
/// Relative paths are resolved against the working directory so `debian/changelog` and
/// `./debian/changelog` see the same parent. Symlinks are not resolved.
fn parent_with_separator(dir: &Path) -> io::Result<String> {
    let dir = std::path::absolute(dir)?;
    let dir = dir.to_string_lossy();
    Ok(format!("{}/", dir.trim_end_matches('/')))
}

/// Classifies one path using its own metadata; symlinks are not followed.
pub fn classify_path(path: &Path, cfg: &FilterConfig) -> io::Result<Option<Reason>> {
    let metadata = fs::symlink_metadata(path)?;
    let path = std::path::absolute(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = match path.parent() {
        Some(dir) => parent_with_separator(dir)?,
        None => String::new(),
    };

    let entry = FileEntry {
        is_dir: metadata.is_dir(),
        size: metadata.len(),
        base_name: &name,
        parent_dir: &parent,
    };
    Ok(classifier::explain(&entry, cfg))
}

/// Collects every excluded entry below `root`, without descending into excluded directories.
/// The root itself is never classified.
pub fn scan(root: &Path, cfg: &FilterConfig) -> io::Result<Scan> {
    let mut result = Scan::default();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
    let mut is_root = true;

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if is_root => return Err(e),
            Err(e) => {
                result.warnings.push(format!("{}: {e}", dir.display()));
                continue;
            }
        };

        let mut listed = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => listed.push(entry),
                Err(e) => result.warnings.push(format!("{}: {e}", dir.display())),
            }
        }
        listed.sort_by_key(fs::DirEntry::file_name);

        let parent = match parent_with_separator(&dir) {
            Ok(parent) => parent,
            Err(e) if is_root => return Err(e),
            Err(e) => {
                result.warnings.push(format!("{}: {e}", dir.display()));
                continue;
            }
        };
        is_root = false;
        let mut subdirs = Vec::new();

        for entry in listed {
            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    result.warnings.push(format!("{}: {e}", path.display()));
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = metadata.is_dir();

            let file_entry = FileEntry {
                is_dir,
                size: metadata.len(),
                base_name: &name,
                parent_dir: &parent,
            };

            match classifier::explain(&file_entry, cfg) {
                Some(reason) => {
                    tracing::debug!("exclude {} ({reason})", path.display());
                    let bytes = if is_dir {
                        disksize::dir_size(&path)
                    } else {
                        metadata.len()
                    };
                    result.excluded.push(Excluded {
                        path,
                        is_dir,
                        reason,
                        bytes,
                    });
                }
                None => {
                    tracing::trace!("keep {}", path.display());
                    result.kept += 1;
                    if is_dir {
                        subdirs.push(path);
                    }
                }
            }
        }

        // Reversed so the stack pops subdirectories in name order.
        stack.extend(subdirs.into_iter().rev());
    }

    Ok(result)
}

/// Deletes an excluded entry from the working copy.
pub fn remove(excluded: &Excluded) -> io::Result<()> {
    if excluded.is_dir {
        fs::remove_dir_all(&excluded.path)
    } else {
        fs::remove_file(&excluded.path)
    }
}

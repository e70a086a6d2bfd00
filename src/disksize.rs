use std::fs;
use std::path::{Path, PathBuf};

/// Total size of the regular files below `path`. Symlinks are not followed.
pub fn dir_size(path: &Path) -> u64 {
    let mut total = 0u64;
    let mut stack: Vec<PathBuf> = vec![path.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let Ok(ft) = entry.file_type() else {
                continue;
            };

            if ft.is_dir() {
                stack.push(entry.path());
            } else if ft.is_file() {
                let Ok(metadata) = entry.metadata() else {
                    continue;
                };
                total = total.saturating_add(metadata.len());
            }
        }
    }

    total
}

pub fn format_size(bytes: u64) -> String {
    const GB: f64 = 1_073_741_824.0;
    const MB: f64 = 1_048_576.0;
    const KB: f64 = 1_024.0;

    if bytes < 1_024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64;

    if value >= GB {
        format!("{:.1} GB", value / GB)
    } else if value >= MB {
        format!("{:.1} MB", value / MB)
    } else {
        format!("{:.1} KB", value / KB)
    }
}

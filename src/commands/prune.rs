use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::ProgressBar;

use pkgprune::config::Config;
use pkgprune::{disksize, walker};

pub fn execute(
    config: &Config,
    dir: &Path,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("{}: not a directory", dir.display()).into());
    }

    let filters = config.filters();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Scanning...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let scan = walker::scan(dir, &filters)?;

    spinner.finish_and_clear();

    for warning in &scan.warnings {
        eprintln!("{} {warning}", style("warning:").yellow().bold());
    }

    tracing::info!(
        "{} excluded, {} kept below {}",
        scan.excluded.len(),
        scan.kept,
        dir.display()
    );

    if scan.excluded.is_empty() {
        println!("{}", style("Nothing to prune.").dim());
        return Ok(());
    }

    if dry_run {
        for entry in &scan.excluded {
            println!(
                "{} {}",
                entry.path.display(),
                style(format!("({})", entry.reason)).dim()
            );
        }
        println!(
            "{} {} {} ({})",
            style("Would remove").cyan().bold(),
            scan.excluded.len(),
            if scan.excluded.len() == 1 { "entry" } else { "entries" },
            disksize::format_size(scan.excluded_bytes())
        );
        return Ok(());
    }

    let mut removed = 0usize;
    let mut freed = 0u64;

    for entry in &scan.excluded {
        if let Err(e) = walker::remove(entry) {
            eprintln!(
                "{} {}: {e}",
                style("warning:").yellow().bold(),
                entry.path.display()
            );
            continue;
        }
        removed += 1;
        freed = freed.saturating_add(entry.bytes);
    }

    println!(
        "{} {} {} ({} freed)",
        style("Removed").green().bold(),
        removed,
        if removed == 1 { "entry" } else { "entries" },
        disksize::format_size(freed)
    );

    Ok(())
}

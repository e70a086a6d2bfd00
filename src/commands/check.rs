use std::path::PathBuf;

use console::style;
use serde::Serialize;

use pkgprune::classifier::Reason;
use pkgprune::config::Config;
use pkgprune::walker;

#[derive(Serialize)]
struct Verdict<'a> {
    path: &'a str,
    excluded: bool,
    reason: Option<Reason>,
}

pub fn execute(
    config: &Config,
    paths: &[PathBuf],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filters = config.filters();

    for path in paths {
        let reason = walker::classify_path(path, &filters)
            .map_err(|e| format!("{}: {e}", path.display()))?;

        if json {
            let display = path.to_string_lossy();
            let verdict = Verdict {
                path: &display,
                excluded: reason.is_some(),
                reason,
            };
            println!("{}", serde_json::to_string(&verdict)?);
            continue;
        }

        match reason {
            Some(reason) => println!(
                "{} {}",
                path.display(),
                style(format!("excluded ({reason})")).red()
            ),
            None => println!("{} {}", path.display(), style("kept").green()),
        }
    }

    Ok(())
}

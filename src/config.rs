use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use serde::{Deserialize, Serialize};

use crate::builtins;
use crate::filters::FilterConfig;

/// The four comma-separated lists, as read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignored_dirnames: String,
    pub ignored_filenames: String,
    pub ignored_suffixes: String,
    pub only_small_files_suffixes: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignored_dirnames: builtins::IGNORED_DIRNAMES.to_string(),
            ignored_filenames: builtins::IGNORED_FILENAMES.to_string(),
            ignored_suffixes: builtins::IGNORED_SUFFIXES.to_string(),
            only_small_files_suffixes: builtins::ONLY_SMALL_FILES_SUFFIXES.to_string(),
        }
    }
}

/// Per-list replacements given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ignored_dirnames: Option<String>,
    pub ignored_filenames: Option<String>,
    pub ignored_suffixes: Option<String>,
    pub only_small_files_suffixes: Option<String>,
}

impl Config {
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(list) = overrides.ignored_dirnames {
            self.ignored_dirnames = list;
        }
        if let Some(list) = overrides.ignored_filenames {
            self.ignored_filenames = list;
        }
        if let Some(list) = overrides.ignored_suffixes {
            self.ignored_suffixes = list;
        }
        if let Some(list) = overrides.only_small_files_suffixes {
            self.only_small_files_suffixes = list;
        }
    }

    pub fn filters(&self) -> FilterConfig {
        FilterConfig::build(
            &self.ignored_dirnames,
            &self.ignored_filenames,
            &self.ignored_suffixes,
            &self.only_small_files_suffixes,
        )
    }
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".config/pkgprune/config.toml")
}

pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
    load_from(&config_path())
}

/// Loads a config file the user named explicitly; a missing file is worth a warning.
pub fn load_explicit(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if !path.exists() {
        eprintln!(
            "{} {} does not exist, using defaults",
            style("warning:").yellow().bold(),
            path.display()
        );
    }
    load_from(path)
}

pub fn load_from(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) => {
            eprintln!(
                "{} failed to parse {}: {e}",
                style("warning:").yellow().bold(),
                path.display()
            );
            Ok(Config::default())
        }
    }
}

pub fn to_toml(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    Ok(toml::to_string_pretty(config)?)
}

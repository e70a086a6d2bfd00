use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pkgprune::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "pkgprune", version)]
#[command(about = "Prune generated and non-source files from extracted package trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Read configuration from this file instead of ~/.config/pkgprune/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// (comma-separated list of) names of directories that will be deleted from packages
    #[arg(long, global = true, value_name = "LIST")]
    pub ignored_dirnames: Option<String>,

    /// (comma-separated list of) names of files that will be deleted from packages
    #[arg(long, global = true, value_name = "LIST")]
    pub ignored_filenames: Option<String>,

    /// (comma-separated list of) suffixes of files that will be deleted from packages
    #[arg(long, global = true, value_name = "LIST")]
    pub ignored_suffixes: Option<String>,

    /// (comma-separated list of) suffixes of files that will not be indexed above 65 KB
    #[arg(long, global = true, value_name = "LIST")]
    pub only_small_files_suffixes: Option<String>,
}

impl From<FilterArgs> for Overrides {
    fn from(args: FilterArgs) -> Self {
        Self {
            ignored_dirnames: args.ignored_dirnames,
            ignored_filenames: args.ignored_filenames,
            ignored_suffixes: args.ignored_suffixes,
            only_small_files_suffixes: args.only_small_files_suffixes,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show whether paths would be excluded, and why
    Check {
        /// Paths to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print one JSON object per path
        #[arg(long)]
        json: bool,
    },
    /// Delete excluded files and directories from an extracted package
    Prune {
        /// Root of the extracted package
        dir: PathBuf,
        /// List what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

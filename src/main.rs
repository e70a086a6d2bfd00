use clap::Parser;
use console::style;

use pkgprune::config;

mod cli;
mod commands;

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => config::load_explicit(path)?,
        None => config::load()?,
    };
    config.apply(cli.filters.into());

    match cli.command {
        cli::Commands::Check { ref paths, json } => commands::check::execute(&config, paths, json),
        cli::Commands::Prune { ref dir, dry_run } => {
            commands::prune::execute(&config, dir, dry_run)
        }
        cli::Commands::Config => commands::config::execute(&config),
    }
}

fn main() {
    let cli = cli::Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", style("error:").red().bold());
        std::process::exit(1);
    }
}

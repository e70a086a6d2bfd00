use pkgprune::config::{self, Config};

pub fn execute(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", config::to_toml(config)?);
    Ok(())
}

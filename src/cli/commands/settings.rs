//! Configuration command.

use crate::config::{self, Config};

use super::Cli;

/// Print the effective configuration as TOML
pub fn cmd_config(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = cli.config.clone().or_else(config::config_path);
    match path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory)"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

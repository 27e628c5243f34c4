//! `rowcast config` subcommands.

use anyhow::{Context, Result};

use crate::config::{Config, paths};

/// Prints where the config is read from, whether or not the file exists.
pub fn path() {
    println!("{}", paths::config_path().display());
}

/// Writes the commented template. An existing file is never replaced.
pub fn init() -> Result<()> {
    let target = paths::config_path();
    Config::init(&target)?;
    println!("Wrote default rowcast config to {}", target.display());
    Ok(())
}

/// Prints the settings `rowcast demo` starts from: file values over
/// defaults, before any flags.
pub fn show() -> Result<()> {
    let config = Config::load().context("load config")?;
    let rendered = toml::to_string_pretty(&config).context("serialize config")?;
    print!("{rendered}");
    Ok(())
}

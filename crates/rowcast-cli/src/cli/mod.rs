//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{self, Config};
use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "rowcast")]
#[command(version)]
#[command(about = "Concurrent in-place terminal lines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run concurrent progress producers that share one block of rows
    Demo(commands::demo::DemoArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective settings as TOML
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(),
        },
        Commands::Demo(args) => {
            let config = Config::load().context("load config")?;
            let _guard = logging::init(&config::paths::log_dir())?;

            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(commands::demo::run(args.resolve(&config)))
        }
    }
}

//! creplay CLI entry point

use anyhow::Result;
use clap::Parser;

use creplay::cli::{Cli, Commands, ConfigCommands};
use creplay::logging::{self, LogTarget};
use creplay::Config;

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // The player owns the terminal, so stderr logging would corrupt the screen
    let target = match &cli.command {
        Commands::Play { .. } => LogTarget::Silent,
        _ => LogTarget::Stderr,
    };
    logging::init(&config.log, target)?;

    match cli.command {
        Commands::Play {
            recording,
            speed,
            at,
        } => commands::play::handle(&recording, speed, at, &config),
        Commands::Show {
            recording,
            at,
            file,
        } => commands::show::handle(&recording, at, file.as_deref(), &config),
        Commands::Info { recording } => commands::info::handle(&recording),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Replay recorded coding sessions in the terminal
#[derive(Parser, Debug)]
#[command(name = "creplay", version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a recording in the interactive player
    Play {
        /// Recording to play (.srt, .csv or .json)
        #[arg(value_name = "FILE")]
        recording: PathBuf,
        /// Playback speed (overrides the configured speed)
        #[arg(long, value_name = "X")]
        speed: Option<f64>,
        /// Start at this point of the recording
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        at: Option<u64>,
    },
    /// Print the files of a recording as they stand at a point in time
    Show {
        /// Recording to read (.srt, .csv or .json)
        #[arg(value_name = "FILE")]
        recording: PathBuf,
        /// Point of the recording to show (default: the end)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        at: Option<u64>,
        /// Only print this file
        #[arg(long = "file", value_name = "NAME")]
        file: Option<String>,
    },
    /// Summarize a recording
    Info {
        /// Recording to read (.srt, .csv or .json)
        #[arg(value_name = "FILE")]
        recording: PathBuf,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

/// Parse a point in a recording into milliseconds.
///
/// Accepts `1500ms`, plain seconds (`90`, `1.5`), `MM:SS[.fff]` and
/// `HH:MM:SS[,fff]`.
pub fn parse_time(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let invalid = || {
        format!(
            "invalid time {:?} (expected 1500ms, 90, 1.5, MM:SS or HH:MM:SS)",
            value
        )
    };

    if let Some(ms) = value.strip_suffix("ms") {
        return ms.trim().parse().map_err(|_| invalid());
    }

    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds) = match parts[..] {
        [s] => ("0", "0", s),
        [m, s] => ("0", m, s),
        [h, m, s] => (h, m, s),
        _ => return Err(invalid()),
    };

    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.replace(',', ".").parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 || (parts.len() > 1 && seconds >= 60.0) {
        return Err(invalid());
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + (seconds * 1000.0).round() as u64)
}

//! Config subcommands handler

use anyhow::Result;

use creplay::tui::current_theme;
use creplay::Config;

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = config.to_toml()?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Print the path of the default config file.
pub fn handle_path() -> Result<()> {
    let config_path = Config::config_path()?;
    println!("{}", config_path.display());
    Ok(())
}

//! Configuration commands.

use dayagenda_core::EventFilter;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Render(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Checks the agenda settings, including the ignore patterns.
pub fn check(config: &ClientConfig) -> ClientResult<()> {
    config.agenda.validate()?;
    EventFilter::from_config(&config.agenda)?;
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    check(config)?;
    println!(
        "Configuration is valid ({} calendar sources).",
        config.agenda.entities.len()
    );
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    println!("events: {}", ClientConfig::default_events_dir().display());
    Ok(())
}

//! dayagenda CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use dayagenda_client::cli::{Cli, Command, ConfigAction};
use dayagenda_client::commands;
use dayagenda_client::config::ClientConfig;
use dayagenda_client::error::ClientResult;
use dayagenda_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    cli.apply_to(&mut config);

    init_tracing(TracingConfig::cli(config.debug))?;

    match &cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        None => {
            let clock = cli.clock()?;
            commands::agenda::show(&config, &clock, cli.json).await
        }
    }
}

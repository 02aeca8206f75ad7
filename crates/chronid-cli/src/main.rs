#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::commands::execute;
use cli::config::{CliArgs, Config};
use cli::telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry(&config.log)?;
    if cfg!(debug_assertions) {
        tracing::debug!("Starting chronid with full config: {:#?}", config);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&config.command, &mut out)
}

mod args;
mod commands;

use crate::args::{Cli, Command};
use anyhow::Result;
use clap::Parser;
use entitle_kernel::config::load_config;
use entitle_kernel::domain::config::{AppConfig, LogConfig};
use entitle_licensing::LicenseState;
use entitle_licensing::provider::StaticLicenseProvider;
use entitle_logger::{Logger, parse_level};
use std::sync::Arc;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: AppConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config.log)?;

    let provider = StaticLicenseProvider::from(&config.entitlements);
    debug!(features = %provider.features().bits(), quotas = provider.quotas().len(), "Entitlements loaded");

    let state = LicenseState::new();
    state.set_license_provider(Arc::new(provider));

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Report { json } => commands::report(&state, json, &mut stdout)?,
        Command::Check { features } => commands::check(&state, &features, &mut stdout)?,
        Command::Value { key } => commands::value(&state, &key, &mut stdout)?,
    }

    Ok(())
}

fn init_logger(config: &LogConfig) -> Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .console(config.console)
        .level(parse_level(&config.level)?);

    let logger = match &config.path {
        Some(path) => builder.path(path).json(config.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

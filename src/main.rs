//! Technical indicator CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use ta_config::{load_config, AppConfig, LogFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing default config is fine; an explicitly broken one is not
    let mut config = if cli.config.exists() {
        load_config(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    let _guard = setup_logging(&config.logging)?;

    match cli.command {
        Commands::List(args) => cli::commands::list::run(args, &config),
        Commands::Calc(args) => cli::commands::calc::run(args, &config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}

//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::load_config;
use ta_registry::IndicatorRegistry;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    // Overrides are only checked once merged over the built-in defaults
    let registry = match IndicatorRegistry::new().with_overrides(&config.indicators.defaults) {
        Ok(registry) => registry,
        Err(e) => {
            println!("Indicator defaults error: {}", e);
            return Err(e.into());
        }
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Log level: {}", config.logging.level);
    println!("Log format: {:?}", config.logging.format);
    if let Some(file) = &config.logging.file {
        println!("Log file: {}", file);
    }

    let mut overridden: Vec<&String> = config.indicators.defaults.keys().collect();
    overridden.sort();
    println!("Indicator overrides: {}", overridden.len());
    for type_id in overridden {
        let params = registry.default_params(type_id)?;
        println!("  {}: {}", type_id, serde_json::to_string(&params)?);
    }

    Ok(())
}

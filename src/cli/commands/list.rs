//! List indicators command.

use anyhow::Result;
use ta_config::AppConfig;
use ta_registry::IndicatorRegistry;

use crate::cli::{ListArgs, OutputFormat};

pub fn run(args: ListArgs, config: &AppConfig) -> Result<()> {
    let registry = IndicatorRegistry::new().with_overrides(&config.indicators.defaults)?;

    if let OutputFormat::Json = args.output {
        println!("{}", serde_json::to_string_pretty(registry.list())?);
        return Ok(());
    }

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "  {:<12} {:<10} {:<11} {:<8} NAME",
        "TYPE", "SHORT", "CATEGORY", "OVERLAY"
    );
    println!("  ───────────────────────────────────────────────────────");

    for entry in registry.list() {
        println!(
            "  {:<12} {:<10} {:<11} {:<8} {}",
            entry.type_id.as_str(),
            entry.short_name,
            entry.category.to_string(),
            if entry.is_overlay { "yes" } else { "no" },
            entry.display_name
        );
    }

    println!();
    println!("Use `ta calc --indicator <type>` to calculate one.");

    Ok(())
}

//! Calculate indicator command.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use ta_config::AppConfig;
use ta_core::{Diagnostic, Diagnostics, IndicatorPoint, Output, Severity};
use ta_data::CsvDataSource;
use ta_registry::IndicatorRegistry;
use tracing::info;

use crate::cli::{CalcArgs, OutputFormat};

pub fn run(args: CalcArgs, config: &AppConfig) -> Result<()> {
    let registry = IndicatorRegistry::new().with_overrides(&config.indicators.defaults)?;
    let entry = registry.get(&args.indicator)?;

    let overrides: Option<Value> = args
        .params
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--params is not valid JSON")?;
    let params = registry.params(&args.indicator, overrides.as_ref())?;

    let bars = CsvDataSource::new(&args.data)?.load_all()?;
    info!(
        indicator = entry.type_id.as_str(),
        bars = bars.len(),
        "Calculating"
    );

    let mut diagnostics = Diagnostics::new();
    let output = entry.calculate.call(&bars, &params, &mut diagnostics)?;
    let output = match args.last {
        Some(n) => tail(output, n),
        None => output,
    };

    match args.output {
        OutputFormat::Json => {
            let report = json!({
                "indicator": entry.type_id,
                "params": params,
                "bars": bars.len(),
                "output": output,
                "diagnostics": diagnostics.entries(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{} ({})", entry.display_name, entry.short_name);
            println!("Params: {}", serde_json::to_string(&params)?);
            println!("Bars: {}", bars.len());

            for (name, points) in output.lines() {
                println!();
                println!("  {} ({} points)", name, points.len());
                println!("  ───────────────────────────────────────");
                for point in points {
                    println!("  {:>12}  {:>14.4}", point.time, point.value);
                }
            }

            for diagnostic in diagnostics.at_least(Severity::Info) {
                eprintln!("{}", diagnostic_line(diagnostic));
            }
        }
    }

    Ok(())
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    format!("{}: {}", diagnostic.severity, diagnostic)
}

/// Keep the last `n` points of every line.
fn tail(output: Output, n: usize) -> Output {
    fn last(points: Vec<IndicatorPoint>, n: usize) -> Vec<IndicatorPoint> {
        let skip = points.len().saturating_sub(n);
        points.into_iter().skip(skip).collect()
    }

    match output {
        Output::Single(points) => Output::Single(last(points, n)),
        Output::Multi(lines) => Output::Multi(
            lines
                .into_iter()
                .map(|mut line| {
                    line.points = last(line.points, n);
                    line
                })
                .collect(),
        ),
    }
}

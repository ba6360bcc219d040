//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ta")]
#[command(author, version, about = "Technical indicator calculation engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TA_CONFIG", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available indicators
    List(ListArgs),
    /// Calculate an indicator over a CSV file of bars
    Calc(CalcArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CalcArgs {
    /// Indicator type id (e.g. rsi, macd, bollinger)
    #[arg(short, long)]
    pub indicator: String,

    /// Data file (CSV with date, open, high, low, close, volume columns)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Parameter overrides as a JSON object, e.g. '{"period": 21}'
    #[arg(short, long)]
    pub params: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Only print the last N points of each line
    #[arg(long)]
    pub last: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc() {
        let cli = Cli::parse_from([
            "ta", "-l", "debug", "calc", "-i", "rsi", "-d", "bars.csv", "--params", "{\"period\": 7}",
            "--output", "json",
        ]);

        assert_eq!(cli.log_level.map(LogLevel::as_str), Some("debug"));
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.indicator, "rsi");
                assert_eq!(args.data, PathBuf::from("bars.csv"));
                assert_eq!(args.params.as_deref(), Some("{\"period\": 7}"));
                assert!(matches!(args.output, OutputFormat::Json));
                assert!(args.last.is_none());
            }
            _ => panic!("expected calc"),
        }
    }
}

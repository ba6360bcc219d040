//! Bar data sources.
//!
//! Loads OHLCV bars from CSV files into time-ordered series ready for the
//! indicator engine.

mod csv_source;

pub use csv_source::CsvDataSource;

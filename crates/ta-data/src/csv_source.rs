//! CSV data source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use ta_core::{validate_series, Bar, DataError};
use tracing::{debug, info};

/// Unix timestamps above this are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "time",
        alias = "Time",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

/// CSV data source for historical bars.
///
/// Accepts a `date` column holding calendar dates, date-times, RFC 3339
/// strings, or unix timestamps in seconds or milliseconds. Bars are sorted
/// by time and the resulting series is validated: duplicate times and
/// negative volumes are rejected.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all bars from the CSV file.
    pub fn load_all(&self) -> Result<Vec<Bar>, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let bars = Self::read_bars(reader)?;
        info!(path = %self.path.display(), bars = bars.len(), "Loaded bars");
        Ok(bars)
    }

    /// Load bars from any reader producing CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self::read_bars(reader)
    }

    fn read_bars<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Bar>, DataError> {
        let mut bars = Vec::new();

        for (line, result) in reader.deserialize().enumerate() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let time = parse_timestamp(&record.date).map_err(|e| {
                DataError::ParseError(format!("record {}: {}", line + 1, e))
            })?;

            bars.push(Bar::new(
                time,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable("CSV input has no rows".to_string()));
        }

        // Sort by timestamp
        if !bars.windows(2).all(|w| w[0].time <= w[1].time) {
            debug!("Sorting unordered CSV rows by time");
            bars.sort_by_key(|b| b.time);
        }

        validate_series(&bars)?;
        Ok(bars)
    }
}

/// Parse various timestamp formats into unix seconds.
fn parse_timestamp(date_str: &str) -> Result<i64, String> {
    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        return Ok(if ts > MILLIS_THRESHOLD { ts / 1000 } else { ts });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp());
            }
        }
    }

    Err(format!("could not parse date: {date_str}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        // 2024-01-15T00:00:00Z
        assert_eq!(parse_timestamp("2024-01-15"), Ok(1_705_276_800));
        assert_eq!(parse_timestamp("2024/01/15"), Ok(1_705_276_800));
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Ok(1_705_314_600));
        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z"), Ok(1_705_314_600));
        assert_eq!(parse_timestamp("1705312800000"), Ok(1_705_312_800)); // Unix ms
        assert_eq!(parse_timestamp("1705312800"), Ok(1_705_312_800)); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_from_reader_sorts_rows() {
        let csv = "\
Date,Open,High,Low,Close,Volume
2024-01-03,11,12,10,11.5,300
2024-01-01,10,11,9,10.5,100
2024-01-02,10.5,11.5,10,11,200
";
        let bars = CsvDataSource::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(bars.len(), 3);
        assert!(bars.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[2].volume, 300.0);
    }

    #[test]
    fn test_lowercase_headers_and_missing_volume() {
        let csv = "time,open,high,low,close\n1705312800,1,2,0.5,1.5\n";
        let bars = CsvDataSource::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(bars[0].time, 1_705_312_800);
        assert_eq!(bars[0].volume, 0.0);
    }

    #[test]
    fn test_rejects_duplicates_and_bad_rows() {
        let duplicate = "date,open,high,low,close,volume\n2024-01-01,1,1,1,1,1\n2024-01-01,2,2,2,2,2\n";
        assert!(matches!(
            CsvDataSource::from_reader(duplicate.as_bytes()),
            Err(DataError::DuplicateTime { .. })
        ));

        let negative = "date,open,high,low,close,volume\n2024-01-01,1,1,1,1,-5\n";
        assert!(matches!(
            CsvDataSource::from_reader(negative.as_bytes()),
            Err(DataError::NegativeVolume { .. })
        ));

        let garbage = "date,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n";
        assert!(matches!(
            CsvDataSource::from_reader(garbage.as_bytes()),
            Err(DataError::ParseError(_))
        ));

        let empty = "date,open,high,low,close,volume\n";
        assert!(matches!(
            CsvDataSource::from_reader(empty.as_bytes()),
            Err(DataError::NoDataAvailable(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvDataSource::new("/nonexistent/bars.csv"),
            Err(DataError::NoDataAvailable(_))
        ));
    }
}

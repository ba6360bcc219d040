//! OHLCV (Open, High, Low, Close, Volume) bar type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One OHLCV bar.
///
/// Bars are borrowed by indicator calculations for the duration of a call;
/// the engine never retains them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in seconds
    pub time: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price: (high + low + close) / 3.
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Median price: (high + low) / 2.
    #[inline]
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Bar range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
    ///
    /// Without a previous close (first bar) this is `high - low`.
    #[inline]
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }

    /// The bar time as a UTC datetime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// The UTC calendar day the bar opens on.
    pub fn utc_day(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date_naive())
    }
}

/// Check that bar times strictly increase and volumes are non-negative.
///
/// Indicators do not call this; it is meant for loaders that build a
/// series from external data.
pub fn validate_series(bars: &[Bar]) -> Result<(), DataError> {
    for (index, bar) in bars.iter().enumerate() {
        if bar.volume < 0.0 {
            return Err(DataError::NegativeVolume {
                index,
                volume: bar.volume,
            });
        }
        if index == 0 {
            continue;
        }
        let previous = bars[index - 1].time;
        if bar.time == previous {
            return Err(DataError::DuplicateTime {
                index,
                time: bar.time,
            });
        }
        if bar.time < previous {
            return Err(DataError::OutOfOrder {
                index,
                previous,
                time: bar.time,
            });
        }
    }
    Ok(())
}

//! Price source selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bar;

/// Which value of a [`Bar`] an indicator computes on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// Median price: `(high + low) / 2`.
    Hl2,
    /// Typical price: `(high + low + close) / 3`.
    Hlc3,
    /// Average price: `(open + high + low + close) / 4`.
    Ohlc4,
}

impl PriceSource {
    /// Extract this source's value from a bar.
    #[inline]
    pub fn extract(self, bar: &Bar) -> f64 {
        match self {
            Self::Open => bar.open,
            Self::High => bar.high,
            Self::Low => bar.low,
            Self::Close => bar.close,
            Self::Hl2 => bar.median_price(),
            Self::Hlc3 => bar.typical_price(),
            Self::Ohlc4 => (bar.open + bar.high + bar.low + bar.close) / 4.0,
        }
    }

    /// Extract this source from every bar.
    pub fn values(self, bars: &[Bar]) -> Vec<f64> {
        bars.iter().map(|bar| self.extract(bar)).collect()
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Hl2 => "hl2",
            Self::Hlc3 => "hlc3",
            Self::Ohlc4 => "ohlc4",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Bar {
        Bar::new(0, 10.0, 30.0, 5.0, 20.0, 0.0)
    }

    #[test]
    fn test_extract_raw_fields() {
        assert_eq!(PriceSource::Open.extract(&bar()), 10.0);
        assert_eq!(PriceSource::High.extract(&bar()), 30.0);
        assert_eq!(PriceSource::Low.extract(&bar()), 5.0);
        assert_eq!(PriceSource::Close.extract(&bar()), 20.0);
    }

    #[test]
    fn test_extract_derived() {
        // (30 + 5) / 2
        assert_eq!(PriceSource::Hl2.extract(&bar()), 17.5);
        // (30 + 5 + 20) / 3
        assert!((PriceSource::Hlc3.extract(&bar()) - 55.0 / 3.0).abs() < 1e-12);
        // (10 + 30 + 5 + 20) / 4
        assert_eq!(PriceSource::Ohlc4.extract(&bar()), 16.25);
    }

    #[test]
    fn test_serde_names() {
        let source: PriceSource = serde_json::from_str("\"hlc3\"").unwrap();
        assert_eq!(source, PriceSource::Hlc3);
        assert_eq!(serde_json::to_string(&PriceSource::Close).unwrap(), "\"close\"");
        assert_eq!(PriceSource::Ohlc4.to_string(), "ohlc4");
    }
}

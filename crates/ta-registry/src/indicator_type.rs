//! Indicator type ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ta_core::IndicatorError;

/// Every indicator known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    Sma,
    Ema,
    Wma,
    Dema,
    Tema,
    Rsi,
    Roc,
    Momentum,
    Macd,
    Stochastic,
    StochRsi,
    WilliamsR,
    Cci,
    Ao,
    Atr,
    Bollinger,
    Envelope,
    Adx,
    Aroon,
    Psar,
    Ichimoku,
    Obv,
    Cmf,
    Mfi,
    Vwap,
}

impl IndicatorType {
    /// All types in registry order.
    pub const ALL: [IndicatorType; 25] = [
        IndicatorType::Sma,
        IndicatorType::Ema,
        IndicatorType::Wma,
        IndicatorType::Dema,
        IndicatorType::Tema,
        IndicatorType::Rsi,
        IndicatorType::Roc,
        IndicatorType::Momentum,
        IndicatorType::Macd,
        IndicatorType::Stochastic,
        IndicatorType::StochRsi,
        IndicatorType::WilliamsR,
        IndicatorType::Cci,
        IndicatorType::Ao,
        IndicatorType::Atr,
        IndicatorType::Bollinger,
        IndicatorType::Envelope,
        IndicatorType::Adx,
        IndicatorType::Aroon,
        IndicatorType::Psar,
        IndicatorType::Ichimoku,
        IndicatorType::Obv,
        IndicatorType::Cmf,
        IndicatorType::Mfi,
        IndicatorType::Vwap,
    ];

    /// Canonical type id, as used in JSON parameters and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorType::Sma => "sma",
            IndicatorType::Ema => "ema",
            IndicatorType::Wma => "wma",
            IndicatorType::Dema => "dema",
            IndicatorType::Tema => "tema",
            IndicatorType::Rsi => "rsi",
            IndicatorType::Roc => "roc",
            IndicatorType::Momentum => "momentum",
            IndicatorType::Macd => "macd",
            IndicatorType::Stochastic => "stochastic",
            IndicatorType::StochRsi => "stoch_rsi",
            IndicatorType::WilliamsR => "williams_r",
            IndicatorType::Cci => "cci",
            IndicatorType::Ao => "ao",
            IndicatorType::Atr => "atr",
            IndicatorType::Bollinger => "bollinger",
            IndicatorType::Envelope => "envelope",
            IndicatorType::Adx => "adx",
            IndicatorType::Aroon => "aroon",
            IndicatorType::Psar => "psar",
            IndicatorType::Ichimoku => "ichimoku",
            IndicatorType::Obv => "obv",
            IndicatorType::Cmf => "cmf",
            IndicatorType::Mfi => "mfi",
            IndicatorType::Vwap => "vwap",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = IndicatorError;

    /// Parses canonical ids case-insensitively, plus a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase().replace('-', "_");
        let alias = match id.as_str() {
            "bb" | "bollinger_bands" => Some(IndicatorType::Bollinger),
            "stoch" => Some(IndicatorType::Stochastic),
            "stochrsi" => Some(IndicatorType::StochRsi),
            "williams" | "willr" => Some(IndicatorType::WilliamsR),
            "awesome" | "awesome_oscillator" => Some(IndicatorType::Ao),
            "mom" => Some(IndicatorType::Momentum),
            "parabolic_sar" | "sar" => Some(IndicatorType::Psar),
            _ => None,
        };

        alias
            .or_else(|| Self::ALL.into_iter().find(|t| t.as_str() == id))
            .ok_or_else(|| IndicatorError::UnknownIndicatorType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_id() {
        for kind in IndicatorType::ALL {
            assert_eq!(kind.as_str().parse::<IndicatorType>(), Ok(kind));
        }
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!("BB".parse::<IndicatorType>(), Ok(IndicatorType::Bollinger));
        assert_eq!("Stoch-RSI".parse::<IndicatorType>(), Ok(IndicatorType::StochRsi));
        assert_eq!(" parabolic_sar ".parse::<IndicatorType>(), Ok(IndicatorType::Psar));
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(
            "supertrend".parse::<IndicatorType>(),
            Err(IndicatorError::UnknownIndicatorType("supertrend".to_string()))
        );
    }

    #[test]
    fn test_serde_matches_as_str() {
        for kind in IndicatorType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}

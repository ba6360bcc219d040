//! Indicator registry for dynamic lookup.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use ta_core::{Bar, Diagnostics, IndicatorError, Output};
use tracing::{debug, info};

use crate::{IndicatorType, Params};

/// Indicator family, used for grouping in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Trend => "trend",
            Category::Momentum => "momentum",
            Category::Volatility => "volatility",
            Category::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Uniform calculation entry point of one registered indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculation {
    indicator: IndicatorType,
}

impl Calculation {
    pub fn indicator_type(&self) -> IndicatorType {
        self.indicator
    }

    /// Calculate with parameters that must belong to this indicator.
    pub fn call(
        &self,
        bars: &[Bar],
        params: &Params,
        diagnostics: &mut Diagnostics,
    ) -> Result<Output, IndicatorError> {
        let found = params.indicator_type();
        if found != self.indicator {
            return Err(IndicatorError::ParamsMismatch {
                expected: self.indicator.as_str(),
                found: found.as_str(),
            });
        }
        Ok(params.calculate_with(bars, diagnostics))
    }
}

/// Metadata and defaults of a registered indicator.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEntry {
    pub type_id: IndicatorType,
    pub display_name: &'static str,
    pub short_name: &'static str,
    pub category: Category,
    /// Drawn on the price scale rather than in a separate pane.
    pub is_overlay: bool,
    pub default_params: Params,
    /// Hex RGB color suggested for the first line.
    pub default_color: &'static str,
    #[serde(skip)]
    pub calculate: Calculation,
}

impl RegistryEntry {
    fn builtin(kind: IndicatorType) -> Self {
        use Category::*;

        let (display_name, short_name, category, is_overlay, default_color) = match kind {
            IndicatorType::Sma => ("Simple Moving Average", "SMA", Trend, true, "#2962FF"),
            IndicatorType::Ema => ("Exponential Moving Average", "EMA", Trend, true, "#FF6D00"),
            IndicatorType::Wma => ("Weighted Moving Average", "WMA", Trend, true, "#00BCD4"),
            IndicatorType::Dema => ("Double Exponential Moving Average", "DEMA", Trend, true, "#AB47BC"),
            IndicatorType::Tema => ("Triple Exponential Moving Average", "TEMA", Trend, true, "#26A69A"),
            IndicatorType::Rsi => ("Relative Strength Index", "RSI", Momentum, false, "#7E57C2"),
            IndicatorType::Roc => ("Rate of Change", "ROC", Momentum, false, "#EC407A"),
            IndicatorType::Momentum => ("Momentum", "MOM", Momentum, false, "#8D6E63"),
            IndicatorType::Macd => ("Moving Average Convergence Divergence", "MACD", Momentum, false, "#2196F3"),
            IndicatorType::Stochastic => ("Stochastic Oscillator", "Stoch", Momentum, false, "#FF9800"),
            IndicatorType::StochRsi => ("Stochastic RSI", "StochRSI", Momentum, false, "#9C27B0"),
            IndicatorType::WilliamsR => ("Williams %R", "%R", Momentum, false, "#F44336"),
            IndicatorType::Cci => ("Commodity Channel Index", "CCI", Momentum, false, "#009688"),
            IndicatorType::Ao => ("Awesome Oscillator", "AO", Momentum, false, "#4CAF50"),
            IndicatorType::Atr => ("Average True Range", "ATR", Volatility, false, "#795548"),
            IndicatorType::Bollinger => ("Bollinger Bands", "BB", Volatility, true, "#2196F3"),
            IndicatorType::Envelope => ("Moving Average Envelope", "ENV", Volatility, true, "#607D8B"),
            IndicatorType::Adx => ("Average Directional Index", "ADX", Trend, false, "#FF5722"),
            IndicatorType::Aroon => ("Aroon", "Aroon", Trend, false, "#3F51B5"),
            IndicatorType::Psar => ("Parabolic SAR", "PSAR", Trend, true, "#FFEB3B"),
            IndicatorType::Ichimoku => ("Ichimoku Cloud", "Ichimoku", Trend, true, "#E91E63"),
            IndicatorType::Obv => ("On-Balance Volume", "OBV", Volume, false, "#00897B"),
            IndicatorType::Cmf => ("Chaikin Money Flow", "CMF", Volume, false, "#43A047"),
            IndicatorType::Mfi => ("Money Flow Index", "MFI", Volume, false, "#8E24AA"),
            IndicatorType::Vwap => ("Volume Weighted Average Price", "VWAP", Volume, true, "#FFA000"),
        };

        Self {
            type_id: kind,
            display_name,
            short_name,
            category,
            is_overlay,
            default_params: Params::defaults(kind),
            default_color,
            calculate: Calculation { indicator: kind },
        }
    }
}

/// Registry of every available indicator.
///
/// Holds no mutable state after construction and can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    /// Indexed by `IndicatorType` discriminant.
    entries: Vec<RegistryEntry>,
}

impl IndicatorRegistry {
    /// Create a registry with all built-in indicators and their documented
    /// defaults.
    pub fn new() -> Self {
        let entries = IndicatorType::ALL
            .into_iter()
            .map(RegistryEntry::builtin)
            .collect();
        Self { entries }
    }

    /// Shared registry with built-in defaults, built on first use.
    pub fn global() -> &'static IndicatorRegistry {
        static REGISTRY: OnceLock<IndicatorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(IndicatorRegistry::new)
    }

    /// Replace default parameters from configuration.
    ///
    /// Each value is a JSON object of parameter fields merged over the
    /// built-in defaults of the indicator named by its key. Defaults that
    /// the indicator would reject on every call are an error here.
    pub fn with_overrides(mut self, overrides: &HashMap<String, Value>) -> Result<Self, IndicatorError> {
        for (type_id, fields) in overrides {
            let kind: IndicatorType = type_id.parse()?;
            let entry = &mut self.entries[kind as usize];
            let params = entry.default_params.merged(fields)?;

            let mut diagnostics = Diagnostics::new();
            if !params.check_params(&mut diagnostics) {
                let reason = diagnostics
                    .entries()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(IndicatorError::InvalidParams {
                    type_id: kind.as_str().to_string(),
                    reason,
                });
            }

            entry.default_params = params;
            info!(type_id = kind.as_str(), params = %fields, "Overriding default parameters");
        }
        Ok(self)
    }

    /// List all available indicators.
    pub fn list(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entry of a typed id.
    pub fn entry(&self, kind: IndicatorType) -> &RegistryEntry {
        &self.entries[kind as usize]
    }

    /// Get indicator entry by type id.
    pub fn get(&self, type_id: &str) -> Result<&RegistryEntry, IndicatorError> {
        let kind: IndicatorType = type_id.parse()?;
        Ok(self.entry(kind))
    }

    /// Calculation entry point by type id.
    pub fn calculation(&self, type_id: &str) -> Result<Calculation, IndicatorError> {
        self.get(type_id).map(|entry| entry.calculate)
    }

    /// Default parameters by type id.
    pub fn default_params(&self, type_id: &str) -> Result<Params, IndicatorError> {
        self.get(type_id).map(|entry| entry.default_params.clone())
    }

    /// Resolve parameters: defaults, with optional JSON fields merged on top.
    pub fn params(&self, type_id: &str, overrides: Option<&Value>) -> Result<Params, IndicatorError> {
        let defaults = self.default_params(type_id)?;
        match overrides {
            Some(fields) => defaults.merged(fields),
            None => Ok(defaults),
        }
    }

    /// Calculate an indicator by type id, recording diagnostics.
    pub fn calculate_with(
        &self,
        type_id: &str,
        bars: &[Bar],
        overrides: Option<&Value>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Output, IndicatorError> {
        let entry = self.get(type_id)?;
        let params = self.params(type_id, overrides)?;
        debug!(type_id = entry.type_id.as_str(), bars = bars.len(), "Calculating indicator");
        entry.calculate.call(bars, &params, diagnostics)
    }

    /// Calculate an indicator by type id.
    pub fn calculate(
        &self,
        type_id: &str,
        bars: &[Bar],
        overrides: Option<&Value>,
    ) -> Result<Output, IndicatorError> {
        let mut diagnostics = Diagnostics::new();
        self.calculate_with(type_id, bars, overrides, &mut diagnostics)
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ta_core::DiagnosticKind;
    use ta_indicators::{Rsi, Sma};

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let c = 50.0 + (i as f64 * 0.2).sin() * 3.0;
                Bar::new(i as i64 * 60, c, c + 0.5, c - 0.5, c, 100.0)
            })
            .collect()
    }

    #[test]
    fn test_registry_list() {
        let registry = IndicatorRegistry::new();
        let entries = registry.list();

        assert_eq!(entries.len(), 25);
        for (entry, kind) in entries.iter().zip(IndicatorType::ALL) {
            assert_eq!(entry.type_id, kind);
            assert_eq!(entry.calculate.indicator_type(), kind);
            assert_eq!(entry.default_params.indicator_type(), kind);
        }
    }

    #[test]
    fn test_registry_get() {
        let registry = IndicatorRegistry::new();

        assert_eq!(registry.get("bollinger").unwrap().short_name, "BB");
        assert!(registry.get("bb").unwrap().is_overlay);
        assert_eq!(registry.get("rsi").unwrap().category, Category::Momentum);
        assert!(matches!(
            registry.get("unknown"),
            Err(IndicatorError::UnknownIndicatorType(_))
        ));
    }

    #[test]
    fn test_default_params() {
        let registry = IndicatorRegistry::new();

        assert_eq!(registry.default_params("sma").unwrap(), Params::Sma(Sma::default()));
        assert!(registry.default_params("nope").is_err());
    }

    #[test]
    fn test_calculate_with_json_params() {
        let registry = IndicatorRegistry::new();
        let data = bars(40);

        let output = registry
            .calculate("rsi", &data, Some(&json!({"period": 5})))
            .unwrap();
        assert_eq!(output.line(Output::VALUE).map(<[_]>::len), Some(35));

        let malformed = registry.calculate("rsi", &data, Some(&json!({"period": "five"})));
        assert!(matches!(malformed, Err(IndicatorError::InvalidParams { .. })));
    }

    #[test]
    fn test_calculation_rejects_mismatched_params() {
        let registry = IndicatorRegistry::new();
        let calculation = registry.calculation("ema").unwrap();
        let mut diagnostics = Diagnostics::new();

        let result = calculation.call(&bars(30), &Params::Rsi(Rsi::default()), &mut diagnostics);
        assert_eq!(
            result,
            Err(IndicatorError::ParamsMismatch {
                expected: "ema",
                found: "rsi"
            })
        );
    }

    #[test]
    fn test_invalid_values_surface_as_diagnostics() {
        let registry = IndicatorRegistry::new();
        let mut diagnostics = Diagnostics::new();

        let output = registry
            .calculate_with("sma", &bars(30), Some(&json!({"period": 0})), &mut diagnostics)
            .unwrap();
        assert!(output.is_empty());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_negative_period_is_a_diagnostic() {
        let registry = IndicatorRegistry::new();
        let mut diagnostics = Diagnostics::new();

        let output = registry
            .calculate_with("sma", &bars(30), Some(&json!({"period": -5})), &mut diagnostics)
            .unwrap();
        assert!(output.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics.entries()[0].kind,
            DiagnosticKind::InvalidParameter { name: "period", .. }
        ));
    }

    #[test]
    fn test_with_overrides_rejects_invalid_defaults() {
        let overrides = HashMap::from([("atr".to_string(), json!({"period": -3}))]);
        let result = IndicatorRegistry::new().with_overrides(&overrides);

        assert!(matches!(result, Err(IndicatorError::InvalidParams { ref type_id, .. }) if type_id == "atr"));
    }

    #[test]
    fn test_with_overrides() {
        let overrides = HashMap::from([("rsi".to_string(), json!({"period": 21}))]);
        let registry = IndicatorRegistry::new().with_overrides(&overrides).unwrap();

        assert_eq!(registry.default_params("rsi").unwrap(), Params::Rsi(Rsi::new(21)));
        // Call-site params still merge over the overridden defaults
        let params = registry.params("rsi", Some(&json!({"source": "open"}))).unwrap();
        let Params::Rsi(rsi) = params else {
            panic!("expected rsi params, got {params:?}");
        };
        assert_eq!(rsi.period, 21);

        let unknown = HashMap::from([("zigzag".to_string(), json!({}))]);
        assert!(IndicatorRegistry::new().with_overrides(&unknown).is_err());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(IndicatorRegistry::global(), IndicatorRegistry::global()));
    }
}

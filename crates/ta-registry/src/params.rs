//! Tagged parameter union.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ta_core::{Bar, Diagnostics, Indicator, IndicatorError, Output};
use ta_indicators::{
    awesome_output, Adx, Aroon, Atr, AwesomeOscillator, BollingerBands, Cci, Cmf, Dema, Ema,
    Envelope, Ichimoku, Macd, Mfi, Momentum, Obv, ParabolicSar, Roc, Rsi, Sma, Stochastic,
    StochasticRsi, Tema, Vwap, WilliamsR, Wma,
};
use tracing::debug;

use crate::IndicatorType;

/// Parameters of any registered indicator.
///
/// Serialized with a `"type"` tag holding the indicator type id; missing
/// fields take the indicator's defaults:
///
/// ```json
/// { "type": "macd", "fast_period": 8 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Params {
    Sma(Sma),
    Ema(Ema),
    Wma(Wma),
    Dema(Dema),
    Tema(Tema),
    Rsi(Rsi),
    Roc(Roc),
    Momentum(Momentum),
    Macd(Macd),
    Stochastic(Stochastic),
    StochRsi(StochasticRsi),
    WilliamsR(WilliamsR),
    Cci(Cci),
    Ao(AwesomeOscillator),
    Atr(Atr),
    Bollinger(BollingerBands),
    Envelope(Envelope),
    Adx(Adx),
    Aroon(Aroon),
    Psar(ParabolicSar),
    Ichimoku(Ichimoku),
    Obv,
    Cmf(Cmf),
    Mfi(Mfi),
    Vwap(Vwap),
}

impl Params {
    /// Documented default parameters of an indicator type.
    pub fn defaults(kind: IndicatorType) -> Self {
        match kind {
            IndicatorType::Sma => Params::Sma(Sma::default()),
            IndicatorType::Ema => Params::Ema(Ema::default()),
            IndicatorType::Wma => Params::Wma(Wma::default()),
            IndicatorType::Dema => Params::Dema(Dema::default()),
            IndicatorType::Tema => Params::Tema(Tema::default()),
            IndicatorType::Rsi => Params::Rsi(Rsi::default()),
            IndicatorType::Roc => Params::Roc(Roc::default()),
            IndicatorType::Momentum => Params::Momentum(Momentum::default()),
            IndicatorType::Macd => Params::Macd(Macd::default()),
            IndicatorType::Stochastic => Params::Stochastic(Stochastic::default()),
            IndicatorType::StochRsi => Params::StochRsi(StochasticRsi::default()),
            IndicatorType::WilliamsR => Params::WilliamsR(WilliamsR::default()),
            IndicatorType::Cci => Params::Cci(Cci::default()),
            IndicatorType::Ao => Params::Ao(AwesomeOscillator::default()),
            IndicatorType::Atr => Params::Atr(Atr::default()),
            IndicatorType::Bollinger => Params::Bollinger(BollingerBands::default()),
            IndicatorType::Envelope => Params::Envelope(Envelope::default()),
            IndicatorType::Adx => Params::Adx(Adx::default()),
            IndicatorType::Aroon => Params::Aroon(Aroon::default()),
            IndicatorType::Psar => Params::Psar(ParabolicSar::default()),
            IndicatorType::Ichimoku => Params::Ichimoku(Ichimoku::default()),
            IndicatorType::Obv => Params::Obv,
            IndicatorType::Cmf => Params::Cmf(Cmf::default()),
            IndicatorType::Mfi => Params::Mfi(Mfi::default()),
            IndicatorType::Vwap => Params::Vwap(Vwap::default()),
        }
    }

    /// The indicator type these parameters belong to.
    pub fn indicator_type(&self) -> IndicatorType {
        match self {
            Params::Sma(_) => IndicatorType::Sma,
            Params::Ema(_) => IndicatorType::Ema,
            Params::Wma(_) => IndicatorType::Wma,
            Params::Dema(_) => IndicatorType::Dema,
            Params::Tema(_) => IndicatorType::Tema,
            Params::Rsi(_) => IndicatorType::Rsi,
            Params::Roc(_) => IndicatorType::Roc,
            Params::Momentum(_) => IndicatorType::Momentum,
            Params::Macd(_) => IndicatorType::Macd,
            Params::Stochastic(_) => IndicatorType::Stochastic,
            Params::StochRsi(_) => IndicatorType::StochRsi,
            Params::WilliamsR(_) => IndicatorType::WilliamsR,
            Params::Cci(_) => IndicatorType::Cci,
            Params::Ao(_) => IndicatorType::Ao,
            Params::Atr(_) => IndicatorType::Atr,
            Params::Bollinger(_) => IndicatorType::Bollinger,
            Params::Envelope(_) => IndicatorType::Envelope,
            Params::Adx(_) => IndicatorType::Adx,
            Params::Aroon(_) => IndicatorType::Aroon,
            Params::Psar(_) => IndicatorType::Psar,
            Params::Ichimoku(_) => IndicatorType::Ichimoku,
            Params::Obv => IndicatorType::Obv,
            Params::Cmf(_) => IndicatorType::Cmf,
            Params::Mfi(_) => IndicatorType::Mfi,
            Params::Vwap(_) => IndicatorType::Vwap,
        }
    }

    /// Overlay a JSON object of parameter fields onto `self`.
    ///
    /// Fields absent from `overrides` keep their current value. A `"type"`
    /// key, if present, must name the same indicator.
    pub fn merged(&self, overrides: &Value) -> Result<Self, IndicatorError> {
        let kind = self.indicator_type();
        let invalid = |reason: String| IndicatorError::InvalidParams {
            type_id: kind.as_str().to_string(),
            reason,
        };

        let Value::Object(fields) = overrides else {
            return Err(invalid(format!("expected a JSON object, got {overrides}")));
        };

        let mut merged = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => return Err(invalid(format!("unexpected parameter shape {other}"))),
            Err(e) => return Err(invalid(e.to_string())),
        };

        for (key, value) in fields {
            if key == "type" && value.as_str() != Some(kind.as_str()) {
                return Err(invalid(format!("type tag {value} does not match")));
            }
            // Negative counts become 0 so parameter checks reject them as
            // non-positive instead of failing deserialization
            let counted = merged.get(key).is_some_and(Value::is_u64);
            let value = match value.as_i64() {
                Some(n) if counted && n < 0 => {
                    debug!(type_id = kind.as_str(), field = %key, value = n, "Negative count");
                    Value::from(0u64)
                }
                _ => value.clone(),
            };
            merged.insert(key.clone(), value);
        }

        serde_json::from_value(Value::Object(merged)).map_err(|e| invalid(e.to_string()))
    }

    /// Validate the parameters without calculating.
    pub fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        match self {
            Params::Sma(p) => p.check_params(diagnostics),
            Params::Ema(p) => p.check_params(diagnostics),
            Params::Wma(p) => p.check_params(diagnostics),
            Params::Dema(p) => p.check_params(diagnostics),
            Params::Tema(p) => p.check_params(diagnostics),
            Params::Rsi(p) => p.check_params(diagnostics),
            Params::Roc(p) => p.check_params(diagnostics),
            Params::Momentum(p) => p.check_params(diagnostics),
            Params::Macd(p) => p.check_params(diagnostics),
            Params::Stochastic(p) => p.check_params(diagnostics),
            Params::StochRsi(p) => p.check_params(diagnostics),
            Params::WilliamsR(p) => p.check_params(diagnostics),
            Params::Cci(p) => p.check_params(diagnostics),
            Params::Ao(p) => p.check_params(diagnostics),
            Params::Atr(p) => p.check_params(diagnostics),
            Params::Bollinger(p) => p.check_params(diagnostics),
            Params::Envelope(p) => p.check_params(diagnostics),
            Params::Adx(p) => p.check_params(diagnostics),
            Params::Aroon(p) => p.check_params(diagnostics),
            Params::Psar(p) => p.check_params(diagnostics),
            Params::Ichimoku(p) => p.check_params(diagnostics),
            Params::Obv => Obv.check_params(diagnostics),
            Params::Cmf(p) => p.check_params(diagnostics),
            Params::Mfi(p) => p.check_params(diagnostics),
            Params::Vwap(p) => p.check_params(diagnostics),
        }
    }

    /// Run the indicator these parameters describe.
    pub fn calculate_with(&self, bars: &[Bar], diagnostics: &mut Diagnostics) -> Output {
        match self {
            Params::Sma(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Ema(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Wma(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Dema(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Tema(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Rsi(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Roc(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Momentum(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Macd(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Stochastic(p) => p.calculate_with(bars, diagnostics).into(),
            Params::StochRsi(p) => p.calculate_with(bars, diagnostics).into(),
            Params::WilliamsR(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Cci(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Ao(p) => awesome_output(p.calculate_with(bars, diagnostics)),
            Params::Atr(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Bollinger(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Envelope(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Adx(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Aroon(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Psar(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Ichimoku(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Obv => Obv.calculate_with(bars, diagnostics).into(),
            Params::Cmf(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Mfi(p) => p.calculate_with(bars, diagnostics).into(),
            Params::Vwap(p) => p.calculate_with(bars, diagnostics).into(),
        }
    }
}

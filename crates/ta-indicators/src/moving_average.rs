//! Moving average indicators.

use serde::{Deserialize, Serialize};
use ta_core::{Bar, Diagnostics, Indicator, IndicatorOutput, ParamCheck, PriceSource};

use crate::smoothing::{self, OffsetSeries};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sma {
    pub period: usize,
    pub source: PriceSource,
}

impl Sma {
    /// Create a new SMA over close prices.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Default for Sma {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Sma {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "SMA"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        OffsetSeries::from_window(self.period, smoothing::sma(&values, self.period)).points(bars)
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ema {
    pub period: usize,
    pub source: PriceSource,
}

impl Ema {
    /// Create a new EMA over close prices.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Ema {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "EMA"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        OffsetSeries::from_window(self.period, smoothing::ema(&values, self.period)).points(bars)
    }
}

/// Weighted Moving Average (WMA).
///
/// Gives linearly decreasing weights to older prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wma {
    pub period: usize,
    pub source: PriceSource,
}

impl Wma {
    /// Create a new WMA over close prices.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Default for Wma {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Wma {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "WMA"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        OffsetSeries::from_window(self.period, smoothing::wma(&values, self.period)).points(bars)
    }
}

/// Double Exponential Moving Average: `2 * EMA - EMA(EMA)`.
///
/// The first value sits at input index `2 * period - 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dema {
    pub period: usize,
    pub source: PriceSource,
}

impl Dema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Default for Dema {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Dema {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "DEMA"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_mul(2).saturating_sub(1)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        let ema1 = OffsetSeries::from_window(self.period, smoothing::ema(&values, self.period));
        let ema2 = ema1.ema(self.period);

        ema1.zip_with(&ema2, |e1, e2| 2.0 * e1 - e2).points(bars)
    }
}

/// Triple Exponential Moving Average: `3 * EMA - 3 * EMA(EMA) + EMA(EMA(EMA))`.
///
/// The first value sits at input index `3 * period - 3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tema {
    pub period: usize,
    pub source: PriceSource,
}

impl Tema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Default for Tema {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Tema {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "TEMA"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_mul(3).saturating_sub(2)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        let ema1 = OffsetSeries::from_window(self.period, smoothing::ema(&values, self.period));
        let ema2 = ema1.ema(self.period);
        let ema3 = ema2.ema(self.period);

        ema1.zip_with(&ema2, |e1, e2| 3.0 * e1 - 3.0 * e2)
            .zip_with(&ema3, |partial, e3| partial + e3)
            .points(bars)
    }
}

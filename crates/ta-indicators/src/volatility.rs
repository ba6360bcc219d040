//! Volatility indicators.

use serde::{Deserialize, Serialize};
use ta_core::{
    Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, NamedLine, Output, ParamCheck,
    PriceSource,
};

use crate::simd::window_mean_std;
use crate::smoothing::{self, OffsetSeries};

/// True range of every bar; the first bar has no previous close.
pub(crate) fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    let mut prev_close = None;
    bars.iter()
        .map(|bar| {
            let tr = bar.true_range(prev_close);
            prev_close = Some(bar.close);
            tr
        })
        .collect()
}

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range of a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atr {
    pub period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Atr {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "ATR"
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
        let tr = true_ranges(bars);
        OffsetSeries::from_window(self.period, smoothing::wilder(&tr, self.period)).points(bars)
    }
}

/// Output of band indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandOutput {
    pub upper: IndicatorOutput,
    pub middle: IndicatorOutput,
    pub lower: IndicatorOutput,
}

impl BandOutput {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            upper: Vec::with_capacity(capacity),
            middle: Vec::with_capacity(capacity),
            lower: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, time: i64, upper: f64, middle: f64, lower: f64) {
        self.upper.push(IndicatorPoint::new(time, upper));
        self.middle.push(IndicatorPoint::new(time, middle));
        self.lower.push(IndicatorPoint::new(time, lower));
    }
}

impl From<BandOutput> for Output {
    fn from(output: BandOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("upper", output.upper),
            NamedLine::new("middle", output.middle),
            NamedLine::new("lower", output.lower),
        ])
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) and upper/lower bands at
/// `std_dev` population standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerBands {
    pub period: usize,
    /// Standard deviation multiplier.
    pub std_dev: f64,
    pub source: PriceSource,
}

impl BollingerBands {
    /// Create new Bollinger Bands.
    ///
    /// Standard parameters are period=20, std_dev=2.0.
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            period,
            std_dev,
            source: PriceSource::Close,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Indicator for BollingerBands {
    type Output = BandOutput;

    fn name(&self) -> &str {
        "BB"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .positive("std_dev", self.std_dev)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> BandOutput {
        let values = self.source.values(bars);
        let windows = window_mean_std(&values, self.period);
        let mut output = BandOutput::with_capacity(windows.len());

        for ((mean, std), bar) in windows.into_iter().zip(&bars[self.period - 1..]) {
            let width = self.std_dev * std;
            output.push(bar.time, mean + width, mean, mean - width);
        }

        output
    }
}

/// Moving average envelope: SMA with bands a fixed percentage away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub period: usize,
    /// Band distance in percent of the middle line.
    pub percentage: f64,
    pub source: PriceSource,
}

impl Envelope {
    pub fn new(period: usize, percentage: f64) -> Self {
        Self {
            period,
            percentage,
            source: PriceSource::Close,
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(20, 2.5)
    }
}

impl Indicator for Envelope {
    type Output = BandOutput;

    fn name(&self) -> &str {
        "ENV"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .non_negative("percentage", self.percentage)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> BandOutput {
        let values = self.source.values(bars);
        let middle = smoothing::sma(&values, self.period);
        let factor = self.percentage / 100.0;
        let mut output = BandOutput::with_capacity(middle.len());

        for (mid, bar) in middle.into_iter().zip(&bars[self.period - 1..]) {
            output.push(bar.time, mid * (1.0 + factor), mid, mid * (1.0 - factor));
        }

        output
    }
}

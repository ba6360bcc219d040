//! Momentum indicators.

use serde::{Deserialize, Serialize};
use ta_core::{
    Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, NamedLine, Output, ParamCheck,
    PriceSource,
};

use crate::smoothing::{self, OffsetSeries};

/// RSI over raw values. The first value sits at input index `period`.
pub(crate) fn rsi_series(values: &[f64], period: usize) -> OffsetSeries {
    if period == 0 || values.len() <= period {
        return OffsetSeries::new(period, vec![]);
    }

    // Calculate price changes
    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);

    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    // Smooth gains and losses
    let avg_gains = smoothing::wilder(&gains, period);
    let avg_losses = smoothing::wilder(&losses, period);

    let rsi = avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(&gain, &loss)| {
            if loss == 0.0 {
                100.0
            } else {
                100.0 - (100.0 / (1.0 + gain / loss))
            }
        })
        .collect();

    OffsetSeries::new(period, rsi)
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rsi {
    pub period: usize,
    pub source: PriceSource,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
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

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "RSI"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        rsi_series(&self.source.values(bars), self.period).points(bars)
    }
}

/// Rate of Change: percentage change over `period` bars.
///
/// Zero when the reference value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roc {
    pub period: usize,
    pub source: PriceSource,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }
}

impl Default for Roc {
    fn default() -> Self {
        Self::new(12)
    }
}

impl Indicator for Roc {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "ROC"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        (self.period..values.len())
            .map(|i| {
                let base = values[i - self.period];
                let roc = if base == 0.0 {
                    0.0
                } else {
                    (values[i] - base) / base * 100.0
                };
                IndicatorPoint::new(bars[i].time, roc)
            })
            .collect()
    }
}

/// Momentum: absolute change over `period` bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Momentum {
    pub period: usize,
    pub source: PriceSource,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Indicator for Momentum {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "MOM"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let values = self.source.values(bars);
        (self.period..values.len())
            .map(|i| IndicatorPoint::new(bars[i].time, values[i] - values[i - self.period]))
            .collect()
    }
}

/// MACD (Moving Average Convergence Divergence) output.
///
/// `macd` starts at the slow EMA's first value; `signal` and `histogram`
/// start `signal_period - 1` bars later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: IndicatorOutput,
    /// Signal line (EMA of MACD)
    pub signal: IndicatorOutput,
    /// Histogram (MACD - Signal)
    pub histogram: IndicatorOutput,
}

impl From<MacdOutput> for Output {
    fn from(output: MacdOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("macd", output.macd),
            NamedLine::new("signal", output.signal),
            NamedLine::new("histogram", output.histogram),
        ])
    }
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macd {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub source: PriceSource,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    ///
    /// A fast period not below the slow one is accepted and reported as a
    /// warning when calculating.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
            source: PriceSource::Close,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn name(&self) -> &str {
        "MACD"
    }

    fn min_bars(&self) -> usize {
        self.fast_period.max(self.slow_period)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        let (fast, slow) = (self.fast_period, self.slow_period);
        ParamCheck::new(self.name(), diagnostics)
            .period("fast_period", fast)
            .period("slow_period", slow)
            .period("signal_period", self.signal_period)
            .warn_if(fast >= slow, || {
                format!("fast period {fast} is not below slow period {slow}")
            })
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> MacdOutput {
        let values = self.source.values(bars);

        let fast = OffsetSeries::from_window(
            self.fast_period,
            smoothing::ema(&values, self.fast_period),
        );
        let slow = OffsetSeries::from_window(
            self.slow_period,
            smoothing::ema(&values, self.slow_period),
        );

        // Signal only sees the valid MACD values
        let macd = fast.zip_with(&slow, |f, s| f - s);
        let signal = macd.ema(self.signal_period);
        let histogram = macd.zip_with(&signal, |m, s| m - s);

        MacdOutput {
            macd: macd.points(bars),
            signal: signal.points(bars),
            histogram: histogram.points(bars),
        }
    }
}

/// Direction of an Awesome Oscillator bar relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Rising,
    Falling,
}

impl Direction {
    /// `1.0` for rising bars, `-1.0` for falling ones.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Rising => 1.0,
            Direction::Falling => -1.0,
        }
    }
}

/// An Awesome Oscillator value with its histogram direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwesomeBar {
    pub time: i64,
    pub value: f64,
    pub direction: Direction,
}

/// Classify Awesome Oscillator values by comparing each with its predecessor.
///
/// The first value is compared with zero. Equal consecutive values count
/// as falling.
pub fn classify_awesome(points: &[IndicatorPoint]) -> Vec<AwesomeBar> {
    let mut previous = 0.0;
    points
        .iter()
        .map(|point| {
            let direction = if point.value > previous {
                Direction::Rising
            } else {
                Direction::Falling
            };
            previous = point.value;
            AwesomeBar {
                time: point.time,
                value: point.value,
                direction,
            }
        })
        .collect()
}

/// Awesome Oscillator values as a `value` line plus a `direction` line
/// holding each bar's [`Direction::sign`].
pub fn awesome_output(points: IndicatorOutput) -> Output {
    let direction = classify_awesome(&points)
        .into_iter()
        .map(|bar| IndicatorPoint::new(bar.time, bar.direction.sign()))
        .collect();
    Output::Multi(vec![
        NamedLine::new(Output::VALUE, points),
        NamedLine::new("direction", direction),
    ])
}

/// Awesome Oscillator: `SMA(median, fast) - SMA(median, slow)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwesomeOscillator {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl AwesomeOscillator {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }
}

impl Default for AwesomeOscillator {
    fn default() -> Self {
        Self::new(5, 34)
    }
}

impl Indicator for AwesomeOscillator {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "AO"
    }

    fn min_bars(&self) -> usize {
        self.fast_period.max(self.slow_period)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        let (fast, slow) = (self.fast_period, self.slow_period);
        ParamCheck::new(self.name(), diagnostics)
            .period("fast_period", fast)
            .period("slow_period", slow)
            .warn_if(fast >= slow, || {
                format!("fast period {fast} is not below slow period {slow}")
            })
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let median = PriceSource::Hl2.values(bars);
        let fast = OffsetSeries::from_window(
            self.fast_period,
            smoothing::sma(&median, self.fast_period),
        );
        let slow = OffsetSeries::from_window(
            self.slow_period,
            smoothing::sma(&median, self.slow_period),
        );

        fast.zip_with(&slow, |f, s| f - s).points(bars)
    }
}

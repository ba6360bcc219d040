//! Smoothing primitives shared by composite indicators.
//!
//! The slice functions return densely packed values: the first element
//! belongs to input index `period - 1`. [`OffsetSeries`] carries that start
//! index explicitly so nested smoothing (EMA of EMA, SMA of %K, ...) keeps
//! track of the cumulative warm-up without NaN padding.

use ta_core::{Bar, IndicatorOutput, IndicatorPoint};

use crate::simd::{dot_product_simd, minmax_simd};

/// Simple moving average of every trailing window.
///
/// Uses a running sum; drift against the per-window reference in
/// [`simd::window_sums`](crate::simd::window_sums) is covered by tests.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let period_f64 = period as f64;

    // Initial sum
    let mut sum: f64 = values[..period].iter().sum();
    result.push(sum / period_f64);

    // Sliding window
    for i in period..values.len() {
        sum = sum - values[i - period] + values[i];
        result.push(sum / period_f64);
    }

    result
}

/// SMA aligned with the input: `None` for indices before `period - 1`.
pub fn sma_aligned(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let dense = sma(values, period);
    let missing = values.len() - dense.len();

    std::iter::repeat(None)
        .take(missing)
        .chain(dense.into_iter().map(Some))
        .collect()
}

/// Exponential moving average with multiplier `2 / (period + 1)`.
///
/// Seeded with the SMA of the first `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len() - period + 1);

    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    result.push(ema);

    for &value in &values[period..] {
        ema = (value - ema) * k + ema;
        result.push(ema);
    }

    result
}

/// Linearly weighted moving average, newest value weighted `period`.
pub fn wma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    // Sum of weights: 1 + 2 + ... + n = n(n+1)/2
    let divisor = (period * (period + 1)) as f64 / 2.0;
    let weights: Vec<f64> = (1..=period).map(|w| w as f64).collect();

    values
        .windows(period)
        .map(|window| dot_product_simd(window, &weights) / divisor)
        .collect()
}

/// Wilder's smoothing: mean seed, then `x = (x * (period - 1) + v) / period`.
pub fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let period_f64 = period as f64;

    // Initial average
    let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
    result.push(avg);

    for &value in &values[period..] {
        avg = (avg * (period_f64 - 1.0) + value) / period_f64;
        result.push(avg);
    }

    result
}

/// Highest high and lowest low of every trailing window.
pub fn rolling_extremes(high: &[f64], low: &[f64], period: usize) -> Vec<(f64, f64)> {
    let len = high.len().min(low.len());
    if period == 0 || len < period {
        return vec![];
    }

    (period - 1..len)
        .map(|i| {
            let start = i + 1 - period;
            let (_, hh) = minmax_simd(&high[start..=i]).unwrap_or((0.0, 0.0));
            let (ll, _) = minmax_simd(&low[start..=i]).unwrap_or((0.0, 0.0));
            (hh, ll)
        })
        .collect()
}

/// Donchian midpoint `(highest high + lowest low) / 2` of every trailing window.
pub fn rolling_midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    rolling_extremes(high, low, period)
        .into_iter()
        .map(|(hh, ll)| (hh + ll) / 2.0)
        .collect()
}

/// Densely packed values plus the input index of the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetSeries {
    /// Input index of `values[0]`.
    pub start: usize,
    pub values: Vec<f64>,
}

impl OffsetSeries {
    pub fn new(start: usize, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    /// Wrap the output of a windowed primitive computed directly on input.
    pub fn from_window(period: usize, values: Vec<f64>) -> Self {
        Self::new(period.saturating_sub(1), values)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One past the input index of the last value.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.values.len()
    }

    /// Value at input index `index`, if defined there.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(self.start)
            .and_then(|i| self.values.get(i).copied())
    }

    /// EMA of the defined values; the start shifts by `period - 1`.
    pub fn ema(&self, period: usize) -> Self {
        Self::new(
            self.start.saturating_add(period.saturating_sub(1)),
            ema(&self.values, period),
        )
    }

    /// SMA of the defined values; the start shifts by `period - 1`.
    pub fn sma(&self, period: usize) -> Self {
        Self::new(
            self.start.saturating_add(period.saturating_sub(1)),
            sma(&self.values, period),
        )
    }

    /// Combine two series over the input indices where both are defined.
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        if start >= end {
            return Self::new(start, vec![]);
        }

        let values = (start..end)
            .map(|i| f(self.values[i - self.start], other.values[i - other.start]))
            .collect();
        Self::new(start, values)
    }

    /// Expand to input-aligned form of length `len`.
    pub fn to_aligned(&self, len: usize) -> Vec<Option<f64>> {
        (0..len).map(|i| self.get(i)).collect()
    }

    /// Attach bar times.
    pub fn points(&self, bars: &[Bar]) -> IndicatorOutput {
        let bars = bars.get(self.start..).unwrap_or(&[]);
        self.values
            .iter()
            .zip(bars)
            .map(|(&value, bar)| IndicatorPoint::new(bar.time, value))
            .collect()
    }
}

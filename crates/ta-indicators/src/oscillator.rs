//! Range-bound oscillators: Stochastic, Stochastic RSI, Williams %R and CCI.

use serde::{Deserialize, Serialize};
use ta_core::{
    Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, NamedLine, Output, ParamCheck,
    PriceSource,
};

use crate::momentum::rsi_series;
use crate::simd::{minmax_simd, sum_simd};
use crate::smoothing::{self, OffsetSeries};

/// Position of `value` within `[lowest, highest]`, scaled to 0..100.
///
/// A flat range maps to the midpoint.
fn stochastic_position(value: f64, highest: f64, lowest: f64) -> f64 {
    let range = highest - lowest;
    if range == 0.0 {
        50.0
    } else {
        (value - lowest) / range * 100.0
    }
}

/// Stochastic oscillator output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K line
    pub k: IndicatorOutput,
    /// %D line (SMA of %K)
    pub d: IndicatorOutput,
}

impl From<StochasticOutput> for Output {
    fn from(output: StochasticOutput) -> Self {
        Output::Multi(vec![NamedLine::new("k", output.k), NamedLine::new("d", output.d)])
    }
}

/// Smooth raw %K (when `smooth > 1`) and derive %D.
fn k_and_d(raw: OffsetSeries, smooth: usize, d_period: usize, bars: &[Bar]) -> StochasticOutput {
    let k = if smooth > 1 { raw.sma(smooth) } else { raw };
    let d = k.sma(d_period);

    StochasticOutput {
        k: k.points(bars),
        d: d.points(bars),
    }
}

/// Stochastic oscillator.
///
/// Compares the close with the high-low range over `k_period` bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stochastic {
    pub k_period: usize,
    pub d_period: usize,
    /// SMA length applied to raw %K; 1 leaves it unsmoothed.
    pub smooth: usize,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self {
            k_period,
            d_period,
            smooth: 1,
        }
    }

    /// Slow stochastic: raw %K smoothed by an SMA of `smooth` bars.
    pub fn slow(k_period: usize, d_period: usize, smooth: usize) -> Self {
        Self {
            k_period,
            d_period,
            smooth,
        }
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(14, 3)
    }
}

impl Indicator for Stochastic {
    type Output = StochasticOutput;

    fn name(&self) -> &str {
        "Stoch"
    }

    fn min_bars(&self) -> usize {
        self.k_period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("k_period", self.k_period)
            .period("d_period", self.d_period)
            .period("smooth", self.smooth)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> StochasticOutput {
        let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let low: Vec<f64> = bars.iter().map(|b| b.low).collect();

        let raw: Vec<f64> = smoothing::rolling_extremes(&high, &low, self.k_period)
            .iter()
            .zip(&bars[self.k_period - 1..])
            .map(|(&(hh, ll), bar)| stochastic_position(bar.close, hh, ll))
            .collect();

        k_and_d(
            OffsetSeries::from_window(self.k_period, raw),
            self.smooth,
            self.d_period,
            bars,
        )
    }
}

/// Stochastic RSI: the stochastic transform applied to RSI values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticRsi {
    pub rsi_period: usize,
    pub stoch_period: usize,
    pub k_period: usize,
    pub d_period: usize,
    pub source: PriceSource,
}

impl StochasticRsi {
    pub fn new(rsi_period: usize, stoch_period: usize, k_period: usize, d_period: usize) -> Self {
        Self {
            rsi_period,
            stoch_period,
            k_period,
            d_period,
            source: PriceSource::Close,
        }
    }
}

impl Default for StochasticRsi {
    fn default() -> Self {
        Self::new(14, 14, 3, 3)
    }
}

impl Indicator for StochasticRsi {
    type Output = StochasticOutput;

    fn name(&self) -> &str {
        "StochRSI"
    }

    fn min_bars(&self) -> usize {
        self.rsi_period.saturating_add(self.stoch_period)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("rsi_period", self.rsi_period)
            .period("stoch_period", self.stoch_period)
            .period("k_period", self.k_period)
            .period("d_period", self.d_period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> StochasticOutput {
        let rsi = rsi_series(&self.source.values(bars), self.rsi_period);

        let raw: Vec<f64> = smoothing::rolling_extremes(&rsi.values, &rsi.values, self.stoch_period)
            .iter()
            .zip(&rsi.values[self.stoch_period - 1..])
            .map(|(&(hh, ll), &value)| stochastic_position(value, hh, ll))
            .collect();

        k_and_d(
            OffsetSeries::new(rsi.start + self.stoch_period - 1, raw),
            self.k_period,
            self.d_period,
            bars,
        )
    }
}

/// Williams %R: position of the close below the highest high, 0 to -100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WilliamsR {
    pub period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for WilliamsR {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "%R"
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
        let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let low: Vec<f64> = bars.iter().map(|b| b.low).collect();

        smoothing::rolling_extremes(&high, &low, self.period)
            .iter()
            .zip(&bars[self.period - 1..])
            .map(|(&(hh, ll), bar)| {
                IndicatorPoint::new(bar.time, stochastic_position(bar.close, hh, ll) - 100.0)
            })
            .collect()
    }
}

/// Commodity Channel Index over the typical price.
///
/// `(tp - SMA(tp)) / (0.015 * mean deviation)`, zero on a flat window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cci {
    pub period: usize,
}

impl Cci {
    /// Lambert's constant.
    pub const SCALE: f64 = 0.015;

    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Cci {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Cci {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "CCI"
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
        let typical = PriceSource::Hlc3.values(bars);
        let period_f64 = self.period as f64;

        typical
            .windows(self.period)
            .zip(&bars[self.period - 1..])
            .map(|(window, bar)| {
                let mean = sum_simd(window) / period_f64;
                let mean_deviation =
                    window.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / period_f64;

                // A flat window can leave rounding noise in the mean
                let flat = matches!(minmax_simd(window), Some((lo, hi)) if lo == hi);
                let cci = if flat || mean_deviation == 0.0 {
                    0.0
                } else {
                    let current = window[window.len() - 1];
                    (current - mean) / (Self::SCALE * mean_deviation)
                };
                IndicatorPoint::new(bar.time, cci)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(i: usize, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(i as i64 * 3600, close, high, low, close, 500.0)
    }

    fn swing(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.4).sin() * 6.0 + i as f64 * 0.1;
                bar(i, c + 1.5, c - 1.5, c)
            })
            .collect()
    }

    #[test]
    fn test_stochastic_basic() {
        let data = swing(40);
        let result = Stochastic::default().calculate(&data);

        assert_eq!(result.k.len(), 40 - 13);
        assert_eq!(result.d.len(), 40 - 15);
        assert_eq!(result.k[0].time, data[13].time);
        assert_eq!(result.d[0].time, data[15].time);

        for point in result.k.iter().chain(&result.d) {
            assert!(point.value >= -1e-9 && point.value <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_stochastic_known_value() {
        let data = vec![
            bar(0, 10.0, 8.0, 9.0),
            bar(1, 12.0, 9.0, 11.0),
            bar(2, 11.0, 7.0, 10.0),
        ];
        let result = Stochastic::new(3, 1).calculate(&data);

        // hh = 12, ll = 7 -> (10 - 7) / 5 * 100
        assert_eq!(result.k.len(), 1);
        assert!((result.k[0].value - 60.0).abs() < 1e-10);
        assert!((result.d[0].value - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_stochastic_flat_range_is_midpoint() {
        let data: Vec<Bar> = (0..10).map(|i| bar(i, 5.0, 5.0, 5.0)).collect();
        let result = Stochastic::new(5, 3).calculate(&data);

        assert!(result.k.iter().all(|p| p.value == 50.0));
    }

    #[test]
    fn test_slow_stochastic_smooths_k() {
        let data = swing(40);
        let fast = Stochastic::new(14, 3).calculate(&data);
        let slow = Stochastic::slow(14, 3, 3).calculate(&data);

        // Slow %K is the fast %K averaged over three bars
        assert_eq!(slow.k.len(), fast.k.len() - 2);
        let expected = (fast.k[0].value + fast.k[1].value + fast.k[2].value) / 3.0;
        assert!((slow.k[0].value - expected).abs() < 1e-10);
        assert_eq!(slow.k[0].time, fast.k[2].time);
    }

    #[test]
    fn test_stochastic_short_series() {
        let data = swing(10);
        let mut diagnostics = Diagnostics::new();
        let result = Stochastic::default().calculate_with(&data, &mut diagnostics);

        assert!(result.k.is_empty());
        assert!(result.d.is_empty());
        assert!(!diagnostics.has_warnings());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_stoch_rsi_offsets_and_range() {
        let data = swing(80);
        let result = StochasticRsi::default().calculate(&data);

        // RSI starts at 14, raw at 27, %K at 29, %D at 31
        assert_eq!(result.k[0].time, data[29].time);
        assert_eq!(result.d[0].time, data[31].time);
        assert_eq!(result.k.len(), 80 - 29);

        for point in result.k.iter().chain(&result.d) {
            assert!(point.value >= -1e-9 && point.value <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_stoch_rsi_minimum_length() {
        let data = swing(40);
        let indicator = StochasticRsi::new(5, 5, 1, 1);

        assert!(indicator.calculate(&data[..9]).k.is_empty());
        assert_eq!(indicator.calculate(&data[..10]).k.len(), 1);
    }

    #[test]
    fn test_williams_r() {
        let data = vec![
            bar(0, 10.0, 8.0, 9.0),
            bar(1, 12.0, 9.0, 11.0),
            bar(2, 11.0, 7.0, 10.0),
        ];
        let result = WilliamsR::new(3).calculate(&data);

        // (12 - 10) / 5 * -100
        assert!((result[0].value + 40.0).abs() < 1e-10);

        let flat: Vec<Bar> = (0..4).map(|i| bar(i, 3.0, 3.0, 3.0)).collect();
        assert!(WilliamsR::new(2)
            .calculate(&flat)
            .iter()
            .all(|p| p.value == -50.0));
    }

    #[test]
    fn test_williams_r_range() {
        for point in WilliamsR::default().calculate(&swing(60)) {
            assert!(point.value <= 0.0 && point.value >= -100.0);
        }
    }

    #[test]
    fn test_cci_constant_window_is_zero() {
        let data: Vec<Bar> = (0..30).map(|i| bar(i, 100.3, 99.9, 100.1)).collect();
        let result = Cci::default().calculate(&data);

        assert_eq!(result.len(), 30 - 19);
        assert!(result.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_cci_known_value() {
        // Typical prices 1, 2, 3: mean 2, mean deviation 2/3
        let data: Vec<Bar> = (1..=3).map(|i| bar(i, i as f64, i as f64, i as f64)).collect();
        let result = Cci::new(3).calculate(&data);

        let expected = (3.0 - 2.0) / (0.015 * (2.0 / 3.0));
        assert!((result[0].value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stoch_rsi_huge_period_is_insufficient_data() {
        let stoch_rsi = StochasticRsi::new(usize::MAX, 2, 3, 3);
        let result = stoch_rsi.calculate(&swing(60));

        assert_eq!(stoch_rsi.min_bars(), usize::MAX);
        assert!(result.k.is_empty());
        assert!(result.d.is_empty());
        assert!(StochasticRsi::new(14, 14, usize::MAX, 3).calculate(&swing(60)).k.is_empty());
    }
}

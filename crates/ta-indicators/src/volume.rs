//! Volume-weighted indicators.

use serde::{Deserialize, Serialize};
use ta_core::{Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, ParamCheck};

use crate::simd::window_sums;
use crate::smoothing::OffsetSeries;

/// On-Balance Volume, starting from zero at the first bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obv;

impl Indicator for Obv {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "OBV"
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn check_params(&self, _diagnostics: &mut Diagnostics) -> bool {
        true
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let mut obv = 0.0;
        let mut prev_close = None;

        bars.iter()
            .map(|bar| {
                match prev_close {
                    Some(prev) if bar.close > prev => obv += bar.volume,
                    Some(prev) if bar.close < prev => obv -= bar.volume,
                    _ => {}
                }
                prev_close = Some(bar.close);
                IndicatorPoint::new(bar.time, obv)
            })
            .collect()
    }
}

/// Chaikin Money Flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cmf {
    pub period: usize,
}

impl Cmf {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Cmf {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Indicator for Cmf {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "CMF"
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
        let money_flow: Vec<f64> = bars
            .iter()
            .map(|bar| {
                let range = bar.range();
                let multiplier = if range == 0.0 {
                    0.0
                } else {
                    ((bar.close - bar.low) - (bar.high - bar.close)) / range
                };
                multiplier * bar.volume
            })
            .collect();
        let volume: Vec<f64> = bars.iter().map(|bar| bar.volume).collect();

        let cmf = window_sums(&money_flow, self.period)
            .into_iter()
            .zip(window_sums(&volume, self.period))
            .map(|(flow, volume)| if volume == 0.0 { 0.0 } else { flow / volume })
            .collect();

        OffsetSeries::from_window(self.period, cmf).points(bars)
    }
}

/// Money Flow Index: RSI weighted by typical-price money flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mfi {
    pub period: usize,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Mfi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Mfi {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "MFI"
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
        let mut positive = Vec::with_capacity(bars.len() - 1);
        let mut negative = Vec::with_capacity(bars.len() - 1);

        for pair in bars.windows(2) {
            let (prev, current) = (pair[0].typical_price(), pair[1].typical_price());
            let flow = current * pair[1].volume;
            if current > prev {
                positive.push(flow);
                negative.push(0.0);
            } else if current < prev {
                positive.push(0.0);
                negative.push(flow);
            } else {
                positive.push(0.0);
                negative.push(0.0);
            }
        }

        let mfi = window_sums(&positive, self.period)
            .into_iter()
            .zip(window_sums(&negative, self.period))
            .map(|(pos, neg)| {
                // Order matters: a window without any flow is overbought
                if neg == 0.0 {
                    100.0
                } else if pos == 0.0 {
                    0.0
                } else {
                    100.0 - 100.0 / (1.0 + pos / neg)
                }
            })
            .collect();

        OffsetSeries::new(self.period, mfi).points(bars)
    }
}

/// Volume Weighted Average Price.
///
/// Cumulative from the first bar, or restarted at every UTC day boundary
/// when `session_reset` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vwap {
    pub session_reset: bool,
}

impl Vwap {
    /// VWAP restarting every UTC day.
    pub fn daily() -> Self {
        Self {
            session_reset: true,
        }
    }
}

impl Indicator for Vwap {
    type Output = IndicatorOutput;

    fn name(&self) -> &str {
        "VWAP"
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn check_params(&self, _diagnostics: &mut Diagnostics) -> bool {
        true
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorOutput {
        let mut price_volume = 0.0;
        let mut volume = 0.0;
        let mut session = None;

        bars.iter()
            .map(|bar| {
                if self.session_reset {
                    let day = bar.utc_day();
                    if session != day {
                        price_volume = 0.0;
                        volume = 0.0;
                        session = day;
                    }
                }

                let typical = bar.typical_price();
                price_volume += typical * bar.volume;
                volume += bar.volume;

                let vwap = if volume == 0.0 {
                    typical
                } else {
                    price_volume / volume
                };
                IndicatorPoint::new(bar.time, vwap)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
        Bar::new(time, close, high, low, close, volume)
    }

    fn daily(closes: &[f64], volume: f64) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(i as i64 * 86_400, c + 1.0, c - 1.0, c, volume))
            .collect()
    }

    #[test]
    fn test_obv() {
        let data = daily(&[10.0, 11.0, 11.0, 10.5, 12.0], 100.0);
        let values: Vec<f64> = Obv.calculate(&data).iter().map(|p| p.value).collect();

        assert_eq!(values, vec![0.0, 100.0, 100.0, 0.0, 100.0]);
    }

    #[test]
    fn test_cmf_known_value() {
        let data = vec![
            // Close at the high: multiplier 1
            bar(0, 10.0, 8.0, 10.0, 100.0),
            // Close at the low: multiplier -1
            bar(60, 10.0, 8.0, 8.0, 300.0),
            // Zero range contributes no flow
            bar(120, 9.0, 9.0, 9.0, 100.0),
        ];
        let result = Cmf::new(2).calculate(&data);

        assert_eq!(result.len(), 2);
        assert!((result[0].value - (100.0 - 300.0) / 400.0).abs() < 1e-12);
        assert!((result[1].value - (-300.0 / 400.0)).abs() < 1e-12);
    }

    #[test]
    fn test_cmf_zero_volume() {
        let data = daily(&[1.0, 2.0, 3.0, 4.0], 0.0);
        assert!(Cmf::new(2).calculate(&data).iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_mfi_flat_prices_are_overbought() {
        let data: Vec<Bar> = (0..20).map(|i| bar(i * 60, 5.0, 5.0, 5.0, 1000.0)).collect();
        let result = Mfi::default().calculate(&data);

        assert_eq!(result.len(), 20 - 14);
        assert_eq!(result[0].time, data[14].time);
        assert!(result.iter().all(|p| p.value == 100.0));
    }

    #[test]
    fn test_mfi_all_falling_is_zero() {
        let closes: Vec<f64> = (0..10).map(|i| 50.0 - i as f64).collect();
        let result = Mfi::new(5).calculate(&daily(&closes, 10.0));

        assert!(result.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_mfi_range() {
        let closes: Vec<f64> = (0..60).map(|i| 30.0 + (i as f64 * 0.3).cos() * 4.0).collect();
        for point in Mfi::default().calculate(&daily(&closes, 250.0)) {
            assert!(point.value >= 0.0 && point.value <= 100.0);
        }
    }

    #[test]
    fn test_vwap_cumulative() {
        let data = vec![bar(0, 11.0, 9.0, 10.0, 100.0), bar(60, 21.0, 19.0, 20.0, 300.0)];
        let result = Vwap::default().calculate(&data);

        assert!((result[0].value - 10.0).abs() < 1e-12);
        assert!((result[1].value - (1000.0 + 6000.0) / 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_vwap_session_reset() {
        let midnight = 1_704_153_600; // 2024-01-02T00:00:00Z
        let data = vec![
            bar(midnight - 120, 11.0, 9.0, 10.0, 100.0),
            bar(midnight - 60, 21.0, 19.0, 20.0, 100.0),
            bar(midnight, 31.0, 29.0, 30.0, 100.0),
        ];

        let cumulative = Vwap::default().calculate(&data);
        let daily = Vwap::daily().calculate(&data);

        assert!((cumulative[2].value - 20.0).abs() < 1e-12);
        assert!((daily[1].value - 15.0).abs() < 1e-12);
        assert!((daily[2].value - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_vwap_zero_volume_uses_typical_price() {
        let data = vec![bar(0, 12.0, 9.0, 10.5, 0.0)];
        let result = Vwap::default().calculate(&data);

        assert!((result[0].value - 10.5).abs() < 1e-12);
    }
}

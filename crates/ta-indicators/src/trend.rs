//! Trend strength and direction: ADX, Aroon and Parabolic SAR.

use serde::{Deserialize, Serialize};
use ta_core::{
    Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, NamedLine, Output, ParamCheck,
};

use crate::smoothing::{self, OffsetSeries};
use crate::volatility::true_ranges;

/// ADX output. DI lines start at `period - 1`, ADX at `2 * period - 2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdxOutput {
    pub adx: IndicatorOutput,
    pub plus_di: IndicatorOutput,
    pub minus_di: IndicatorOutput,
}

impl From<AdxOutput> for Output {
    fn from(output: AdxOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("adx", output.adx),
            NamedLine::new("plus_di", output.plus_di),
            NamedLine::new("minus_di", output.minus_di),
        ])
    }
}

/// Average Directional Index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adx {
    pub period: usize,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Adx {
    type Output = AdxOutput;

    fn name(&self) -> &str {
        "ADX"
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> AdxOutput {
        let period = self.period;

        // The first bar has no directional movement
        let mut plus_dm = vec![0.0; bars.len()];
        let mut minus_dm = vec![0.0; bars.len()];
        for i in 1..bars.len() {
            let up = bars[i].high - bars[i - 1].high;
            let down = bars[i - 1].low - bars[i].low;
            if up > down && up > 0.0 {
                plus_dm[i] = up;
            }
            if down > up && down > 0.0 {
                minus_dm[i] = down;
            }
        }

        let tr = smoothing::wilder(&true_ranges(bars), period);
        let plus = smoothing::wilder(&plus_dm, period);
        let minus = smoothing::wilder(&minus_dm, period);

        let directional = |dm: &[f64]| -> Vec<f64> {
            dm.iter()
                .zip(&tr)
                .map(|(&dm, &tr)| if tr == 0.0 { 0.0 } else { 100.0 * dm / tr })
                .collect()
        };
        let plus_di = OffsetSeries::from_window(period, directional(&plus));
        let minus_di = OffsetSeries::from_window(period, directional(&minus));

        let dx = plus_di.zip_with(&minus_di, |p, m| {
            let sum = p + m;
            if sum == 0.0 {
                0.0
            } else {
                100.0 * (p - m).abs() / sum
            }
        });
        let adx = OffsetSeries::new(dx.start + period - 1, smoothing::wilder(&dx.values, period));

        AdxOutput {
            adx: adx.points(bars),
            plus_di: plus_di.points(bars),
            minus_di: minus_di.points(bars),
        }
    }
}

/// Aroon output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AroonOutput {
    pub up: IndicatorOutput,
    pub down: IndicatorOutput,
    /// `up - down`
    pub oscillator: IndicatorOutput,
}

impl From<AroonOutput> for Output {
    fn from(output: AroonOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("up", output.up),
            NamedLine::new("down", output.down),
            NamedLine::new("oscillator", output.oscillator),
        ])
    }
}

/// Aroon: how recently the highest high and lowest low of the last
/// `period + 1` bars occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aroon {
    pub period: usize,
}

impl Aroon {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for Aroon {
    fn default() -> Self {
        Self::new(25)
    }
}

impl Indicator for Aroon {
    type Output = AroonOutput;

    fn name(&self) -> &str {
        "Aroon"
    }

    fn min_bars(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("period", self.period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> AroonOutput {
        let period = self.period;
        let period_f64 = period as f64;
        let capacity = bars.len() - period;
        let mut output = AroonOutput {
            up: Vec::with_capacity(capacity),
            down: Vec::with_capacity(capacity),
            oscillator: Vec::with_capacity(capacity),
        };

        for (offset, window) in bars.windows(period + 1).enumerate() {
            // Later bars win ties
            let (mut high_at, mut low_at) = (0, 0);
            for (j, bar) in window.iter().enumerate() {
                if bar.high >= window[high_at].high {
                    high_at = j;
                }
                if bar.low <= window[low_at].low {
                    low_at = j;
                }
            }

            let since_high = period - high_at;
            let since_low = period - low_at;
            let up = (period - since_high) as f64 / period_f64 * 100.0;
            let down = (period - since_low) as f64 / period_f64 * 100.0;
            let time = bars[offset + period].time;

            output.up.push(IndicatorPoint::new(time, up));
            output.down.push(IndicatorPoint::new(time, down));
            output.oscillator.push(IndicatorPoint::new(time, up - down));
        }

        output
    }
}

/// Parabolic SAR output. `trend` is `1.0` in an uptrend, `-1.0` in a downtrend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParabolicSarOutput {
    pub sar: IndicatorOutput,
    pub trend: IndicatorOutput,
}

impl From<ParabolicSarOutput> for Output {
    fn from(output: ParabolicSarOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("sar", output.sar),
            NamedLine::new("trend", output.trend),
        ])
    }
}

/// Parabolic stop and reverse.
///
/// The initial trend is taken from the second close versus the first. On a
/// reversal the SAR jumps to the extreme point of the trend that ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParabolicSar {
    /// Acceleration factor start and increment.
    pub step: f64,
    /// Acceleration factor cap.
    pub max: f64,
}

impl ParabolicSar {
    pub fn new(step: f64, max: f64) -> Self {
        Self { step, max }
    }
}

impl Default for ParabolicSar {
    fn default() -> Self {
        Self::new(0.02, 0.2)
    }
}

impl Indicator for ParabolicSar {
    type Output = ParabolicSarOutput;

    fn name(&self) -> &str {
        "PSAR"
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .positive("step", self.step)
            .positive("max", self.max)
            .require("max", self.max >= self.step, "must not be below step")
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> ParabolicSarOutput {
        let mut rising = bars[1].close > bars[0].close;
        let (mut sar, mut ep) = if rising {
            (bars[0].low, bars[0].high)
        } else {
            (bars[0].high, bars[0].low)
        };
        let mut af = self.step;

        let mut output = ParabolicSarOutput {
            sar: Vec::with_capacity(bars.len() - 1),
            trend: Vec::with_capacity(bars.len() - 1),
        };

        for i in 1..bars.len() {
            let bar = &bars[i];
            let mut next = sar + af * (ep - sar);

            if rising {
                // Never above the prior two lows
                next = next.min(bars[i - 1].low);
                if i >= 2 {
                    next = next.min(bars[i - 2].low);
                }

                if bar.low < next {
                    rising = false;
                    next = ep;
                    ep = bar.low;
                    af = self.step;
                } else if bar.high > ep {
                    ep = bar.high;
                    af = (af + self.step).min(self.max);
                }
            } else {
                // Never below the prior two highs
                next = next.max(bars[i - 1].high);
                if i >= 2 {
                    next = next.max(bars[i - 2].high);
                }

                if bar.high > next {
                    rising = true;
                    next = ep;
                    ep = bar.high;
                    af = self.step;
                } else if bar.low < ep {
                    ep = bar.low;
                    af = (af + self.step).min(self.max);
                }
            }

            sar = next;
            output.sar.push(IndicatorPoint::new(bar.time, sar));
            output
                .trend
                .push(IndicatorPoint::new(bar.time, if rising { 1.0 } else { -1.0 }));
        }

        output
    }
}

//! Ichimoku Kinko Hyo.
//!
//! The only indicator whose points can carry times outside the input
//! series: the Senkou spans are displaced forward past the last bar and
//! their times are extrapolated from the mean bar interval. Series with
//! gaps (weekends, overnight sessions) get approximate future times.

use serde::{Deserialize, Serialize};
use ta_core::{
    Bar, Diagnostics, Indicator, IndicatorOutput, IndicatorPoint, NamedLine, Output, ParamCheck,
};

use crate::smoothing::{self, OffsetSeries};

/// Ichimoku output lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IchimokuOutput {
    /// Conversion line
    pub tenkan: IndicatorOutput,
    /// Base line
    pub kijun: IndicatorOutput,
    /// Leading span A, displaced forward
    pub senkou_a: IndicatorOutput,
    /// Leading span B, displaced forward
    pub senkou_b: IndicatorOutput,
    /// Lagging span, displaced backward
    pub chikou: IndicatorOutput,
}

impl From<IchimokuOutput> for Output {
    fn from(output: IchimokuOutput) -> Self {
        Output::Multi(vec![
            NamedLine::new("tenkan", output.tenkan),
            NamedLine::new("kijun", output.kijun),
            NamedLine::new("senkou_a", output.senkou_a),
            NamedLine::new("senkou_b", output.senkou_b),
            NamedLine::new("chikou", output.chikou),
        ])
    }
}

/// Maps input indices, including ones past the last bar, to times.
struct Timeline<'a> {
    bars: &'a [Bar],
    interval: i64,
}

impl<'a> Timeline<'a> {
    fn new(bars: &'a [Bar]) -> Self {
        let interval = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) if bars.len() > 1 => {
                ((last.time - first.time) as f64 / (bars.len() - 1) as f64).round() as i64
            }
            _ => 0,
        };
        Self { bars, interval }
    }

    fn time_at(&self, index: usize) -> i64 {
        match self.bars.get(index) {
            Some(bar) => bar.time,
            None => {
                let last_index = self.bars.len().saturating_sub(1);
                let last_time = self.bars.last().map_or(0, |bar| bar.time);
                last_time + (index - last_index) as i64 * self.interval
            }
        }
    }

    fn shifted(&self, series: &OffsetSeries, shift: usize) -> IndicatorOutput {
        series
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| IndicatorPoint::new(self.time_at(series.start + i + shift), value))
            .collect()
    }
}

/// Ichimoku cloud with the classic 9 / 26 / 52 periods.
///
/// Senkou spans are displaced forward by `kijun_period` bars, the Chikou
/// span backward by the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ichimoku {
    pub tenkan_period: usize,
    pub kijun_period: usize,
    pub senkou_b_period: usize,
}

impl Ichimoku {
    pub fn new(tenkan_period: usize, kijun_period: usize, senkou_b_period: usize) -> Self {
        Self {
            tenkan_period,
            kijun_period,
            senkou_b_period,
        }
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9, 26, 52)
    }
}

impl Indicator for Ichimoku {
    type Output = IchimokuOutput;

    fn name(&self) -> &str {
        "Ichimoku"
    }

    fn min_bars(&self) -> usize {
        self.tenkan_period.max(self.kijun_period)
    }

    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool {
        ParamCheck::new(self.name(), diagnostics)
            .period("tenkan_period", self.tenkan_period)
            .period("kijun_period", self.kijun_period)
            .period("senkou_b_period", self.senkou_b_period)
            .finish()
    }

    fn compute(&self, bars: &[Bar]) -> IchimokuOutput {
        let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let low: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let midpoint = |period: usize| {
            OffsetSeries::from_window(period, smoothing::rolling_midpoint(&high, &low, period))
        };

        let tenkan = midpoint(self.tenkan_period);
        let kijun = midpoint(self.kijun_period);
        let senkou_a = tenkan.zip_with(&kijun, |t, k| (t + k) / 2.0);
        // Empty until the series covers the longest window
        let senkou_b = midpoint(self.senkou_b_period);

        let timeline = Timeline::new(bars);
        let shift = self.kijun_period;

        let chikou = bars[shift..]
            .iter()
            .zip(bars)
            .map(|(current, earlier)| IndicatorPoint::new(earlier.time, current.close))
            .collect();

        IchimokuOutput {
            tenkan: tenkan.points(bars),
            kijun: kijun.points(bars),
            senkou_a: timeline.shifted(&senkou_a, shift),
            senkou_b: timeline.shifted(&senkou_b, shift),
            chikou,
        }
    }
}

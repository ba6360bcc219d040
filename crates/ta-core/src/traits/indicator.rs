//! Indicator trait definitions.

use crate::diagnostics::Diagnostics;
use crate::types::Bar;

/// Trait for technical indicators.
///
/// An indicator is a value object holding its parameters. Calculation is a
/// pure function of those parameters and the input bars: no state is kept
/// between calls and the same input always yields bit-identical output.
///
/// Implementors provide [`check_params`](Indicator::check_params),
/// [`min_bars`](Indicator::min_bars) and [`compute`](Indicator::compute);
/// callers use [`calculate`](Indicator::calculate) or
/// [`calculate_with`](Indicator::calculate_with), which handle invalid
/// parameters and short series by returning an empty output.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output: Default;

    /// Short display name, e.g. `"RSI"`.
    fn name(&self) -> &str;

    /// Minimum number of bars before the first output value exists.
    ///
    /// Only meaningful when [`check_params`](Indicator::check_params)
    /// accepts the parameters.
    fn min_bars(&self) -> usize;

    /// Validate parameters, recording rejections and warnings.
    ///
    /// Returns `false` if the calculation must be skipped.
    fn check_params(&self, diagnostics: &mut Diagnostics) -> bool;

    /// Calculate over bars already known to satisfy `min_bars`, with
    /// parameters already accepted by `check_params`.
    fn compute(&self, bars: &[Bar]) -> Self::Output;

    /// Calculate indicator values, recording diagnostics.
    ///
    /// # Returns
    /// The indicator output, empty for rejected parameters or a series
    /// shorter than the warm-up period.
    fn calculate_with(&self, bars: &[Bar], diagnostics: &mut Diagnostics) -> Self::Output {
        if !self.check_params(diagnostics) {
            return Self::Output::default();
        }
        let required = self.min_bars();
        if bars.len() < required {
            diagnostics.insufficient_data(self.name(), required, bars.len());
            return Self::Output::default();
        }
        self.compute(bars)
    }

    /// Calculate indicator values, discarding diagnostics.
    ///
    /// Diagnostics are still forwarded to `tracing`.
    fn calculate(&self, bars: &[Bar]) -> Self::Output {
        let mut diagnostics = Diagnostics::new();
        self.calculate_with(bars, &mut diagnostics)
    }

}

/// Fluent parameter validation used by `check_params` implementations.
///
/// Every failed check is recorded; `finish` reports whether all passed.
pub struct ParamCheck<'a> {
    indicator: &'a str,
    diagnostics: &'a mut Diagnostics,
    ok: bool,
}

impl<'a> ParamCheck<'a> {
    pub fn new(indicator: &'a str, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            indicator,
            diagnostics,
            ok: true,
        }
    }

    /// A window length must be at least 1.
    pub fn period(mut self, name: &'static str, value: usize) -> Self {
        if value == 0 {
            self.reject(name, "must be greater than 0".to_string());
        }
        self
    }

    /// A finite value strictly greater than zero.
    pub fn positive(mut self, name: &'static str, value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            self.reject(name, format!("must be a positive number, got {value}"));
        }
        self
    }

    /// A finite value greater than or equal to zero.
    pub fn non_negative(mut self, name: &'static str, value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            self.reject(name, format!("must be a non-negative number, got {value}"));
        }
        self
    }

    /// An arbitrary condition.
    pub fn require(mut self, name: &'static str, condition: bool, reason: &str) -> Self {
        if !condition {
            self.reject(name, reason.to_string());
        }
        self
    }

    /// Record a warning without rejecting.
    pub fn warn_if(mut self, condition: bool, reason: impl FnOnce() -> String) -> Self {
        if condition {
            self.diagnostics.non_standard(self.indicator, reason());
        }
        self
    }

    fn reject(&mut self, name: &'static str, reason: String) {
        self.diagnostics
            .invalid_parameter(self.indicator, name, reason);
        self.ok = false;
    }

    pub fn finish(self) -> bool {
        self.ok
    }
}

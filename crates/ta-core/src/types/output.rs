//! Indicator output types.

use serde::{Deserialize, Serialize};

/// One output sample.
///
/// `time` is taken from the input bar the value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub time: i64,
    pub value: f64,
}

impl IndicatorPoint {
    #[inline]
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A single indicator line, front-truncated by the warm-up period.
pub type IndicatorOutput = Vec<IndicatorPoint>;

/// A named line of a multi-output indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLine {
    pub name: String,
    pub points: IndicatorOutput,
}

impl NamedLine {
    pub fn new(name: impl Into<String>, points: IndicatorOutput) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Uniform output shape returned through the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum Output {
    Single(IndicatorOutput),
    Multi(Vec<NamedLine>),
}

impl Output {
    /// Name used for the only line of a single-series output.
    pub const VALUE: &'static str = "value";

    /// True if no line has any point.
    pub fn is_empty(&self) -> bool {
        match self {
            Output::Single(points) => points.is_empty(),
            Output::Multi(lines) => lines.iter().all(|line| line.points.is_empty()),
        }
    }

    /// Look up a line by name. A single-series output answers to `"value"`.
    pub fn line(&self, name: &str) -> Option<&[IndicatorPoint]> {
        match self {
            Output::Single(points) if name == Self::VALUE => Some(points),
            Output::Single(_) => None,
            Output::Multi(lines) => lines
                .iter()
                .find(|line| line.name == name)
                .map(|line| line.points.as_slice()),
        }
    }

    /// Iterate over `(name, points)` pairs.
    pub fn lines(&self) -> Box<dyn Iterator<Item = (&str, &[IndicatorPoint])> + '_> {
        match self {
            Output::Single(points) => Box::new(std::iter::once((Self::VALUE, points.as_slice()))),
            Output::Multi(lines) => Box::new(
                lines
                    .iter()
                    .map(|line| (line.name.as_str(), line.points.as_slice())),
            ),
        }
    }

    /// True if every value is finite (no NaN or infinity leaked).
    pub fn is_finite(&self) -> bool {
        self.lines()
            .all(|(_, points)| points.iter().all(|p| p.value.is_finite()))
    }
}

impl From<IndicatorOutput> for Output {
    fn from(points: IndicatorOutput) -> Self {
        Output::Single(points)
    }
}

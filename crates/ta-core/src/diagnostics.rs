//! Structured diagnostics emitted by indicator calculations.
//!
//! Calculations never fail for data conditions. Instead they record what
//! happened into a [`Diagnostics`] sink owned by the caller, so tests and
//! consumers can inspect warnings without capturing log output. Every
//! recorded diagnostic is also forwarded to `tracing`.

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Expected condition, e.g. a series fragment shorter than the warm-up.
    Info,
    /// Computation proceeded but the configuration is unusual.
    Warning,
    /// Computation was skipped and an empty output returned.
    Error,
}

impl Severity {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was detected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    InsufficientData { required: usize, available: usize },
    InvalidParameter { name: &'static str, reason: String },
    NonStandardParameters { reason: String },
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Short name of the indicator that produced it.
    pub indicator: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "{}: insufficient data, need {} bars, have {}",
                self.indicator, required, available
            ),
            DiagnosticKind::InvalidParameter { name, reason } => {
                write!(f, "{}: invalid parameter `{}`: {}", self.indicator, name, reason)
            }
            DiagnosticKind::NonStandardParameters { reason } => {
                write!(f, "{}: non-standard parameters: {}", self.indicator, reason)
            }
        }
    }
}

/// Collector for diagnostics produced during one or more calculations.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the series is shorter than the indicator's warm-up.
    pub fn insufficient_data(&mut self, indicator: &str, required: usize, available: usize) {
        debug!(indicator, required, available, "insufficient data");
        self.push(Diagnostic {
            indicator: indicator.to_string(),
            severity: Severity::Info,
            kind: DiagnosticKind::InsufficientData {
                required,
                available,
            },
        });
    }

    /// Record a rejected parameter.
    pub fn invalid_parameter(&mut self, indicator: &str, name: &'static str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(indicator, parameter = name, %reason, "invalid parameter");
        self.push(Diagnostic {
            indicator: indicator.to_string(),
            severity: Severity::Error,
            kind: DiagnosticKind::InvalidParameter { name, reason },
        });
    }

    /// Record an accepted but unusual configuration.
    pub fn non_standard(&mut self, indicator: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(indicator, %reason, "non-standard parameters");
        self.push(Diagnostic {
            indicator: indicator.to_string(),
            severity: Severity::Warning,
            kind: DiagnosticKind::NonStandardParameters { reason },
        });
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// All recorded diagnostics, in order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Diagnostics at or above `severity`.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity >= severity)
    }

    /// True if any calculation was skipped because of a rejected parameter.
    pub fn has_errors(&self) -> bool {
        self.at_least(Severity::Error).next().is_some()
    }

    /// True if any warning or error was recorded.
    pub fn has_warnings(&self) -> bool {
        self.at_least(Severity::Warning).next().is_some()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop all recorded diagnostics.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_filtering() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insufficient_data("RSI", 15, 3);
        assert!(!diagnostics.has_warnings());
        assert!(!diagnostics.has_errors());

        diagnostics.non_standard("MACD", "fast period 26 >= slow period 12");
        assert!(diagnostics.has_warnings());
        assert!(!diagnostics.has_errors());

        diagnostics.invalid_parameter("SMA", "period", "must be greater than 0");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.at_least(Severity::Warning).count(), 2);
    }

    #[test]
    fn test_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.invalid_parameter("ATR", "period", "must be greater than 0");
        assert_eq!(
            diagnostics.entries()[0].to_string(),
            "ATR: invalid parameter `period`: must be greater than 0"
        );
    }

    #[test]
    fn test_severity_display_matches_json() {
        for severity in [Severity::Info, Severity::Warning, Severity::Error] {
            let json = serde_json::to_value(severity).unwrap();
            assert_eq!(json, severity.to_string());
        }
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_serialize() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insufficient_data("CCI", 20, 5);
        let json = serde_json::to_value(&diagnostics.entries()[0]).unwrap();

        assert_eq!(json["kind"], "insufficient_data");
        assert_eq!(json["severity"], "info");
        assert_eq!(json["required"], 20);
    }

    #[test]
    fn test_clear() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insufficient_data("OBV", 1, 0);
        diagnostics.clear();
        assert!(diagnostics.is_empty());
    }
}

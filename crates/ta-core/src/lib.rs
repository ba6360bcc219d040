//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceSource)
//! - Output types (IndicatorPoint, Output, NamedLine)
//! - The `Indicator` calculation contract
//! - The diagnostics channel and error taxonomy

pub mod diagnostics;
pub mod error;
pub mod traits;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{DataError, IndicatorError};
pub use traits::*;
pub use types::*;

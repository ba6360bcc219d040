//! Core data types for the indicator engine.

mod bar;
mod output;
mod price_source;

pub use bar::{validate_series, Bar};
pub use output::{IndicatorOutput, IndicatorPoint, NamedLine, Output};
pub use price_source::PriceSource;

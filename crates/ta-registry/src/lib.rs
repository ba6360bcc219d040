//! Indicator registry.
//!
//! Maps indicator type ids to their metadata, default parameters and a
//! uniform calculation entry point:
//! - [`IndicatorType`]: the closed set of type ids, parsed with `FromStr`
//! - [`Params`]: tagged union of every indicator's parameters
//! - [`IndicatorRegistry`]: lookup table built once

mod indicator_type;
mod params;
mod registry;

pub use indicator_type::IndicatorType;
pub use params::Params;
pub use registry::{Calculation, Category, IndicatorRegistry, RegistryEntry};

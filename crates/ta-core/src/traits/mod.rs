//! Core traits for the indicator engine.

mod indicator;

pub use indicator::{Indicator, ParamCheck};

//! Utility modules: JSON decoding of parameter values and numeric parsing.
pub mod json;
pub mod num;

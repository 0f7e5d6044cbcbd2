//! Implements the base structures for quadrature-point data

mod config;
mod constants;
mod error;
mod field;
mod fields;
mod parameters;
mod quantity;
mod samples;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::error::*;
pub use crate::base::field::*;
pub use crate::base::fields::*;
pub use crate::base::parameters::*;
pub use crate::base::quantity::*;
pub use crate::base::samples::*;

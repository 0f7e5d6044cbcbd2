//! Makes available common structures needed to evaluate constitutive laws
//!
//! You may write `use qplaws::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, QpError, QpField, QpFields, QSet, Q};
pub use crate::base::{ParamEos, ParamLaw, ParamMisesEos, ParamYield};
pub use crate::material::{Law, LawDispatcher, LawTrait, MisesEos, MisesEosState};

//! Implements constitutive laws evaluated at quadrature points

mod dispatcher;
mod energy;
mod eos;
mod internal_vars;
mod kinematics;
mod law;
mod mises_eos;
mod return_mapping;
mod yield_function;
pub use crate::material::dispatcher::*;
pub use crate::material::energy::*;
pub use crate::material::eos::*;
pub use crate::material::internal_vars::*;
pub use crate::material::kinematics::*;
pub use crate::material::law::*;
pub use crate::material::mises_eos::*;
pub use crate::material::return_mapping::*;
pub use crate::material::yield_function::*;

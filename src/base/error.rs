use super::Q;
use crate::StrError;
use std::fmt;
use thiserror::Error;

/// Identifies the local iterative solve that failed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Solve {
    /// Newton iterations of the plastic return mapping
    ReturnMapping,

    /// Fixed-point iterations coupling the energy and the equation of state
    EnergyPressure,
}

/// Identifies how a quantity was expected to be used by a law
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Supplied by the host
    Input,

    /// Written by the law
    Output,

    /// Committed or trial internal variable held by the law
    Internal,
}

/// Defines the errors raised while managing and evaluating quadrature-point data
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QpError {
    /// The value width does not match the field width
    #[error("shape mismatch: the field has {expected} components per point but the value has {given}")]
    ShapeMismatch { expected: usize, given: usize },

    /// The point index is outside [0, n)
    #[error("index {index} is out of range for {len} quadrature points")]
    IndexOutOfRange { index: usize, len: usize },

    /// A local solve hit its iteration cap without meeting the tolerance
    #[error("{solve} did not converge at point {point} after {iterations} iterations (residual = {residual:e})")]
    ConvergenceFailure {
        solve: Solve,
        point: usize,
        iterations: usize,
        residual: f64,
    },

    /// The quantity was not declared for the requested role
    #[error("quantity {quantity} is not available as {role}")]
    UnsupportedQuantity { quantity: Q, role: Role },

    /// Invalid data or usage described by a static message
    #[error("{0}")]
    Invalid(StrError),
}

impl From<StrError> for QpError {
    fn from(message: StrError) -> Self {
        QpError::Invalid(message)
    }
}

impl fmt::Display for Solve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solve::ReturnMapping => write!(f, "return mapping"),
            Solve::EnergyPressure => write!(f, "energy-pressure iteration"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => write!(f, "input"),
            Role::Output => write!(f, "output"),
            Role::Internal => write!(f, "internal variable"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

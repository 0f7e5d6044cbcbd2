use russell_tensor::Mandel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Defines the physical quantities stored at quadrature points
///
/// Note: The fixed numbering scheme allows indexing arrays of fields by quantity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Q {
    /// Velocity gradient L (general 3×3 tensor)
    L = 0,

    /// Cauchy stress σ (symmetric 3×3 tensor)
    Sigma = 1,

    /// Time step h
    TimeStep = 2,

    /// Accumulated plastic multiplier λ
    Lambda = 3,

    /// Specific internal energy e
    E = 4,

    /// Density ρ
    Rho = 5,
}

/// Holds a set of quantities
pub type QSet = BTreeSet<Q>;

impl Q {
    /// Number of quantities (cardinality of the enumeration)
    pub const LAST: usize = 6;

    /// Holds all quantities in index order
    pub const ALL: [Q; Q::LAST] = [Q::L, Q::Sigma, Q::TimeStep, Q::Lambda, Q::E, Q::Rho];

    /// Returns the position of this quantity in arrays sized by [Q::LAST]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the number of components of one record of this quantity
    pub fn width(self) -> usize {
        match self {
            Q::L => Mandel::General.dim(),
            Q::Sigma => Mandel::Symmetric.dim(),
            Q::TimeStep | Q::Lambda | Q::E | Q::Rho => 1,
        }
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Q::L => "L",
            Q::Sigma => "SIGMA",
            Q::TimeStep => "TIME_STEP",
            Q::Lambda => "LAMBDA",
            Q::E => "E",
            Q::Rho => "RHO",
        };
        write!(f, "{}", name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

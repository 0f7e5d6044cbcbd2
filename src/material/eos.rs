use crate::base::ParamEos;
use crate::StrError;

/// Specifies the essential functions of equations of state
pub trait EosTrait: Send + Sync {
    /// Calculates the pressure p(η, e), positive in compression
    ///
    /// * `eta` -- relative volumetric compression η = ρ/ρ0 - 1
    /// * `e` -- specific internal energy
    fn pressure(&self, eta: f64, e: f64) -> f64;
}

/// Implements a null equation of state (p = 0)
pub struct NullEos {}

/// Implements a linear bulk response (p = K η)
pub struct LinearEos {
    bulk: f64,
}

/// Implements the linear polynomial equation of state
pub struct PolynomialEos {
    cc: [f64; 7],
    rho0: f64,
}

/// Implements the ideal-gas equation of state
pub struct IdealGasEos {
    gamma: f64,
    rho0: f64,
}

impl EosTrait for NullEos {
    fn pressure(&self, _eta: f64, _e: f64) -> f64 {
        0.0
    }
}

impl EosTrait for LinearEos {
    fn pressure(&self, eta: f64, _e: f64) -> f64 {
        self.bulk * eta
    }
}

impl EosTrait for PolynomialEos {
    fn pressure(&self, eta: f64, e: f64) -> f64 {
        let c = &self.cc;
        let (c2, c6) = if eta < 0.0 { (0.0, 0.0) } else { (c[2], c[6]) };
        let eta2 = eta * eta;
        c[0] + c[1] * eta + c2 * eta2 + c[3] * eta2 * eta + (c[4] + c[5] * eta + c6 * eta2) * self.rho0 * e
    }
}

impl EosTrait for IdealGasEos {
    fn pressure(&self, eta: f64, e: f64) -> f64 {
        (self.gamma - 1.0) * self.rho0 * (1.0 + eta) * e
    }
}

/// Holds the actual equation of state implementation
pub struct Eos {
    /// Holds the actual model implementation
    pub actual: Box<dyn EosTrait>,
}

impl Eos {
    /// Allocates a new instance
    pub fn new(param: &ParamEos, rho0: f64) -> Result<Self, StrError> {
        let actual: Box<dyn EosTrait> = match *param {
            ParamEos::Null => Box::new(NullEos {}),
            ParamEos::Linear { bulk } => {
                if bulk < 0.0 {
                    return Err("the bulk modulus must be ≥ 0.0");
                }
                Box::new(LinearEos { bulk })
            }
            ParamEos::Polynomial { cc } => Box::new(PolynomialEos { cc, rho0 }),
            ParamEos::IdealGas { gamma } => {
                if gamma <= 1.0 {
                    return Err("the ratio of specific heats must be > 1.0");
                }
                Box::new(IdealGasEos { gamma, rho0 })
            }
        };
        Ok(Eos { actual })
    }

    /// Calculates the pressure p(η, e)
    pub fn pressure(&self, eta: f64, e: f64) -> f64 {
        self.actual.pressure(eta, e)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

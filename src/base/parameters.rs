use serde::{Deserialize, Serialize};

/// Holds parameters for the yield function Y(λ, Δλ)
///
/// The yield function gives the current size of the von Mises yield surface in terms
/// of the accumulated plastic multiplier λ and its increment Δλ.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamYield {
    /// Perfect plasticity
    ///
    /// ```text
    /// Y = y0
    /// ```
    Perfect {
        /// Yield stress
        y0: f64,
    },

    /// Linear isotropic hardening
    ///
    /// ```text
    /// Y = y0 + H (λ + Δλ)
    /// ```
    Linear {
        /// Initial yield stress
        y0: f64,

        /// Hardening modulus (negative values render softening)
        hh: f64,
    },

    /// Exponential saturation hardening (Voce)
    ///
    /// ```text
    /// Y = y0 + (y_inf - y0) (1 - exp(-w (λ + Δλ)))
    /// ```
    Saturation {
        /// Initial yield stress
        y0: f64,

        /// Final (saturated) yield stress
        y_inf: f64,

        /// Saturation rate
        w: f64,
    },
}

/// Holds parameters for equations of state p(η, e)
///
/// Here, η = ρ/ρ0 - 1 is the relative volumetric compression and e is the
/// specific internal energy. The pressure is positive in compression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamEos {
    /// Null pressure, e.g., for purely deviatoric analyses
    Null,

    /// Linear bulk response
    ///
    /// ```text
    /// p = K η
    /// ```
    Linear {
        /// Bulk modulus
        bulk: f64,
    },

    /// Linear polynomial equation of state
    ///
    /// ```text
    /// p = c0 + c1 η + c2 η² + c3 η³ + (c4 + c5 η + c6 η²) ρ0 e
    /// ```
    ///
    /// The c2 and c6 terms are ignored in tension (η < 0).
    Polynomial {
        /// Coefficients c0 to c6
        cc: [f64; 7],
    },

    /// Ideal gas
    ///
    /// ```text
    /// p = (γ - 1) ρ0 (1 + η) e
    /// ```
    IdealGas {
        /// Ratio of specific heats γ
        gamma: f64,
    },
}

/// Holds parameters for the von Mises plasticity model coupled with an equation of state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamMisesEos {
    /// Shear modulus μ
    pub shear: f64,

    /// Reference density ρ0
    pub rho0: f64,

    /// Yield function (hardening law)
    pub yield_fn: ParamYield,

    /// Equation of state
    pub eos: ParamEos,
}

/// Holds parameters for constitutive laws
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamLaw {
    /// Rate-form von Mises plasticity with equation of state
    MisesEos(ParamMisesEos),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamEos, ParamLaw, ParamMisesEos, ParamYield};

    #[test]
    fn derive_works() {
        let p = ParamMisesEos {
            shear: 1e5,
            rho0: 1000.0,
            yield_fn: ParamYield::Linear { y0: 200.0, hh: 10.0 },
            eos: ParamEos::Linear { bulk: 2e5 },
        };
        let q = p.clone();
        assert_eq!(format!("{:?}", q.yield_fn), "Linear { y0: 200.0, hh: 10.0 }");
        assert_eq!(p, q);
    }

    #[test]
    fn serialize_works() {
        let param = ParamLaw::MisesEos(ParamMisesEos {
            shear: 1.0,
            rho0: 2.0,
            yield_fn: ParamYield::Perfect { y0: 3.0 },
            eos: ParamEos::Null,
        });
        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(
            json,
            r#"{"MisesEos":{"shear":1.0,"rho0":2.0,"yield_fn":{"Perfect":{"y0":3.0}},"eos":"Null"}}"#
        );
        let back: ParamLaw = serde_json::from_str(&json).unwrap();
        assert_eq!(back, param);
    }
}

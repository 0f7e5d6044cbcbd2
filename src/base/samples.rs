use super::{ParamEos, ParamLaw, ParamMisesEos, ParamYield};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns parameters for perfect plasticity without pressure response
    ///
    /// μ = 1e5, ρ0 = 1000, Y = 200, p = 0
    pub fn param_mises_eos_perfect() -> ParamMisesEos {
        ParamMisesEos {
            shear: 1e5,
            rho0: 1000.0,
            yield_fn: ParamYield::Perfect { y0: 200.0 },
            eos: ParamEos::Null,
        }
    }

    /// Returns parameters for linear hardening with a linear bulk response
    pub fn param_mises_eos_linear_hardening() -> ParamMisesEos {
        ParamMisesEos {
            shear: 1e5,
            rho0: 1000.0,
            yield_fn: ParamYield::Linear { y0: 200.0, hh: 2e4 },
            eos: ParamEos::Linear { bulk: 2e5 },
        }
    }

    /// Returns parameters for saturation hardening with a polynomial equation of state
    pub fn param_mises_eos_saturation() -> ParamMisesEos {
        ParamMisesEos {
            shear: 1e5,
            rho0: 1000.0,
            yield_fn: ParamYield::Saturation {
                y0: 200.0,
                y_inf: 300.0,
                w: 50.0,
            },
            eos: ParamEos::Polynomial {
                cc: [0.0, 2e5, 1e5, 0.0, 0.0, 0.5, 0.0],
            },
        }
    }

    /// Returns law parameters wrapping [SampleParams::param_mises_eos_perfect]
    pub fn param_law_perfect() -> ParamLaw {
        ParamLaw::MisesEos(SampleParams::param_mises_eos_perfect())
    }
}

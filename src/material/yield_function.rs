use crate::base::ParamYield;
use crate::StrError;
use num_complex::Complex64;

/// Specifies the yield function Y(λ, Δλ), i.e., the current size of the yield surface
///
/// The function must be analytic in Δλ because the derivative w.r.t Δλ is computed
/// by complex-step differentiation:
///
/// ```text
/// dY/dΔλ ≈ Im(Y(λ, Δλ + i h)) / h
/// ```
pub trait YieldTrait: Send + Sync {
    /// Evaluates Y(λ, Δλ) at a complex-valued increment
    fn evaluate(&self, lambda: f64, del_lambda: Complex64) -> Complex64;
}

/// Implements perfect plasticity
pub struct PerfectYield {
    y0: f64,
}

/// Implements linear isotropic hardening
pub struct LinearHardening {
    y0: f64,
    hh: f64,
}

/// Implements exponential saturation (Voce) hardening
pub struct SaturationHardening {
    y0: f64,
    y_inf: f64,
    w: f64,
}

impl YieldTrait for PerfectYield {
    fn evaluate(&self, _lambda: f64, _del_lambda: Complex64) -> Complex64 {
        Complex64::new(self.y0, 0.0)
    }
}

impl YieldTrait for LinearHardening {
    fn evaluate(&self, lambda: f64, del_lambda: Complex64) -> Complex64 {
        self.y0 + self.hh * (lambda + del_lambda)
    }
}

impl YieldTrait for SaturationHardening {
    fn evaluate(&self, lambda: f64, del_lambda: Complex64) -> Complex64 {
        let decay = (-self.w * (lambda + del_lambda)).exp();
        self.y0 + (self.y_inf - self.y0) * (1.0 - decay)
    }
}

/// Holds the actual yield function implementation
pub struct Yield {
    /// Holds the actual model implementation
    pub actual: Box<dyn YieldTrait>,
}

impl Yield {
    /// Allocates a new instance
    pub fn new(param: &ParamYield) -> Result<Self, StrError> {
        let actual: Box<dyn YieldTrait> = match *param {
            ParamYield::Perfect { y0 } => {
                if y0 <= 0.0 {
                    return Err("the yield stress must be > 0.0");
                }
                Box::new(PerfectYield { y0 })
            }
            ParamYield::Linear { y0, hh } => {
                if y0 <= 0.0 {
                    return Err("the yield stress must be > 0.0");
                }
                Box::new(LinearHardening { y0, hh })
            }
            ParamYield::Saturation { y0, y_inf, w } => {
                if y0 <= 0.0 || y_inf <= 0.0 {
                    return Err("the yield stress must be > 0.0");
                }
                if w < 0.0 {
                    return Err("the saturation rate must be ≥ 0.0");
                }
                Box::new(SaturationHardening { y0, y_inf, w })
            }
        };
        Ok(Yield { actual })
    }

    /// Calculates Y(λ, Δλ) at a real increment
    pub fn value(&self, lambda: f64, del_lambda: f64) -> f64 {
        self.actual.evaluate(lambda, Complex64::new(del_lambda, 0.0)).re
    }

    /// Calculates Y(λ, Δλ) and dY/dΔλ using a complex step of size `step`
    pub fn value_and_derivative(&self, lambda: f64, del_lambda: f64, step: f64) -> (f64, f64) {
        let y = self.actual.evaluate(lambda, Complex64::new(del_lambda, step));
        (y.re, y.im / step)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

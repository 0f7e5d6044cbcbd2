use super::Yield;
use crate::base::{Config, QpError, Solve};

/// Holds the results of the radial return mapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnMapping {
    /// Increment of the plastic multiplier Δλ
    pub del_lambda: f64,

    /// Scale factor α such that s = α s_trial
    pub alpha: f64,

    /// Number of Newton iterations (zero in the elastic case)
    pub iterations: usize,

    /// Indicates that no plastic flow occurred
    pub elastic: bool,
}

impl ReturnMapping {
    /// Returns the result of an elastic step
    pub fn elastic() -> Self {
        ReturnMapping {
            del_lambda: 0.0,
            alpha: 1.0,
            iterations: 0,
            elastic: true,
        }
    }
}

/// Solves the von Mises return mapping
///
/// Finds Δλ ≥ 0 such that
///
/// ```text
/// f(Δλ) = q_trial - 3 μ Δλ - Y(λ, Δλ) = 0
/// ```
///
/// using Newton's method with df/dΔλ = -(3 μ + dY/dΔλ), where dY/dΔλ comes from the
/// complex-step derivative of the yield function.
///
/// * `shear` -- shear modulus μ
/// * `lambda` -- committed plastic multiplier λ
/// * `q_trial` -- trial equivalent (von Mises) stress
/// * `point` -- index of the quadrature point (for error reporting)
pub fn return_mapping(
    yield_fn: &Yield,
    shear: f64,
    lambda: f64,
    q_trial: f64,
    config: &Config,
    point: usize,
) -> Result<ReturnMapping, QpError> {
    // elastic update
    let y_trial = yield_fn.value(lambda, 0.0);
    if q_trial < y_trial || q_trial == 0.0 {
        return Ok(ReturnMapping::elastic());
    }

    // Newton iterations
    let scale = f64::max(1.0, q_trial);
    let mut del_lambda = 0.0;
    let mut residual = 0.0;
    for it in 0..=config.n_max_it_newton {
        let (y, dy) = yield_fn.value_and_derivative(lambda, del_lambda, config.complex_step);
        let f = q_trial - 3.0 * shear * del_lambda - y;
        residual = f64::abs(f) / scale;
        if residual < config.tol_newton {
            if del_lambda < 0.0 {
                tracing::warn!(point, del_lambda, "return mapping converged to a negative increment");
                return Err(QpError::Invalid("the plastic multiplier increment must be ≥ 0.0"));
            }
            return Ok(ReturnMapping {
                del_lambda,
                alpha: 1.0 - 3.0 * shear * del_lambda / q_trial,
                iterations: it,
                elastic: false,
            });
        }
        if it == config.n_max_it_newton {
            break;
        }
        let tangent = 3.0 * shear + dy;
        if tangent <= 0.0 {
            tracing::warn!(point, del_lambda, tangent, "return mapping found a non-positive plastic tangent");
            return Err(QpError::Invalid("the plastic tangent 3 μ + dY/dΔλ must be > 0.0"));
        }
        del_lambda += f / tangent;
    }
    tracing::warn!(point, residual, "return mapping did not converge");
    Err(QpError::ConvergenceFailure {
        solve: Solve::ReturnMapping,
        point,
        iterations: config.n_max_it_newton,
        residual,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{return_mapping, ReturnMapping};
    use crate::base::{Config, ParamYield, QpError, Solve};
    use crate::material::Yield;
    use russell_lab::approx_eq;

    const SHEAR: f64 = 1e5;

    #[test]
    fn elastic_and_boundary_cases_work() {
        let config = Config::new();
        let yf = Yield::new(&ParamYield::Linear { y0: 200.0, hh: 1e4 }).unwrap();
        let res = return_mapping(&yf, SHEAR, 0.0, 150.0, &config, 0).unwrap();
        assert_eq!(res, ReturnMapping::elastic());

        // exactly at the yield surface: plastic branch, but Δλ = 0
        let res = return_mapping(&yf, SHEAR, 0.0, 200.0, &config, 0).unwrap();
        assert_eq!(res.del_lambda, 0.0);
        assert_eq!(res.alpha, 1.0);
        assert_eq!(res.iterations, 0);
        assert!(!res.elastic);
    }

    #[test]
    fn linear_hardening_works() {
        let config = Config::new();
        let (y0, hh, lambda) = (200.0, 1e4, 0.002);
        let yf = Yield::new(&ParamYield::Linear { y0, hh }).unwrap();
        let q_trial = 500.0;
        let res = return_mapping(&yf, SHEAR, lambda, q_trial, &config, 0).unwrap();
        let correct = (q_trial - y0 - hh * lambda) / (3.0 * SHEAR + hh);
        approx_eq(res.del_lambda, correct, 1e-15);
        assert_eq!(res.iterations, 1);
        let q = res.alpha * q_trial;
        approx_eq(q, yf.value(lambda, res.del_lambda), 1e-10);
    }

    #[test]
    fn saturation_hardening_works() {
        let config = Config::new();
        let yf = Yield::new(&ParamYield::Saturation {
            y0: 200.0,
            y_inf: 300.0,
            w: 500.0,
        })
        .unwrap();
        let q_trial = 900.0;
        let res = return_mapping(&yf, SHEAR, 0.0, q_trial, &config, 0).unwrap();
        assert!(res.del_lambda > 0.0);
        assert!(res.alpha > 0.0 && res.alpha < 1.0);
        approx_eq(res.alpha * q_trial, yf.value(0.0, res.del_lambda), 1e-7);
    }

    #[test]
    fn non_convergence_is_reported() {
        let mut config = Config::new();
        config.set_n_max_it_newton(1).unwrap();
        let yf = Yield::new(&ParamYield::Saturation {
            y0: 200.0,
            y_inf: 300.0,
            w: 5000.0,
        })
        .unwrap();
        let res = return_mapping(&yf, SHEAR, 0.0, 900.0, &config, 7);
        match res {
            Err(QpError::ConvergenceFailure {
                solve,
                point,
                iterations,
                residual,
            }) => {
                assert_eq!(solve, Solve::ReturnMapping);
                assert_eq!(point, 7);
                assert_eq!(iterations, 1);
                assert!(residual > 0.0);
            }
            _ => panic!("convergence failure should be reported"),
        }
    }

    #[test]
    fn strong_softening_is_rejected() {
        let config = Config::new();
        let message = Some(QpError::Invalid("the plastic tangent 3 μ + dY/dΔλ must be > 0.0"));

        // 3 μ + H = -1e5 would give Δλ = -0.003 and α = 2.8
        let yf = Yield::new(&ParamYield::Linear { y0: 200.0, hh: -4e5 }).unwrap();
        assert_eq!(return_mapping(&yf, SHEAR, 0.0, 500.0, &config, 0).err(), message);

        // dY/dΔλ = (Y∞ - Y0) w = -5e5 at λ = 0
        let yf = Yield::new(&ParamYield::Saturation {
            y0: 300.0,
            y_inf: 200.0,
            w: 5000.0,
        })
        .unwrap();
        assert_eq!(return_mapping(&yf, SHEAR, 0.0, 500.0, &config, 0).err(), message);

        // mild softening is fine
        let (y0, hh) = (200.0, -1e5);
        let yf = Yield::new(&ParamYield::Linear { y0, hh }).unwrap();
        let res = return_mapping(&yf, SHEAR, 0.0, 500.0, &config, 0).unwrap();
        approx_eq(res.del_lambda, (500.0 - y0) / (3.0 * SHEAR + hh), 1e-15);
        assert!(res.del_lambda > 0.0);
        assert!(res.alpha < 1.0);
    }
}

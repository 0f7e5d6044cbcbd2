use super::Eos;
use crate::base::{Config, QpError, Solve};

/// Holds the results of the energy-pressure iterations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyPressure {
    /// Converged specific internal energy
    pub energy: f64,

    /// Pressure p(η, e) at the converged energy
    pub pressure: f64,

    /// Number of fixed-point iterations
    pub iterations: usize,
}

/// Solves the energy balance coupled with the equation of state
///
/// Iterates
///
/// ```text
/// e ← ẽ - c p(η, e)
/// ```
///
/// until consecutive iterates differ by less than the tolerance, where
/// `e_tilde` is the energy predictor ẽ and `coef` is c = ½ (h/ρ_mid) tr(D).
///
/// * `e_start` -- first iterate, usually the committed energy
/// * `point` -- index of the quadrature point (for error reporting)
pub fn energy_pressure(
    eos: &Eos,
    eta: f64,
    e_start: f64,
    e_tilde: f64,
    coef: f64,
    config: &Config,
    point: usize,
) -> Result<EnergyPressure, QpError> {
    let mut e_old = e_start;
    let mut residual = 0.0;
    for it in 1..=config.n_max_it_energy {
        let e_new = e_tilde - coef * eos.pressure(eta, e_old);
        residual = f64::abs(e_new - e_old) / f64::max(1.0, f64::abs(e_new));
        if residual < config.tol_energy {
            return Ok(EnergyPressure {
                energy: e_new,
                pressure: eos.pressure(eta, e_new),
                iterations: it,
            });
        }
        e_old = e_new;
    }
    tracing::warn!(point, residual, "energy-pressure iterations did not converge");
    Err(QpError::ConvergenceFailure {
        solve: Solve::EnergyPressure,
        point,
        iterations: config.n_max_it_energy,
        residual,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

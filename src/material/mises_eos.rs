use super::{density_ratio, energy_pressure, return_mapping, spin_half_step, split_velocity_gradient};
use super::{Eos, InternalVars, LawTrait, Yield};
use crate::base::{Config, ParamMisesEos, ParamYield, QpError, QpField, QpFields, QSet, Role, Q};
use crate::StrError;
use rayon::prelude::*;
use russell_tensor::{t2_add, t2_ddot_t2, Mandel, Tensor2};
use std::fmt;
use std::ops::Range;

/// Holds the internal variables of one point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MisesEosState {
    /// Accumulated plastic multiplier λ
    pub lambda: f64,

    /// Specific internal energy e
    pub energy: f64,

    /// Density ρ
    pub rho: f64,
}

/// Holds the results of integrating one point over one time step
#[derive(Clone, Debug)]
pub struct MisesEosUpdate {
    /// Updated stress (symmetric)
    pub sigma: Tensor2,

    /// Trial internal variables
    pub state: MisesEosState,

    /// Increment of the plastic multiplier
    pub del_lambda: f64,

    /// Scale factor of the trial deviatoric stress
    pub alpha: f64,

    /// Pressure (positive in compression)
    pub pressure: f64,
}

/// Implements rate-form von Mises plasticity coupled with an equation of state
///
/// The deviatoric stress follows a radial return mapping with a general (hardening)
/// yield function, whereas the pressure comes from an equation of state with the energy
/// and density updated by the explicit midpoint rule. An objective (Jaumann) stress rate
/// is obtained by applying half of the spin correction before and after the update.
///
/// The pressure is positive in compression and the stress is recombined as σ = s - p I;
/// thus, the mean stress of the output equals -p.
///
/// Inputs: velocity gradient L, previous stress σ, time step h.
///
/// Output: updated stress σ.
///
/// Internal variables: plastic multiplier λ, specific energy e, density ρ.
pub struct MisesEos {
    /// Shear modulus μ
    shear: f64,

    /// Reference density ρ0
    rho0: f64,

    /// Yield function Y(λ, Δλ)
    yield_fn: Yield,

    /// Equation of state p(η, e)
    eos: Eos,

    /// Local solver configuration
    config: Config,

    /// Committed and trial λ, e, ρ
    vars: InternalVars,
}

impl MisesEos {
    /// Allocates a new instance
    pub fn new(config: &Config, param: &ParamMisesEos) -> Result<Self, StrError> {
        if param.shear <= 0.0 {
            return Err("the shear modulus must be > 0.0");
        }
        if param.rho0 <= 0.0 {
            return Err("the reference density must be > 0.0");
        }
        // the plastic tangent 3 μ + dY/dΔλ must stay positive for Δλ ≥ 0
        match param.yield_fn {
            ParamYield::Perfect { .. } => (),
            ParamYield::Linear { hh, .. } => {
                if 3.0 * param.shear + hh <= 0.0 {
                    return Err("the softening is too strong: 3 μ + H must be > 0.0");
                }
            }
            ParamYield::Saturation { y0, y_inf, w } => {
                if 3.0 * param.shear + (y_inf - y0) * w <= 0.0 {
                    return Err("the softening is too strong: 3 μ + (Y∞ - Y0) w must be > 0.0");
                }
            }
        }
        let internal: QSet = [Q::Lambda, Q::E, Q::Rho].into_iter().collect();
        let mut vars = InternalVars::new(&internal);
        vars.set_initial_value(Q::Rho, param.rho0);
        Ok(MisesEos {
            shear: param.shear,
            rho0: param.rho0,
            yield_fn: Yield::new(&param.yield_fn)?,
            eos: Eos::new(&param.eos, param.rho0)?,
            config: *config,
            vars,
        })
    }

    /// Returns the committed internal variables at point i
    pub fn committed_state(&self, i: usize) -> Result<MisesEosState, QpError> {
        Ok(MisesEosState {
            lambda: self.vars.committed(Q::Lambda)?.get_scalar(i)?,
            energy: self.vars.committed(Q::E)?.get_scalar(i)?,
            rho: self.vars.committed(Q::Rho)?.get_scalar(i)?,
        })
    }

    /// Returns the trial internal variables at point i
    pub fn trial_state(&self, i: usize) -> Result<MisesEosState, QpError> {
        Ok(MisesEosState {
            lambda: self.vars.trial(Q::Lambda)?.get_scalar(i)?,
            energy: self.vars.trial(Q::E)?.get_scalar(i)?,
            rho: self.vars.trial(Q::Rho)?.get_scalar(i)?,
        })
    }

    /// Sets the committed (and trial) internal variables at point i
    ///
    /// This is useful to start from a non-reference state, e.g., a pre-compressed material.
    pub fn initialize_state(&mut self, state: &MisesEosState, i: usize) -> Result<(), QpError> {
        if state.rho <= 0.0 {
            return Err(QpError::Invalid("the density must be > 0.0"));
        }
        self.vars.initialize_scalar(Q::Lambda, state.lambda, i)?;
        self.vars.initialize_scalar(Q::E, state.energy, i)?;
        self.vars.initialize_scalar(Q::Rho, state.rho, i)
    }

    /// Integrates the constitutive equations at point i over one time step
    ///
    /// This function only reads data and is safe to call concurrently for distinct points.
    pub fn integrate(&self, inputs: &QpFields, i: usize) -> Result<MisesEosUpdate, QpError> {
        // inputs
        let ll = inputs.require(Q::L, Role::Input)?.get(i)?.as_general();
        let sigma_n = inputs.require(Q::Sigma, Role::Input)?.get(i)?;
        if sigma_n.mandel() != Mandel::Symmetric {
            return Err(QpError::ShapeMismatch {
                expected: Mandel::Symmetric.dim(),
                given: sigma_n.dim(),
            });
        }
        let h = inputs.require(Q::TimeStep, Role::Input)?.get_scalar(i)?;
        if h <= 0.0 {
            return Err(QpError::Invalid("the time step must be > 0.0"));
        }
        let committed = self.committed_state(i)?;

        // rate of deformation D and spin W
        let (dd, ww) = split_velocity_gradient(&ll);
        let mut d_dev = Tensor2::new(Mandel::Symmetric);
        dd.deviator(&mut d_dev);

        // first half of the objective correction
        let sigma_rot = spin_half_step(&sigma_n, &ww, h);
        let mut s_n = Tensor2::new(Mandel::Symmetric);
        sigma_rot.deviator(&mut s_n);

        // elastic predictor: s_trial = s_n + 2 μ dev(D) h
        let mut s_trial = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut s_trial, 1.0, &s_n, 2.0 * self.shear * h, &d_dev);
        let q_trial = s_trial.invariant_sigma_d();

        // plastic corrector
        let rm = return_mapping(&self.yield_fn, self.shear, committed.lambda, q_trial, &self.config, i)?;
        let mut s = Tensor2::new(Mandel::Symmetric);
        s.set_tensor(rm.alpha, &s_trial);

        // density by the midpoint rule
        let rho = committed.rho * density_ratio(&ll, h)?;
        let rho_mid = 0.5 * (committed.rho + rho);
        let eta = rho / self.rho0 - 1.0;

        // energy predictor with midpoint deviatoric stress and committed pressure
        let d_vol = dd.trace();
        let mut s_mid = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut s_mid, 0.5, &s_n, 0.5, &s);
        let p_n = -sigma_n.invariant_sigma_m();
        let e_tilde = committed.energy + (h / rho_mid) * (t2_ddot_t2(&s_mid, &d_dev) - 0.5 * p_n * d_vol);
        let coef = 0.5 * (h / rho_mid) * d_vol;
        let ep = energy_pressure(&self.eos, eta, committed.energy, e_tilde, coef, &self.config, i)?;

        // σ = s - p I followed by the second half of the objective correction
        let mut sigma = s;
        sigma.update(-ep.pressure, &Tensor2::identity(Mandel::Symmetric));
        let sigma = spin_half_step(&sigma, &ww, h);

        Ok(MisesEosUpdate {
            sigma,
            state: MisesEosState {
                lambda: committed.lambda + rm.del_lambda,
                energy: ep.energy,
                rho,
            },
            del_lambda: rm.del_lambda,
            alpha: rm.alpha,
            pressure: ep.pressure,
        })
    }

    /// Writes the results of the integration at point i
    fn store(&mut self, outputs: &mut QpFields, update: &MisesEosUpdate, i: usize) -> Result<(), QpError> {
        // check the output before changing anything
        let sigma_out = outputs.require_mut(Q::Sigma, Role::Output)?;
        if sigma_out.width() != 6 {
            return Err(QpError::ShapeMismatch {
                expected: 6,
                given: sigma_out.width(),
            });
        }
        sigma_out.record(i)?;
        self.vars.trial(Q::Lambda)?.record(i)?;
        sigma_out.set(&update.sigma, i)?;
        self.vars.trial_mut(Q::Lambda)?.set_scalar(update.state.lambda, i)?;
        self.vars.trial_mut(Q::E)?.set_scalar(update.state.energy, i)?;
        self.vars.trial_mut(Q::Rho)?.set_scalar(update.state.rho, i)
    }
}

impl LawTrait for MisesEos {
    fn inputs(&self) -> QSet {
        [Q::L, Q::Sigma, Q::TimeStep].into_iter().collect()
    }

    fn outputs(&self) -> QSet {
        [Q::Sigma].into_iter().collect()
    }

    fn evaluate(&mut self, inputs: &QpFields, outputs: &mut QpFields, i: usize) -> Result<(), QpError> {
        let update = self.integrate(inputs, i)?;
        self.store(outputs, &update, i)
    }

    fn update(&mut self, _inputs: &QpFields, i: usize) -> Result<(), QpError> {
        self.vars.commit(i)
    }

    fn discard(&mut self, i: usize) -> Result<(), QpError> {
        self.vars.discard(i)
    }

    fn resize(&mut self, n: usize) {
        tracing::debug!(n, "resizing von Mises EOS law");
        self.vars.resize(n);
    }

    fn n_points(&self) -> usize {
        self.vars.n_points()
    }

    fn internal_var(&self, q: Q) -> Result<&QpField, QpError> {
        self.vars.committed(q)
    }

    fn evaluate_range(&mut self, inputs: &QpFields, outputs: &mut QpFields, points: Range<usize>) -> Result<(), QpError> {
        let start = points.start;
        let results: Vec<_> = if self.config.parallel {
            let this = &*self;
            points.into_par_iter().map(|i| this.integrate(inputs, i)).collect()
        } else {
            points.map(|i| self.integrate(inputs, i)).collect()
        };
        let mut first_error = None;
        for (k, result) in results.into_iter().enumerate() {
            let stored = result.and_then(|update| self.store(outputs, &update, start + k));
            if let Err(e) = stored {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn update_range(&mut self, _inputs: &QpFields, points: Range<usize>) -> Result<(), QpError> {
        if points.start == 0 && points.end == self.vars.n_points() {
            return self.vars.commit_all();
        }
        for i in points {
            self.vars.commit(i)?;
        }
        Ok(())
    }
}

impl fmt::Display for MisesEosState {
    /// Returns a nicely formatted string representing the state
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(v) => write!(f, "λ = {:.3$}, e = {:.3$}, ρ = {:.3$}", self.lambda, self.energy, self.rho, v),
            None => write!(f, "λ = {:?}, e = {:?}, ρ = {:?}", self.lambda, self.energy, self.rho),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use super::{DEFAULT_COMPLEX_STEP, DEFAULT_N_MAX_IT_ENERGY, DEFAULT_N_MAX_IT_NEWTON, DEFAULT_TOL_ENERGY, DEFAULT_TOL_NEWTON};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds configuration data for the local (quadrature-point) solvers
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of Newton iterations of the return mapping
    pub n_max_it_newton: usize,

    /// Tolerance on the return-mapping residual
    ///
    /// The residual is scaled by max(1, q_trial), where q_trial is the trial equivalent stress.
    pub tol_newton: f64,

    /// Maximum number of fixed-point iterations of the energy-pressure coupling
    pub n_max_it_energy: usize,

    /// Tolerance on the difference between consecutive energy iterates
    ///
    /// The difference is scaled by max(1, |e|).
    pub tol_energy: f64,

    /// Imaginary step used by the complex-step derivative of the yield function
    pub complex_step: f64,

    /// Evaluates and updates all points of a law in parallel
    pub parallel: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            n_max_it_newton: DEFAULT_N_MAX_IT_NEWTON,
            tol_newton: DEFAULT_TOL_NEWTON,
            n_max_it_energy: DEFAULT_N_MAX_IT_ENERGY,
            tol_energy: DEFAULT_TOL_ENERGY,
            complex_step: DEFAULT_COMPLEX_STEP,
            parallel: false,
        }
    }

    /// Sets the maximum number of Newton iterations of the return mapping
    pub fn set_n_max_it_newton(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_it_newton must be ≥ 1");
        }
        self.n_max_it_newton = value;
        Ok(self)
    }

    /// Sets the tolerance of the return mapping
    pub fn set_tol_newton(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("tol_newton must be > 0.0");
        }
        self.tol_newton = value;
        Ok(self)
    }

    /// Sets the maximum number of energy-pressure iterations
    pub fn set_n_max_it_energy(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_it_energy must be ≥ 1");
        }
        self.n_max_it_energy = value;
        Ok(self)
    }

    /// Sets the tolerance of the energy-pressure iterations
    pub fn set_tol_energy(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("tol_energy must be > 0.0");
        }
        self.tol_energy = value;
        Ok(self)
    }

    /// Sets the imaginary step of the complex-step derivative
    pub fn set_complex_step(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("complex_step must be > 0.0");
        }
        self.complex_step = value;
        Ok(self)
    }

    /// Enables the parallel evaluation of all points
    pub fn set_parallel(&mut self, flag: bool) -> &mut Self {
        self.parallel = flag;
        self
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.n_max_it_newton < 1 {
            return Some(format!("n_max_it_newton = {} is incorrect; it must be ≥ 1", self.n_max_it_newton));
        }
        if self.tol_newton <= 0.0 {
            return Some(format!("tol_newton = {:?} is incorrect; it must be > 0.0", self.tol_newton));
        }
        if self.n_max_it_energy < 1 {
            return Some(format!("n_max_it_energy = {} is incorrect; it must be ≥ 1", self.n_max_it_energy));
        }
        if self.tol_energy <= 0.0 {
            return Some(format!("tol_energy = {:?} is incorrect; it must be > 0.0", self.tol_energy));
        }
        if self.complex_step <= 0.0 {
            return Some(format!("complex_step = {:?} is incorrect; it must be > 0.0", self.complex_step));
        }
        None
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl fmt::Display for Config {
    /// Prints a formatted summary of the configuration
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Local solver configuration\n").unwrap();
        write!(f, "==========================\n").unwrap();
        write!(f, "n_max_it_newton = {:?}\n", self.n_max_it_newton).unwrap();
        write!(f, "tol_newton = {:?}\n", self.tol_newton).unwrap();
        write!(f, "n_max_it_energy = {:?}\n", self.n_max_it_energy).unwrap();
        write!(f, "tol_energy = {:?}\n", self.tol_energy).unwrap();
        write!(f, "complex_step = {:?}\n", self.complex_step).unwrap();
        write!(f, "parallel = {:?}\n", self.parallel).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Default maximum number of Newton iterations of the return mapping
pub const DEFAULT_N_MAX_IT_NEWTON: usize = 10;

/// Default tolerance of the return mapping
pub const DEFAULT_TOL_NEWTON: f64 = 1e-10;

/// Default maximum number of energy-pressure iterations
pub const DEFAULT_N_MAX_IT_ENERGY: usize = 50;

/// Default tolerance of the energy-pressure iterations
pub const DEFAULT_TOL_ENERGY: f64 = 1e-10;

/// Default imaginary step for complex-step differentiation
pub const DEFAULT_COMPLEX_STEP: f64 = 1e-10;

use super::MisesEos;
use crate::base::{Config, ParamLaw, QpError, QpField, QpFields, QSet, Q};
use crate::StrError;
use std::ops::Range;

/// Specifies the essential functions of constitutive laws evaluated at quadrature points
///
/// A law reads committed internal variables and host-supplied inputs, and writes outputs
/// and trial internal variables. The trial state becomes the committed state only by
/// calling [LawTrait::update].
pub trait LawTrait: Send + Sync {
    /// Returns the quantities that must be supplied by the host
    fn inputs(&self) -> QSet;

    /// Returns the quantities written by this law
    fn outputs(&self) -> QSet;

    /// Evaluates the trial state at point i
    ///
    /// Reads the committed internal variables and the inputs at i; writes the outputs at i
    /// and the trial internal variables at i. Nothing is written if an error occurs.
    fn evaluate(&mut self, inputs: &QpFields, outputs: &mut QpFields, i: usize) -> Result<(), QpError>;

    /// Commits the trial internal variables at point i
    fn update(&mut self, inputs: &QpFields, i: usize) -> Result<(), QpError>;

    /// Resets the trial internal variables at point i to the committed values
    fn discard(&mut self, i: usize) -> Result<(), QpError>;

    /// Changes the number of points of all internal fields
    fn resize(&mut self, n: usize);

    /// Returns the number of points
    fn n_points(&self) -> usize;

    /// Returns the committed field of an internal variable
    fn internal_var(&self, q: Q) -> Result<&QpField, QpError>;

    /// Evaluates the trial state at a range of points
    ///
    /// Every point is attempted; points that fail are left untouched and the first
    /// error (lowest index) is returned.
    fn evaluate_range(&mut self, inputs: &QpFields, outputs: &mut QpFields, points: Range<usize>) -> Result<(), QpError> {
        let mut first_error = None;
        for i in points {
            if let Err(e) = self.evaluate(inputs, outputs, i) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Commits the trial internal variables at a range of points
    fn update_range(&mut self, inputs: &QpFields, points: Range<usize>) -> Result<(), QpError> {
        for i in points {
            self.update(inputs, i)?;
        }
        Ok(())
    }
}

/// Holds the actual law implementation
pub struct Law {
    /// Holds the actual model implementation
    pub actual: Box<dyn LawTrait>,
}

impl Law {
    /// Allocates a new instance
    pub fn new(config: &Config, param: &ParamLaw) -> Result<Self, StrError> {
        if config.validate().is_some() {
            return Err("cannot allocate law because config.validate() failed");
        }
        let actual: Box<dyn LawTrait> = match param {
            // von Mises plasticity with equation of state
            ParamLaw::MisesEos(p) => Box::new(MisesEos::new(config, p)?),
        };
        Ok(Law { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

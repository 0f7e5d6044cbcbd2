use crate::base::{QpError, QpField, QpFields, QSet, Role, Q};

/// Holds the committed and trial internal variables of a law
///
/// The committed fields hold the state at the start of the current step and are only
/// changed by [InternalVars::commit] (or by initialization). The trial fields hold the state
/// proposed by the most recent evaluation.
#[derive(Clone, Debug)]
pub struct InternalVars {
    /// Holds the state at the start of the step
    committed: QpFields,

    /// Holds the state proposed by the last evaluation
    trial: QpFields,

    /// Holds the values assigned to new points on resize (defaults to zero)
    initial: Vec<(Q, f64)>,
}

impl InternalVars {
    /// Allocates a new instance with a scalar or tensor field per quantity
    pub fn new(quantities: &QSet) -> Self {
        InternalVars {
            committed: QpFields::from_set(quantities, 0),
            trial: QpFields::from_set(quantities, 0),
            initial: Vec::new(),
        }
    }

    /// Sets the value of a quantity at new points created by resize
    pub fn set_initial_value(&mut self, q: Q, value: f64) -> &mut Self {
        self.initial.retain(|(k, _)| *k != q);
        self.initial.push((q, value));
        self
    }

    /// Returns the set of internal variables
    pub fn quantities(&self) -> QSet {
        self.committed.declared()
    }

    /// Returns the number of points
    pub fn n_points(&self) -> usize {
        self.committed.n_points()
    }

    /// Returns the committed field of a quantity
    pub fn committed(&self, q: Q) -> Result<&QpField, QpError> {
        self.committed.require(q, Role::Internal)
    }

    /// Returns the trial field of a quantity
    pub fn trial(&self, q: Q) -> Result<&QpField, QpError> {
        self.trial.require(q, Role::Internal)
    }

    /// Returns the mutable trial field of a quantity
    pub fn trial_mut(&mut self, q: Q) -> Result<&mut QpField, QpError> {
        self.trial.require_mut(q, Role::Internal)
    }

    /// Sets the committed and trial values of a scalar quantity at point i (initialization)
    pub fn initialize_scalar(&mut self, q: Q, value: f64, i: usize) -> Result<(), QpError> {
        self.committed.require_mut(q, Role::Internal)?.set_scalar(value, i)?;
        self.trial.require_mut(q, Role::Internal)?.set_scalar(value, i)
    }

    /// Copies the trial values into the committed values at point i
    pub fn commit(&mut self, i: usize) -> Result<(), QpError> {
        copy_point(&mut self.committed, &self.trial, i)
    }

    /// Copies the trial values into the committed values at all points
    pub fn commit_all(&mut self) -> Result<(), QpError> {
        copy_all(&mut self.committed, &self.trial)
    }

    /// Resets the trial values at point i to the committed values
    pub fn discard(&mut self, i: usize) -> Result<(), QpError> {
        copy_point(&mut self.trial, &self.committed, i)
    }

    /// Changes the number of points, keeping existing values
    pub fn resize(&mut self, n: usize) {
        for q in self.quantities() {
            let value = self.initial.iter().find(|(k, _)| *k == q).map_or(0.0, |(_, v)| *v);
            for fields in [&mut self.committed, &mut self.trial] {
                if let Some(field) = fields.get_mut(q) {
                    field.resize_with_value(n, value);
                }
            }
        }
        self.committed.resize(n);
        self.trial.resize(n);
    }
}

/// Copies the record of point i of all fields
fn copy_point(dest: &mut QpFields, source: &QpFields, i: usize) -> Result<(), QpError> {
    for q in source.declared() {
        let record = source.require(q, Role::Internal)?.record(i)?;
        dest.require_mut(q, Role::Internal)?.set_record(record, i)?;
    }
    Ok(())
}

/// Copies all records of all fields
fn copy_all(dest: &mut QpFields, source: &QpFields) -> Result<(), QpError> {
    for q in source.declared() {
        let field = source.require(q, Role::Internal)?;
        dest.require_mut(q, Role::Internal)?.copy_from(field)?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::InternalVars;
    use crate::base::{QSet, QpError, Role, Q};

    fn sample() -> InternalVars {
        let set: QSet = [Q::Lambda, Q::Rho].into_iter().collect();
        let mut vars = InternalVars::new(&set);
        vars.set_initial_value(Q::Rho, 1000.0);
        vars.resize(3);
        vars
    }

    #[test]
    fn resize_uses_initial_values() {
        let mut vars = sample();
        assert_eq!(vars.n_points(), 3);
        assert_eq!(vars.committed(Q::Rho).unwrap().as_data(), &[1000.0; 3]);
        assert_eq!(vars.trial(Q::Rho).unwrap().as_data(), &[1000.0; 3]);
        assert_eq!(vars.committed(Q::Lambda).unwrap().as_data(), &[0.0; 3]);
        vars.trial_mut(Q::Rho).unwrap().set_scalar(5.0, 2).unwrap();
        vars.commit(2).unwrap();
        vars.resize(4);
        assert_eq!(vars.committed(Q::Rho).unwrap().as_data(), &[1000.0, 1000.0, 5.0, 1000.0]);
    }

    #[test]
    fn commit_and_discard_work() {
        let mut vars = sample();
        vars.trial_mut(Q::Lambda).unwrap().set_scalar(0.1, 1).unwrap();
        vars.trial_mut(Q::Lambda).unwrap().set_scalar(0.2, 2).unwrap();
        assert_eq!(vars.committed(Q::Lambda).unwrap().as_data(), &[0.0, 0.0, 0.0]);

        vars.commit(1).unwrap();
        assert_eq!(vars.committed(Q::Lambda).unwrap().as_data(), &[0.0, 0.1, 0.0]);

        vars.discard(2).unwrap();
        assert_eq!(vars.trial(Q::Lambda).unwrap().as_data(), &[0.0, 0.1, 0.0]);

        vars.trial_mut(Q::Lambda).unwrap().set_scalar(0.3, 0).unwrap();
        vars.commit_all().unwrap();
        assert_eq!(vars.committed(Q::Lambda).unwrap().as_data(), &[0.3, 0.1, 0.0]);
    }

    #[test]
    fn errors_are_captured() {
        let mut vars = sample();
        assert_eq!(
            vars.commit(3).err(),
            Some(QpError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            vars.committed(Q::E).err(),
            Some(QpError::UnsupportedQuantity {
                quantity: Q::E,
                role: Role::Internal
            })
        );
        vars.initialize_scalar(Q::Lambda, 0.5, 0).unwrap();
        assert_eq!(vars.committed(Q::Lambda).unwrap().get_scalar(0), Ok(0.5));
        assert_eq!(vars.trial(Q::Lambda).unwrap().get_scalar(0), Ok(0.5));
    }
}

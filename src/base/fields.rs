use super::{QpError, QpField, QSet, Role, Q};

/// Holds one optional field per quantity
///
/// This is the container exchanged between the host and the laws: the host fills the
/// input fields, and the laws write into the output fields.
#[derive(Clone, Debug, PartialEq)]
pub struct QpFields {
    /// Holds the fields indexed by [Q::index]
    all: Vec<Option<QpField>>,

    /// Number of points
    n_points: usize,
}

impl QpFields {
    /// Allocates a new instance without fields
    pub fn new(n_points: usize) -> Self {
        QpFields {
            all: vec![None; Q::LAST],
            n_points,
        }
    }

    /// Allocates a new instance with a field for each quantity in the set
    pub fn from_set(quantities: &QSet, n_points: usize) -> Self {
        let mut fields = QpFields::new(n_points);
        for q in quantities {
            fields.declare(*q);
        }
        fields
    }

    /// Allocates a zeroed field for a quantity (keeps the existing one, if any)
    pub fn declare(&mut self, q: Q) -> &mut Self {
        let n = self.n_points;
        self.all[q.index()].get_or_insert_with(|| QpField::for_quantity(q, n));
        self
    }

    /// Returns the set of declared quantities
    pub fn declared(&self) -> QSet {
        Q::ALL.iter().filter(|q| self.all[q.index()].is_some()).copied().collect()
    }

    /// Returns the number of points
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the field of a quantity, if declared
    pub fn get(&self, q: Q) -> Option<&QpField> {
        self.all[q.index()].as_ref()
    }

    /// Returns the mutable field of a quantity, if declared
    pub fn get_mut(&mut self, q: Q) -> Option<&mut QpField> {
        self.all[q.index()].as_mut()
    }

    /// Returns the field of a quantity or an UnsupportedQuantity error
    pub fn require(&self, q: Q, role: Role) -> Result<&QpField, QpError> {
        self.get(q).ok_or(QpError::UnsupportedQuantity { quantity: q, role })
    }

    /// Returns the mutable field of a quantity or an UnsupportedQuantity error
    pub fn require_mut(&mut self, q: Q, role: Role) -> Result<&mut QpField, QpError> {
        self.get_mut(q).ok_or(QpError::UnsupportedQuantity { quantity: q, role })
    }

    /// Changes the number of points of all fields
    pub fn resize(&mut self, n: usize) {
        self.n_points = n;
        for field in self.all.iter_mut().flatten() {
            field.resize(n);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::QpFields;
    use crate::base::{QSet, QpError, Role, Q};

    #[test]
    fn declare_and_resize_work() {
        let mut fields = QpFields::new(2);
        fields.declare(Q::Sigma).declare(Q::TimeStep);
        assert_eq!(fields.declared(), [Q::Sigma, Q::TimeStep].into_iter().collect::<QSet>());
        fields.get_mut(Q::TimeStep).unwrap().set_scalar(0.5, 1).unwrap();

        // declaring again keeps the data
        fields.declare(Q::TimeStep);
        assert_eq!(fields.get(Q::TimeStep).unwrap().get_scalar(1), Ok(0.5));

        fields.resize(4);
        assert_eq!(fields.n_points(), 4);
        assert_eq!(fields.get(Q::Sigma).unwrap().len(), 4);
        assert_eq!(fields.get(Q::TimeStep).unwrap().as_data(), &[0.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn require_captures_errors() {
        let set: QSet = [Q::L].into_iter().collect();
        let mut fields = QpFields::from_set(&set, 3);
        assert_eq!(fields.require(Q::L, Role::Input).unwrap().width(), 9);
        assert_eq!(
            fields.require(Q::Rho, Role::Input).err(),
            Some(QpError::UnsupportedQuantity {
                quantity: Q::Rho,
                role: Role::Input
            })
        );
        assert!(fields.require_mut(Q::Sigma, Role::Output).is_err());
    }
}

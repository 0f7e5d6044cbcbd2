use super::Law;
use crate::base::{QpError, QpField, QpFields, QSet, Role, Q};
use std::ops::Range;

/// Routes the evaluation of quadrature points to the laws assigned to them
///
/// Each law owns a contiguous range of points. The outputs of all laws are gathered in a
/// single set of fields covering every point; thus, the host supplies one set of inputs
/// and reads one set of outputs.
pub struct LawDispatcher {
    /// Holds the laws and their assigned points
    laws: Vec<(Law, Range<usize>)>,

    /// Holds the union of the outputs of all laws
    outputs: QpFields,

    /// Total number of points
    n_points: usize,
}

impl LawDispatcher {
    /// Allocates a new instance with n points and no laws
    pub fn new(n_points: usize) -> Self {
        LawDispatcher {
            laws: Vec::new(),
            outputs: QpFields::new(n_points),
            n_points,
        }
    }

    /// Assigns a law to a contiguous range of points
    ///
    /// The law is resized to the number of points of the dispatcher. Returns the id of the law.
    pub fn add_law(&mut self, mut law: Law, points: Range<usize>) -> Result<usize, QpError> {
        if points.start >= points.end {
            return Err(QpError::Invalid("the range of points must not be empty"));
        }
        if points.end > self.n_points {
            return Err(QpError::IndexOutOfRange {
                index: points.end - 1,
                len: self.n_points,
            });
        }
        if self
            .laws
            .iter()
            .any(|(_, r)| points.start < r.end && r.start < points.end)
        {
            return Err(QpError::Invalid("the range of points overlaps with another law"));
        }
        law.actual.resize(self.n_points);
        for q in law.actual.outputs() {
            self.outputs.declare(q);
        }
        let id = self.laws.len();
        tracing::debug!(id, start = points.start, end = points.end, "law added");
        self.laws.push((law, points));
        Ok(id)
    }

    /// Returns the union of the inputs required by all laws
    pub fn required_inputs(&self) -> QSet {
        let mut res = QSet::new();
        for (law, _) in &self.laws {
            res.extend(law.actual.inputs());
        }
        res
    }

    /// Returns the union of the outputs written by all laws
    pub fn outputs(&self) -> QSet {
        self.outputs.declared()
    }

    /// Returns the total number of points
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the number of laws
    pub fn n_laws(&self) -> usize {
        self.laws.len()
    }

    /// Returns the law with the given id
    pub fn law(&self, id: usize) -> Result<&Law, QpError> {
        let len = self.laws.len();
        self.laws
            .get(id)
            .map(|(law, _)| law)
            .ok_or(QpError::IndexOutOfRange { index: id, len })
    }

    /// Changes the number of points of the output fields and of all laws
    ///
    /// Laws whose range no longer fits are kept; their out-of-range points give errors.
    pub fn resize(&mut self, n: usize) {
        tracing::debug!(n, "resizing law dispatcher");
        self.n_points = n;
        self.outputs.resize(n);
        for (law, _) in &mut self.laws {
            law.actual.resize(n);
        }
    }

    /// Returns the gathered output field of a quantity
    pub fn get(&self, q: Q) -> Result<&QpField, QpError> {
        self.outputs.require(q, Role::Output)
    }

    /// Returns all gathered outputs
    pub fn all_outputs(&self) -> &QpFields {
        &self.outputs
    }

    /// Evaluates the law assigned to point i
    pub fn evaluate(&mut self, inputs: &QpFields, i: usize) -> Result<(), QpError> {
        let k = self.find(i)?;
        self.laws[k].0.actual.evaluate(inputs, &mut self.outputs, i)
    }

    /// Commits the trial state of the law assigned to point i
    pub fn update(&mut self, inputs: &QpFields, i: usize) -> Result<(), QpError> {
        let k = self.find(i)?;
        self.laws[k].0.actual.update(inputs, i)
    }

    /// Discards the trial state of the law assigned to point i
    pub fn discard(&mut self, i: usize) -> Result<(), QpError> {
        let k = self.find(i)?;
        self.laws[k].0.actual.discard(i)
    }

    /// Evaluates all laws at all of their points
    ///
    /// Every point is attempted; the first error (in the order of the laws) is returned.
    pub fn evaluate_all(&mut self, inputs: &QpFields) -> Result<(), QpError> {
        let mut first_error = None;
        for (law, points) in &mut self.laws {
            if let Err(e) = law.actual.evaluate_range(inputs, &mut self.outputs, points.clone()) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Commits the trial state of all laws at all of their points
    pub fn update_all(&mut self, inputs: &QpFields) -> Result<(), QpError> {
        for (law, points) in &mut self.laws {
            law.actual.update_range(inputs, points.clone())?;
        }
        Ok(())
    }

    /// Finds the position of the law assigned to point i
    fn find(&self, i: usize) -> Result<usize, QpError> {
        if i >= self.n_points {
            return Err(QpError::IndexOutOfRange {
                index: i,
                len: self.n_points,
            });
        }
        self.laws
            .iter()
            .position(|(_, r)| r.contains(&i))
            .ok_or(QpError::Invalid("no law is assigned to this point"))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LawDispatcher;
    use crate::base::{Config, QpError, QpField, QpFields, QSet, Role, SampleParams, Q};
    use crate::material::{Law, LawTrait};
    use russell_lab::approx_eq;
    use russell_tensor::{Mandel, Tensor2};

    /// Doubles a scalar input into the energy output and counts the commits
    struct Doubler {
        committed: QpField,
        trial: QpField,
    }

    impl Doubler {
        fn new_law() -> Law {
            Law {
                actual: Box::new(Doubler {
                    committed: QpField::for_quantity(Q::Lambda, 0),
                    trial: QpField::for_quantity(Q::Lambda, 0),
                }),
            }
        }
    }

    impl LawTrait for Doubler {
        fn inputs(&self) -> QSet {
            [Q::TimeStep].into_iter().collect()
        }
        fn outputs(&self) -> QSet {
            [Q::E].into_iter().collect()
        }
        fn evaluate(&mut self, inputs: &QpFields, outputs: &mut QpFields, i: usize) -> Result<(), QpError> {
            let h = inputs.require(Q::TimeStep, Role::Input)?.get_scalar(i)?;
            if h < 0.0 {
                return Err(QpError::Invalid("negative"));
            }
            outputs.require_mut(Q::E, Role::Output)?.set_scalar(2.0 * h, i)?;
            let count = self.committed.get_scalar(i)?;
            self.trial.set_scalar(count + 1.0, i)
        }
        fn update(&mut self, _inputs: &QpFields, i: usize) -> Result<(), QpError> {
            let v = self.trial.get_scalar(i)?;
            self.committed.set_scalar(v, i)
        }
        fn discard(&mut self, i: usize) -> Result<(), QpError> {
            let v = self.committed.get_scalar(i)?;
            self.trial.set_scalar(v, i)
        }
        fn resize(&mut self, n: usize) {
            self.committed.resize(n);
            self.trial.resize(n);
        }
        fn n_points(&self) -> usize {
            self.committed.len()
        }
        fn internal_var(&self, q: Q) -> Result<&QpField, QpError> {
            match q {
                Q::Lambda => Ok(&self.committed),
                _ => Err(QpError::UnsupportedQuantity {
                    quantity: q,
                    role: Role::Internal,
                }),
            }
        }
    }

    #[test]
    fn add_law_captures_errors() {
        let mut dispatcher = LawDispatcher::new(4);
        assert_eq!(
            dispatcher.add_law(Doubler::new_law(), 2..2).err(),
            Some(QpError::Invalid("the range of points must not be empty"))
        );
        assert_eq!(
            dispatcher.add_law(Doubler::new_law(), 2..5).err(),
            Some(QpError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(dispatcher.add_law(Doubler::new_law(), 0..2), Ok(0));
        assert_eq!(
            dispatcher.add_law(Doubler::new_law(), 1..3).err(),
            Some(QpError::Invalid("the range of points overlaps with another law"))
        );
        assert_eq!(dispatcher.add_law(Doubler::new_law(), 2..3), Ok(1));
        assert_eq!(dispatcher.n_laws(), 2);
        assert!(dispatcher.law(2).is_err());
        assert_eq!(dispatcher.law(1).unwrap().actual.n_points(), 4);
    }

    #[test]
    fn required_inputs_and_outputs_are_unions() {
        let config = Config::new();
        let mut dispatcher = LawDispatcher::new(3);
        assert_eq!(dispatcher.required_inputs().len(), 0);
        let mises = Law::new(&config, &SampleParams::param_law_perfect()).unwrap();
        dispatcher.add_law(mises, 0..2).unwrap();
        dispatcher.add_law(Doubler::new_law(), 2..3).unwrap();
        let inputs: Vec<_> = dispatcher.required_inputs().into_iter().collect();
        assert_eq!(inputs, &[Q::L, Q::Sigma, Q::TimeStep]);
        let outputs: Vec<_> = dispatcher.outputs().into_iter().collect();
        assert_eq!(outputs, &[Q::Sigma, Q::E]);
        assert_eq!(dispatcher.get(Q::Sigma).unwrap().len(), 3);
        assert_eq!(
            dispatcher.get(Q::Rho).err(),
            Some(QpError::UnsupportedQuantity {
                quantity: Q::Rho,
                role: Role::Output
            })
        );
    }

    #[test]
    fn evaluate_and_update_are_routed() {
        let mut dispatcher = LawDispatcher::new(3);
        dispatcher.add_law(Doubler::new_law(), 0..1).unwrap();
        dispatcher.add_law(Doubler::new_law(), 1..2).unwrap();
        let mut inputs = QpFields::from_set(&dispatcher.required_inputs(), 3);
        let steps = inputs.get_mut(Q::TimeStep).unwrap();
        steps.set_scalar(1.0, 0).unwrap();
        steps.set_scalar(3.0, 1).unwrap();

        dispatcher.evaluate(&inputs, 1).unwrap();
        assert_eq!(dispatcher.get(Q::E).unwrap().as_data(), &[0.0, 6.0, 0.0]);
        assert_eq!(
            dispatcher.evaluate(&inputs, 2).err(),
            Some(QpError::Invalid("no law is assigned to this point"))
        );
        assert_eq!(
            dispatcher.evaluate(&inputs, 3).err(),
            Some(QpError::IndexOutOfRange { index: 3, len: 3 })
        );

        // only the second law sees the commit
        dispatcher.update(&inputs, 1).unwrap();
        let second = dispatcher.law(1).unwrap();
        assert_eq!(second.actual.internal_var(Q::Lambda).unwrap().as_data(), &[0.0, 1.0, 0.0]);
        let first = dispatcher.law(0).unwrap();
        assert_eq!(first.actual.internal_var(Q::Lambda).unwrap().as_data(), &[0.0, 0.0, 0.0]);

        // discard restores the committed count
        dispatcher.evaluate(&inputs, 1).unwrap();
        dispatcher.discard(1).unwrap();
        dispatcher.update(&inputs, 1).unwrap();
        let second = dispatcher.law(1).unwrap();
        assert_eq!(second.actual.internal_var(Q::Lambda).unwrap().get_scalar(1), Ok(1.0));
    }

    #[test]
    fn evaluate_all_reports_the_first_error() {
        let mut dispatcher = LawDispatcher::new(4);
        dispatcher.add_law(Doubler::new_law(), 0..4).unwrap();
        let mut inputs = QpFields::from_set(&dispatcher.required_inputs(), 4);
        let steps = inputs.get_mut(Q::TimeStep).unwrap();
        for (i, h) in [1.0, -1.0, 2.0, -2.0].iter().enumerate() {
            steps.set_scalar(*h, i).unwrap();
        }
        assert_eq!(dispatcher.evaluate_all(&inputs).err(), Some(QpError::Invalid("negative")));
        assert_eq!(dispatcher.get(Q::E).unwrap().as_data(), &[2.0, 0.0, 4.0, 0.0]);
        dispatcher.update_all(&inputs).unwrap();
        let law = dispatcher.law(0).unwrap();
        assert_eq!(law.actual.internal_var(Q::Lambda).unwrap().as_data(), &[1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn parallel_evaluation_matches_sequential() {
        let n = 16;
        let mut config = Config::new();
        let mut sequential = LawDispatcher::new(n);
        sequential
            .add_law(Law::new(&config, &SampleParams::param_law_perfect()).unwrap(), 0..n)
            .unwrap();
        config.set_parallel(true);
        let mut parallel = LawDispatcher::new(n);
        parallel
            .add_law(Law::new(&config, &SampleParams::param_law_perfect()).unwrap(), 0..n)
            .unwrap();

        let mut inputs = QpFields::from_set(&sequential.required_inputs(), n);
        for i in 0..n {
            let rate = (i as f64) * 0.5;
            let ll = [[0.0, rate, 0.0], [rate, 0.0, 0.0], [0.0, 0.0, -0.1 * rate]];
            let ll = Tensor2::from_matrix(&ll, Mandel::General).unwrap();
            inputs.get_mut(Q::L).unwrap().set(&ll, i).unwrap();
            inputs.get_mut(Q::TimeStep).unwrap().set_scalar(1e-3, i).unwrap();
        }
        sequential.evaluate_all(&inputs).unwrap();
        parallel.evaluate_all(&inputs).unwrap();
        assert_eq!(sequential.get(Q::Sigma).unwrap(), parallel.get(Q::Sigma).unwrap());
        let sigma = sequential.get(Q::Sigma).unwrap().get(n - 1).unwrap();
        approx_eq(sigma.invariant_sigma_d(), 200.0, 1e-9);

        sequential.update_all(&inputs).unwrap();
        parallel.update_all(&inputs).unwrap();
        let lambda_seq = sequential.law(0).unwrap().actual.internal_var(Q::Lambda).unwrap();
        let lambda_par = parallel.law(0).unwrap().actual.internal_var(Q::Lambda).unwrap();
        assert_eq!(lambda_seq, lambda_par);
        assert!(lambda_seq.get_scalar(n - 1).unwrap() > 0.0);
    }

    #[test]
    fn resize_works() {
        let mut dispatcher = LawDispatcher::new(2);
        dispatcher.add_law(Doubler::new_law(), 0..2).unwrap();
        dispatcher.resize(5);
        assert_eq!(dispatcher.n_points(), 5);
        assert_eq!(dispatcher.get(Q::E).unwrap().len(), 5);
        assert_eq!(dispatcher.law(0).unwrap().actual.n_points(), 5);
        assert_eq!(dispatcher.all_outputs().n_points(), 5);
    }
}

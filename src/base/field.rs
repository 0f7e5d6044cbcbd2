use super::{QpError, Q};
use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds a fixed-width record for each quadrature point in a flat array
///
/// The width is 1 for scalars, 6 for symmetric tensors, and 9 for general tensors.
/// Tensor records hold the Mandel components as defined by [Mandel::Symmetric]
/// and [Mandel::General], respectively.
///
/// ```text
/// data = [ record(0) | record(1) | ... | record(n-1) ]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QpField {
    /// Number of components of each record
    width: usize,

    /// Holds all records, one after another
    data: Vec<f64>,
}

impl QpField {
    /// Allocates a new field without points
    ///
    /// The width must be 1 (scalar), 6 (symmetric tensor), or 9 (general tensor).
    pub fn new(width: usize) -> Result<Self, QpError> {
        QpField::with_points(width, 0)
    }

    /// Allocates a new field with `n` zeroed records
    pub fn with_points(width: usize, n: usize) -> Result<Self, QpError> {
        match width {
            1 | 6 | 9 => Ok(QpField {
                width,
                data: vec![0.0; n * width],
            }),
            _ => Err(QpError::Invalid("the width of a field must be 1, 6, or 9")),
        }
    }

    /// Allocates a new field with the width of a quantity
    pub fn for_quantity(q: Q, n: usize) -> Self {
        QpField {
            width: q.width(),
            data: vec![0.0; n * q.width()],
        }
    }

    /// Returns the number of components of each record
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    /// Returns true if there are no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns access to the flat array of records
    pub fn as_data(&self) -> &[f64] {
        &self.data
    }

    /// Changes the number of points
    ///
    /// Existing records with index < min(old, new) are preserved and new records are zeroed.
    pub fn resize(&mut self, n: usize) {
        self.resize_with_value(n, 0.0);
    }

    /// Changes the number of points, filling all components of new records with a value
    pub fn resize_with_value(&mut self, n: usize, value: f64) {
        self.data.resize(n * self.width, value);
    }

    /// Returns the record at point i
    pub fn record(&self, i: usize) -> Result<&[f64], QpError> {
        let range = self.range(i)?;
        Ok(&self.data[range])
    }

    /// Returns the record at point i as a tensor
    ///
    /// Fails with ShapeMismatch if the field does not hold tensors.
    pub fn get(&self, i: usize) -> Result<Tensor2, QpError> {
        let mandel = self.mandel()?;
        let mut tt = Tensor2::new(mandel);
        let vec = tt.vector_mut();
        for (k, value) in self.record(i)?.iter().enumerate() {
            vec[k] = *value;
        }
        Ok(tt)
    }

    /// Returns the record at point i as a scalar
    pub fn get_scalar(&self, i: usize) -> Result<f64, QpError> {
        if self.width != 1 {
            return Err(QpError::ShapeMismatch {
                expected: self.width,
                given: 1,
            });
        }
        Ok(self.record(i)?[0])
    }

    /// Overwrites the record at point i with the components of a tensor
    pub fn set(&mut self, value: &Tensor2, i: usize) -> Result<(), QpError> {
        self.set_record(value.vector().as_data(), i)
    }

    /// Overwrites the record at point i with a scalar
    pub fn set_scalar(&mut self, value: f64, i: usize) -> Result<(), QpError> {
        self.set_record(&[value], i)
    }

    /// Overwrites the record at point i with raw components
    pub fn set_record(&mut self, value: &[f64], i: usize) -> Result<(), QpError> {
        if value.len() != self.width {
            return Err(QpError::ShapeMismatch {
                expected: self.width,
                given: value.len(),
            });
        }
        let range = self.range(i)?;
        self.data[range].copy_from_slice(value);
        Ok(())
    }

    /// Copies all records from another field with the same width and number of points
    pub fn copy_from(&mut self, other: &QpField) -> Result<(), QpError> {
        if other.width != self.width {
            return Err(QpError::ShapeMismatch {
                expected: self.width,
                given: other.width,
            });
        }
        if other.data.len() != self.data.len() {
            return Err(QpError::Invalid("fields must have the same number of points"));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Returns the Mandel representation corresponding to the width
    fn mandel(&self) -> Result<Mandel, QpError> {
        match self.width {
            6 => Ok(Mandel::Symmetric),
            9 => Ok(Mandel::General),
            _ => Err(QpError::ShapeMismatch {
                expected: self.width,
                given: Mandel::Symmetric.dim(),
            }),
        }
    }

    /// Returns the range of the record of point i within data
    fn range(&self, i: usize) -> Result<std::ops::Range<usize>, QpError> {
        let len = self.len();
        if i >= len {
            return Err(QpError::IndexOutOfRange { index: i, len });
        }
        Ok(i * self.width..(i + 1) * self.width)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

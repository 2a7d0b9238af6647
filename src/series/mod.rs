mod scalar;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::index::{Index, StringIndex};

pub use self::scalar::{Numeric, Scalar};

/// Series: a named, ordered sequence of scalar values
///
/// A Series is never mutated after construction; every derived operation
/// returns a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<Scalar>,

    /// Optional row labels (not used by positional operations)
    index: Option<StringIndex>,

    name: Option<String>,
}

impl Series {
    /// Create a Series from anything convertible into scalars
    pub fn new<T: Into<Scalar>>(values: Vec<T>, name: Option<String>) -> Result<Self> {
        Ok(Series {
            values: values.into_iter().map(Into::into).collect(),
            index: None,
            name,
        })
    }

    /// Create a Series with explicit row labels
    pub fn with_index<T, I>(values: Vec<T>, index: Index<I>, name: Option<String>) -> Result<Self>
    where
        T: Into<Scalar>,
        I: Debug + Clone + Eq + Hash + Display,
    {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: values.len(),
                actual: index.len(),
            });
        }

        let labels = index.values().iter().map(|v| v.to_string()).collect();
        let index = StringIndex::with_name(labels, index.name().cloned())?;

        Ok(Series {
            values: values.into_iter().map(Into::into).collect(),
            index: Some(index),
            name,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a position
    pub fn get(&self, pos: usize) -> Option<&Scalar> {
        self.values.get(pos)
    }

    /// Value at a position, failing when out of range
    pub fn iloc(&self, pos: usize) -> Result<&Scalar> {
        self.values.get(pos).ok_or(Error::IndexOutOfBounds {
            index: pos,
            size: self.values.len(),
        })
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.values.iter()
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn index(&self) -> Option<&StringIndex> {
        self.index.as_ref()
    }

    /// Copy of this Series under a new name
    pub fn rename(&self, name: impl Into<String>) -> Self {
        Series {
            values: self.values.clone(),
            index: self.index.clone(),
            name: Some(name.into()),
        }
    }

    /// New Series holding the values at `positions`, in that order
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let mut values = Vec::with_capacity(positions.len());
        for &pos in positions {
            values.push(self.iloc(pos)?.clone());
        }
        let index = match &self.index {
            Some(idx) => Some(idx.take(positions)?),
            None => None,
        };

        Ok(Series {
            values,
            index,
            name: self.name.clone(),
        })
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Sum of the values, skipping nulls
    ///
    /// Stays integral while every value is an integer. Any value that cannot
    /// be read as a number fails the whole sum.
    pub fn sum(&self) -> Result<Scalar> {
        self.sum_positions(0..self.len()).map(Scalar::from)
    }

    /// `sum() / len()`; an empty Series has no mean
    pub fn mean(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(Error::EmptyData(format!(
                "cannot take the mean of empty series '{}'",
                self.label()
            )));
        }
        let sum = self.sum_positions(0..self.len())?;
        Ok(sum.as_f64() / self.len() as f64)
    }

    /// Sum over a subset of positions; shared with grouped aggregation so a
    /// bucket never has to be copied out first.
    pub(crate) fn sum_positions<P>(&self, positions: P) -> Result<Numeric>
    where
        P: IntoIterator<Item = usize>,
    {
        let mut total = Numeric::Int(0);
        for pos in positions {
            let value = match self.iloc(pos)?.to_numeric(self.label())? {
                Some(v) => v,
                None => continue,
            };
            total = match (total, value) {
                (Numeric::Int(a), Numeric::Int(b)) => Numeric::Int(
                    a.checked_add(b)
                        .ok_or_else(|| Error::NumericOverflow(self.label().to_string()))?,
                ),
                (a, b) => Numeric::Float(a.as_f64() + b.as_f64()),
            };
        }
        Ok(total)
    }
}

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::Bucket;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::{Scalar, Series};

/// Aggregation applied to one output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    /// Arithmetic sum of the bucket's values
    Sum,
    /// Sum divided by bucket size, always a float
    Mean,
    /// Bucket size; reads no source column
    Count,
}

impl AggFunc {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Count => "count",
        }
    }

    /// Whether the output name must also be a source column
    pub fn reads_source(&self) -> bool {
        !matches!(self, AggFunc::Count)
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggFunc::Sum),
            "mean" => Ok(AggFunc::Mean),
            "count" => Ok(AggFunc::Count),
            other => Err(Error::Config(format!(
                "unknown aggregation '{}', expected sum, mean or count",
                other
            ))),
        }
    }
}

/// Ordered mapping from output column to aggregation
///
/// Setting a column twice replaces the earlier function but keeps the
/// column's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggSpec {
    entries: Vec<(String, AggFunc)>,
}

impl AggSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same function for every listed column
    pub fn uniform<S: AsRef<str>>(columns: &[S], func: AggFunc) -> Self {
        columns
            .iter()
            .fold(Self::new(), |spec, col| spec.with(col.as_ref(), func))
    }

    pub fn with(mut self, column: impl Into<String>, func: AggFunc) -> Self {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = func,
            None => self.entries.push((column, func)),
        }
        self
    }

    pub fn sum(self, column: impl Into<String>) -> Self {
        self.with(column, AggFunc::Sum)
    }

    pub fn mean(self, column: impl Into<String>) -> Self {
        self.with(column, AggFunc::Mean)
    }

    pub fn count(self, name: impl Into<String>) -> Self {
        self.with(name, AggFunc::Count)
    }

    pub fn entries(&self) -> &[(String, AggFunc)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AggFunc)> for AggSpec {
    fn from_iter<I: IntoIterator<Item = (S, AggFunc)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AggSpec::new(), |spec, (col, func)| spec.with(col, func))
    }
}

/// Reject specs that name missing source columns or shadow a key column
fn validate(source: &DataFrame, keys: &[String], spec: &AggSpec) -> Result<()> {
    for (name, func) in spec.entries() {
        if func.reads_source() && source.column_count() > 0 && !source.contains_column(name) {
            return Err(Error::ColumnNotFound(name.clone()));
        }
        if keys.contains(name) {
            return Err(Error::DuplicateColumnName(name.clone()));
        }
    }
    Ok(())
}

fn aggregate_bucket(series: Option<&Series>, func: AggFunc, bucket: &Bucket) -> Result<Scalar> {
    let positions = bucket.positions();
    match (func, series) {
        (AggFunc::Count, _) => Ok(Scalar::Int(positions.len() as i64)),
        (AggFunc::Sum, Some(series)) => series
            .sum_positions(positions.iter().copied())
            .map(Scalar::from),
        (AggFunc::Mean, Some(series)) => {
            let sum = series.sum_positions(positions.iter().copied())?;
            Ok(Scalar::Float(sum.as_f64() / positions.len() as f64))
        }
        // validate() guarantees the column exists
        (_, None) => Err(Error::Config(format!("{} needs a source column", func))),
    }
}

/// One output row per bucket, in bucket order
pub(crate) fn materialize(
    source: &DataFrame,
    keys: &[String],
    buckets: &[Bucket],
    spec: &AggSpec,
) -> Result<DataFrame> {
    validate(source, keys, spec)?;

    let mut result = DataFrame::new();

    for key in keys {
        let values: Vec<Scalar> = if buckets.is_empty() {
            Vec::new()
        } else {
            let column = source.column(key)?;
            buckets
                .iter()
                .map(|bucket| column.values()[bucket.first()].clone())
                .collect()
        };
        result.add_column(key.clone(), Series::new(values, Some(key.clone()))?)?;
    }

    for (name, func) in spec.entries() {
        let series = if func.reads_source() && !buckets.is_empty() {
            Some(source.column(name)?)
        } else {
            None
        };
        let values = buckets
            .iter()
            .map(|bucket| aggregate_bucket(series, *func, bucket))
            .collect::<Result<Vec<Scalar>>>()?;
        result.add_column(name.clone(), Series::new(values, Some(name.clone()))?)?;
    }

    debug!(
        "aggregated {} buckets into {} columns",
        buckets.len(),
        result.column_count()
    );
    Ok(result)
}

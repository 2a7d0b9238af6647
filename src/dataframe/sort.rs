//! Row sorting by a single column
//!
//! Values are ordered `Bool < numbers < Text < missing`, where missing means
//! null or NaN. Integers and floats compare numerically with each other.
//! Descending order negates the comparator instead of reversing the sorted
//! output, so equal values keep their original relative order in both
//! directions. Missing values therefore sort last when ascending and first
//! when descending.

use std::cmp::Ordering;

use log::debug;

use super::base::DataFrame;
use crate::error::Result;
use crate::series::Scalar;

fn type_rank(value: &Scalar) -> u8 {
    match value {
        Scalar::Bool(_) => 0,
        Scalar::Int(_) => 1,
        Scalar::Float(v) if !v.is_nan() => 1,
        Scalar::Text(_) => 2,
        Scalar::Float(_) | Scalar::Null => 3,
    }
}

/// Total order used by [`DataFrame::sort_values`]
pub fn compare_values(a: &Scalar, b: &Scalar) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }

    match (a, b) {
        (Scalar::Bool(x), Scalar::Bool(y)) => x.cmp(y),
        (Scalar::Int(x), Scalar::Int(y)) => x.cmp(y),
        (Scalar::Text(x), Scalar::Text(y)) => x.cmp(y),
        (Scalar::Float(x), Scalar::Float(y)) if !x.is_nan() && !y.is_nan() => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Scalar::Int(i), Scalar::Float(f)) if !f.is_nan() => compare_int_float(*i, *f),
        (Scalar::Float(f), Scalar::Int(i)) if !f.is_nan() => compare_int_float(*i, *f).reverse(),
        // null/NaN against each other
        _ => Ordering::Equal,
    }
}

/// Exact comparison of an integer with a non-NaN float
///
/// `i as f64` rounds above 2^53, so a tie there is settled in i128. A finite
/// float equal to a rounded i64 is integral, which makes the cast exact.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    match (i as f64).partial_cmp(&f) {
        Some(Ordering::Equal) => (i as i128).cmp(&(f as i128)),
        Some(ord) => ord,
        None => Ordering::Equal,
    }
}

impl DataFrame {
    /// New DataFrame with rows stably reordered by `column`
    ///
    /// Fails with `ColumnNotFound` before any row is read.
    pub fn sort_values(&self, column: &str, ascending: bool) -> Result<DataFrame> {
        let values = self.column(column)?.values();

        let mut positions: Vec<usize> = (0..self.row_count()).collect();
        // `sort_by` is stable
        positions.sort_by(|&i, &j| {
            let ord = compare_values(&values[i], &values[j]);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });

        debug!(
            "sorted {} rows by '{}' ({})",
            positions.len(),
            column,
            if ascending { "ascending" } else { "descending" }
        );
        self.take(&positions)
    }
}

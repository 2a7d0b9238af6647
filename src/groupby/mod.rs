//! GroupBy operations for DataFrames
//!
//! Rows are partitioned into buckets by the canonical string form of their
//! key columns. Buckets keep the order in which each key was first seen, and
//! positions inside a bucket stay in ascending row order, so grouping the
//! same table twice always gives the same result.

mod agg;

use std::collections::HashMap;

use log::debug;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

pub use agg::{AggFunc, AggSpec};

/// Row positions sharing one grouping key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Canonical string of each key column, one entry per key
    key: Vec<String>,
    positions: Vec<usize>,
}

impl Bucket {
    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // Buckets are created with their first row
    fn first(&self) -> usize {
        self.positions[0]
    }
}

/// Partition row positions by key in one pass
///
/// The lookup map is keyed by the tuple of canonical strings rather than a
/// joined string, so values containing a separator cannot collide.
fn build_buckets(df: &DataFrame, keys: &[String]) -> Result<Vec<Bucket>> {
    if df.row_count() == 0 {
        return Ok(Vec::new());
    }

    let columns = keys
        .iter()
        .map(|k| df.column(k))
        .collect::<Result<Vec<_>>>()?;

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut lookup: HashMap<Vec<String>, usize> = HashMap::new();

    for pos in 0..df.row_count() {
        let key: Vec<String> = columns
            .iter()
            .map(|series| series.values()[pos].canonical_string())
            .collect();

        match lookup.get(&key) {
            Some(&idx) => buckets[idx].positions.push(pos),
            None => {
                lookup.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    positions: vec![pos],
                });
            }
        }
    }

    Ok(buckets)
}

/// A DataFrame partitioned into buckets, awaiting aggregation
///
/// Read-only: every aggregation call materializes a new DataFrame and can be
/// repeated any number of times.
#[derive(Debug, Clone)]
pub struct GroupBy<'a> {
    source: &'a DataFrame,
    keys: Vec<String>,
    buckets: Vec<Bucket>,
}

impl<'a> GroupBy<'a> {
    /// Group `source` by the given key columns
    pub fn new<S: AsRef<str>>(source: &'a DataFrame, by: &[S]) -> Result<Self> {
        if by.is_empty() {
            return Err(Error::EmptyGroupKeys);
        }
        // A frame without columns has no rows, so any key is acceptable
        if source.column_count() > 0 {
            source.require_columns(by)?;
        }

        let keys: Vec<String> = by.iter().map(|k| k.as_ref().to_string()).collect();
        let buckets = build_buckets(source, &keys)?;
        debug!(
            "grouped {} rows by {:?} into {} buckets",
            source.row_count(),
            keys,
            buckets.len()
        );

        Ok(GroupBy {
            source,
            keys,
            buckets,
        })
    }

    pub fn source(&self) -> &'a DataFrame {
        self.source
    }

    /// Grouping key column names
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Buckets in first-seen order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of groups
    pub fn ngroups(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket sizes in bucket order
    pub fn size(&self) -> Vec<(Vec<String>, usize)> {
        self.buckets
            .iter()
            .map(|b| (b.key.clone(), b.len()))
            .collect()
    }

    /// Sum each listed column per group
    pub fn sum<S: AsRef<str>>(&self, columns: &[S]) -> Result<DataFrame> {
        self.agg(&AggSpec::uniform(columns, AggFunc::Sum))
    }

    /// Mean of each listed column per group
    pub fn mean<S: AsRef<str>>(&self, columns: &[S]) -> Result<DataFrame> {
        self.agg(&AggSpec::uniform(columns, AggFunc::Mean))
    }

    /// Rows per group, written to `name` (default `"count"`)
    pub fn count(&self, name: Option<&str>) -> Result<DataFrame> {
        self.agg(&AggSpec::new().count(name.unwrap_or("count")))
    }

    /// Apply an arbitrary spec
    pub fn agg(&self, spec: &AggSpec) -> Result<DataFrame> {
        agg::materialize(self.source, &self.keys, &self.buckets, spec)
    }
}

impl DataFrame {
    /// Group rows by one or more key columns
    pub fn group_by<S: AsRef<str>>(&self, by: &[S]) -> Result<GroupBy<'_>> {
        GroupBy::new(self, by)
    }
}

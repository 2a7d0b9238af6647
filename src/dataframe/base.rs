use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::series::{Scalar, Series};

/// Column-oriented table of equally long, uniquely named Series
#[derive(Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<Series>,
    // name -> position in `columns`
    column_indices: HashMap<String, usize>,
    // keeps insertion order
    column_names: Vec<String>,
    row_count: usize,
}

/// Borrowed view of one row, handed to filter predicates
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    df: &'a DataFrame,
    pos: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Value of a column in this row
    pub fn get(&self, column: &str) -> Option<&'a Scalar> {
        let df: &'a DataFrame = self.df;
        df.column_indices
            .get(column)
            .and_then(|&idx| df.columns[idx].get(self.pos))
    }

    /// Text value of a column in this row, if it is text
    pub fn get_str(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Scalar::as_str)
    }
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(column name, values)` pairs; column order is kept
    pub fn from_columns<I, S, T>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<T>)>,
        S: Into<String>,
        T: Into<Scalar>,
    {
        let mut df = DataFrame::new();
        for (name, values) in columns {
            let name = name.into();
            let series = Series::new(values, Some(name.clone()))?;
            df.add_column(name, series)?;
        }
        Ok(df)
    }

    /// Build from row records (JSON objects)
    ///
    /// Columns appear in the order their keys are first seen. A key missing
    /// from a record becomes a null cell in that row.
    pub fn from_records(records: &[Value]) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for record in records {
            let object = record.as_object().ok_or_else(|| {
                Error::Format(format!("each record must be an object, found {}", record))
            })?;
            for key in object.keys() {
                if !positions.contains_key(key) {
                    positions.insert(key.clone(), names.len());
                    names.push(key.clone());
                }
            }
        }

        let mut columns: Vec<Vec<Scalar>> = vec![Vec::with_capacity(records.len()); names.len()];
        let mut missing_cells = 0usize;
        for record in records {
            // Checked above
            let Some(object) = record.as_object() else {
                continue;
            };
            for (name, values) in names.iter().zip(columns.iter_mut()) {
                match object.get(name) {
                    Some(value) => values.push(Scalar::try_from(value)?),
                    None => {
                        missing_cells += 1;
                        values.push(Scalar::Null);
                    }
                }
            }
        }

        if missing_cells > 0 {
            warn!(
                "{} record cells were missing and filled with null ({} records, {} columns)",
                missing_cells,
                records.len(),
                names.len()
            );
        }

        let mut df = Self::from_columns(names.into_iter().zip(columns))?;
        // All-empty input still has a well-defined shape
        df.row_count = records.len();
        Ok(df)
    }

    /// Build from any serializable row type (structs, maps)
    pub fn from_serializable<R: Serialize>(rows: &[R]) -> Result<Self> {
        let records = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_records(&records)
    }

    /// Append a column, checking the name and the row count
    pub fn add_column(&mut self, name: impl Into<String>, series: Series) -> Result<()> {
        let name = name.into();

        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        let column_len = series.len();
        if !self.columns.is_empty() && column_len != self.row_count {
            return Err(Error::InconsistentRowCount {
                column: name,
                expected: self.row_count,
                found: column_len,
            });
        }

        if self.columns.is_empty() {
            self.row_count = column_len;
        }
        self.column_indices.insert(name.clone(), self.columns.len());
        self.columns.push(series.rename(name.clone()));
        self.column_names.push(name);

        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.column_indices
            .get(name)
            .map(|&idx| &self.columns[idx])
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Fail with `ColumnNotFound` for the first name this table lacks
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            if !self.contains_column(name.as_ref()) {
                return Err(Error::ColumnNotFound(name.as_ref().to_string()));
            }
        }
        Ok(())
    }

    /// Values of one row as `(column, value)` pairs in column order
    pub fn row(&self, pos: usize) -> Result<Vec<(&str, &Scalar)>> {
        if pos >= self.row_count {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.row_count,
            });
        }
        Ok(self
            .column_names
            .iter()
            .zip(&self.columns)
            .map(|(name, series)| (name.as_str(), &series.values()[pos]))
            .collect())
    }

    /// Iterate rows as borrowed views
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.row_count).map(move |pos| Row { df: self, pos })
    }

    /// New DataFrame with the rows at `positions`, in that order
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        if let Some(&pos) = positions.iter().find(|&&pos| pos >= self.row_count) {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.row_count,
            });
        }

        let mut df = DataFrame::new();
        for (name, series) in self.column_names.iter().zip(&self.columns) {
            df.add_column(name.clone(), series.take(positions)?)?;
        }
        df.row_count = positions.len();
        Ok(df)
    }

    /// New DataFrame with the rows the predicate keeps
    pub fn filter<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&Row<'_>) -> bool,
    {
        let keep: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.pos)
            .collect();
        debug!("filter kept {} of {} rows", keep.len(), self.row_count);
        self.take(&keep)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Result<Self> {
        let positions: Vec<usize> = (0..n.min(self.row_count)).collect();
        self.take(&positions)
    }

    /// Rows as JSON objects with keys in column order
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        (0..self.row_count)
            .map(|pos| {
                self.column_names
                    .iter()
                    .zip(&self.columns)
                    .map(|(name, series)| (name.clone(), series.values()[pos].to_json_value()))
                    .collect()
            })
            .collect()
    }

    /// Read two columns as parallel `(label, value)` pairs for charting
    pub fn chart_pairs(&self, label_column: &str, value_column: &str) -> Result<Vec<(String, f64)>> {
        let labels = self.column(label_column)?;
        let values = self.column(value_column)?;

        labels
            .iter()
            .zip(values.iter())
            .map(|(label, value)| -> Result<(String, f64)> {
                let number = value.to_numeric(value_column)?.ok_or_else(|| Error::NotNumeric {
                    column: value_column.to_string(),
                    value: "null".to_string(),
                })?;
                Ok((label.canonical_string(), number.as_f64()))
            })
            .collect()
    }
}

impl fmt::Debug for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_ROWS: usize = 10;

        if self.columns.is_empty() {
            return write!(f, "DataFrame ({} rows x 0 columns)", self.row_count);
        }

        writeln!(
            f,
            "DataFrame ({} rows x {} columns):",
            self.row_count,
            self.columns.len()
        )?;

        write!(f, "{:<5} |", "idx")?;
        for name in &self.column_names {
            write!(f, " {:<15} |", name)?;
        }
        writeln!(f)?;

        write!(f, "{:-<5}-+", "")?;
        for _ in &self.column_names {
            write!(f, "-{:-<15}-+", "")?;
        }
        writeln!(f)?;

        for pos in 0..self.row_count.min(MAX_ROWS) {
            write!(f, "{:<5} |", pos)?;
            for series in &self.columns {
                let cell = match &series.values()[pos] {
                    Scalar::Text(s) => format!("\"{}\"", s),
                    Scalar::Float(v) => format!("{:.3}", v),
                    Scalar::Null => "NULL".to_string(),
                    other => other.canonical_string(),
                };
                write!(f, " {:<15} |", cell)?;
            }
            writeln!(f)?;
        }

        if self.row_count > MAX_ROWS {
            writeln!(f, "... ({} more rows)", self.row_count - MAX_ROWS)?;
        }

        Ok(())
    }
}

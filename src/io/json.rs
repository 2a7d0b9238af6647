use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::series::{Scalar, Series};
use crate::DataFrame;

/// Read a DataFrame from a JSON file
///
/// An array of objects is read as row records, an object of arrays as
/// named columns.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let json_value: Value = serde_json::from_reader(reader)?;
    debug!("read JSON table from {}", path.as_ref().display());
    from_json_value(&json_value)
}

/// Read a DataFrame from JSON text
pub fn read_json_str(text: &str) -> Result<DataFrame> {
    let json_value: Value = serde_json::from_str(text)?;
    from_json_value(&json_value)
}

/// Convert an already parsed JSON value into a DataFrame
pub fn from_json_value(value: &Value) -> Result<DataFrame> {
    match value {
        Value::Array(records) => DataFrame::from_records(records),
        Value::Object(map) => read_column_oriented(map),
        _ => Err(Error::Format(
            "JSON must be an object or an array".to_string(),
        )),
    }
}

fn read_column_oriented(map: &Map<String, Value>) -> Result<DataFrame> {
    let mut df = DataFrame::new();

    for (key, value) in map {
        let Value::Array(array) = value else {
            return Err(Error::Format(format!("column '{}' must be an array", key)));
        };
        let values = array
            .iter()
            .map(Scalar::try_from)
            .collect::<Result<Vec<_>>>()?;
        df.add_column(key.clone(), Series::new(values, Some(key.clone()))?)?;
    }

    Ok(df)
}

/// JSON output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonOrient {
    /// `[{col1: val1, col2: val2}, ...]`
    #[default]
    Records,
    /// `{col1: [val1, val2, ...], col2: [...]}`
    Columns,
}

/// Write a DataFrame to a JSON file
pub fn write_json<P: AsRef<Path>>(df: &DataFrame, path: P, orient: JsonOrient) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &to_json_value(df, orient))?;
    Ok(())
}

/// Convert a DataFrame into a JSON value
pub fn to_json_value(df: &DataFrame, orient: JsonOrient) -> Value {
    match orient {
        JsonOrient::Records => Value::Array(df.to_records().into_iter().map(Value::Object).collect()),
        JsonOrient::Columns => {
            let mut columns = Map::new();
            for name in df.column_names() {
                // Names come from the frame itself
                if let Ok(series) = df.column(name) {
                    let values = series.iter().map(Scalar::to_json_value).collect();
                    columns.insert(name.clone(), Value::Array(values));
                }
            }
            Value::Object(columns)
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// A single cell value
///
/// Variant order matters for untagged deserialization: JSON integers must be
/// tried as `Int` before they fall through to `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// A value that took part in arithmetic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }
}

impl From<Numeric> for Scalar {
    fn from(n: Numeric) -> Self {
        match n {
            Numeric::Int(v) => Scalar::Int(v),
            Numeric::Float(v) => Scalar::Float(v),
        }
    }
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Null and NaN both count as "no value" when ordering
    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form used to build group keys and chart labels.
    ///
    /// Integral floats print without a fraction so `1` and `1.0` land in the
    /// same bucket.
    pub fn canonical_string(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => format_float(*v),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Coerce to a number for `sum`/`mean`.
    ///
    /// `Ok(None)` means the cell is null. Text is accepted when it parses as a
    /// number; booleans and other text are rejected.
    pub fn to_numeric(&self, column: &str) -> Result<Option<Numeric>> {
        match self {
            Scalar::Null => Ok(None),
            Scalar::Int(v) => Ok(Some(Numeric::Int(*v))),
            Scalar::Float(v) => Ok(Some(Numeric::Float(*v))),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if let Ok(v) = trimmed.parse::<i64>() {
                    Ok(Some(Numeric::Int(v)))
                } else if let Ok(v) = trimmed.parse::<f64>() {
                    Ok(Some(Numeric::Float(v)))
                } else {
                    Err(self.not_numeric(column))
                }
            }
            Scalar::Bool(_) => Err(self.not_numeric(column)),
        }
    }

    fn not_numeric(&self, column: &str) -> Error {
        Error::NotNumeric {
            column: column.to_string(),
            value: format!("{:?}", self.canonical_string()),
        }
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(v) => Value::Number((*v).into()),
            Scalar::Float(v) => Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let label = if v > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        // -0.0 prints as "0"
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

impl TryFrom<&Value> for Scalar {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Scalar::Null),
            Value::Bool(b) => Ok(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Scalar::Int(i)),
                None => n
                    .as_f64()
                    .map(Scalar::Float)
                    .ok_or_else(|| Error::Format(format!("unrepresentable number {}", n))),
            },
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(Error::Format(format!(
                "cell values must be scalars, found {}",
                value
            ))),
        }
    }
}

macro_rules! impl_scalar_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::Int(v as i64)
                }
            }
        )*
    };
}

impl_scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v as f64)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}

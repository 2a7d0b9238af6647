use thiserror::Error;

/// Error categories reported to callers
///
/// `Config` errors mean the caller asked for something the table does not
/// have. `Data` errors mean a value could not be used for the requested
/// operation. Both are raised before any partial result is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Data,
    Io,
}

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found} (column {column})")]
    InconsistentRowCount {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("GroupBy requires at least one key column")]
    EmptyGroupKeys,

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Value {value} in column '{column}' is not numeric")]
    NotNumeric { column: String, value: String },

    #[error("Numeric overflow while aggregating column '{0}'")]
    NumericOverflow(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Data format error: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

// Kept for callers that prefer the crate-qualified name
pub type PandashError = Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify the error into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ColumnNotFound(_)
            | Error::DuplicateColumnName(_)
            | Error::InconsistentRowCount { .. }
            | Error::LengthMismatch { .. }
            | Error::EmptyGroupKeys
            | Error::IndexOutOfBounds { .. }
            | Error::Config(_) => ErrorKind::Config,
            Error::NotNumeric { .. }
            | Error::NumericOverflow(_)
            | Error::EmptyData(_)
            | Error::Format(_)
            | Error::Json(_) => ErrorKind::Data,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    pub fn is_data_error(&self) -> bool {
        self.kind() == ErrorKind::Data
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("invalid TOML: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("invalid YAML: {}", err))
    }
}

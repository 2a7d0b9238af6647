//! Pandas-like grouping, aggregation and sorting over small in-memory tables,
//! plus the survey-dashboard pipeline that turns them into chart series.
//!
//! ```
//! use pandash::DataFrame;
//! use serde_json::json;
//!
//! let df = DataFrame::from_records(&[
//!     json!({"industry": "SaaS", "numResponses": 5, "responseValue": "A"}),
//!     json!({"industry": "SaaS", "numResponses": 3, "responseValue": "A"}),
//!     json!({"industry": "Finance", "numResponses": 2, "responseValue": "B"}),
//! ])?;
//!
//! let chart = df
//!     .group_by(&["responseValue"])?
//!     .sum(&["numResponses"])?
//!     .sort_values("numResponses", false)?
//!     .chart_pairs("responseValue", "numResponses")?;
//! assert_eq!(chart, vec![("A".to_string(), 8.0), ("B".to_string(), 2.0)]);
//! # Ok::<(), pandash::Error>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod index;
pub mod io;
pub mod series;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use dataframe::DataFrame;
pub use error::{Error, ErrorKind, PandashError, Result};
pub use groupby::{AggFunc, AggSpec, Bucket, GroupBy};
pub use index::Index;
pub use series::{Scalar, Series};

/// Group `df` by the given key columns
pub fn group_by<'a, S: AsRef<str>>(df: &'a DataFrame, by: &[S]) -> Result<GroupBy<'a>> {
    GroupBy::new(df, by)
}

/// Stably sort `df` by one column
pub fn sort_values(df: &DataFrame, column: &str, ascending: bool) -> Result<DataFrame> {
    df.sort_values(column, ascending)
}

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

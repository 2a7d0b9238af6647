// DataFrame implementation module
pub mod base;
pub mod sort;

// Re-exports for convenience
pub use base::{DataFrame, Row};
pub use sort::compare_values;

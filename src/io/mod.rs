pub mod json;

// Re-export commonly used functions
pub use json::{from_json_value, read_json, read_json_str, to_json_value, write_json, JsonOrient};

//! Test utilities for temporary file handling and fixtures
//!
//! Temporary files respect TMPDIR/TEMP/TMP and are removed on drop.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use pandash::DataFrame;
use serde_json::{json, Value};

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Get the temporary directory, respecting environment variables
fn get_temp_dir() -> PathBuf {
    env::var("TMPDIR")
        .or_else(|_| env::var("TEMP"))
        .or_else(|_| env::var("TMP"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

/// Unique file path per test name and call
pub fn test_temp_path(test_name: &str, extension: &str) -> PathBuf {
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "pandash_test_{}_{}_{}.{}",
        test_name,
        std::process::id(),
        counter,
        extension
    );
    get_temp_dir().join(filename)
}

/// RAII wrapper for temporary test files
pub struct TempTestFile {
    path: PathBuf,
}

impl TempTestFile {
    pub fn new(test_name: &str, extension: &str) -> Self {
        TempTestFile {
            path: test_temp_path(test_name, extension),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write a JSON value to a fresh temporary file
pub fn write_json_fixture(test_name: &str, value: &Value) -> TempTestFile {
    let temp_file = TempTestFile::new(test_name, "json");
    fs::write(temp_file.path(), value.to_string()).expect("Failed to write JSON fixture");
    temp_file
}

/// The three-row example table used throughout the docs
pub fn sample_rows() -> Vec<Value> {
    vec![
        json!({"industry": "SaaS", "numResponses": 5, "responseValue": "A"}),
        json!({"industry": "SaaS", "numResponses": 3, "responseValue": "A"}),
        json!({"industry": "Finance", "numResponses": 2, "responseValue": "B"}),
    ]
}

pub fn survey_frame() -> DataFrame {
    DataFrame::from_records(&sample_rows()).expect("sample rows are valid")
}

/// A small survey document shaped like the backend's data file
pub fn sample_survey() -> Value {
    let entry = |size: &str, industry: &str, quarter: &str, value: &str, n: i64| {
        json!({
            "companySize": size,
            "industry": industry,
            "quarter": quarter,
            "responseValue": value,
            "numResponses": n
        })
    };

    json!({
        "metadata": {"source": "fixture"},
        "uniqueValues": {
            "companySize": ["Startup (1-10)", "Enterprise (1000+)"],
            "industry": ["SaaS & Technology", "Finance & Banking"],
            "quarter": ["2024-Q1", "2024-Q2"]
        },
        "questions": [
            {
                "questionId": "q1",
                "questionNumber": 1,
                "question": "Which marketing channels drive the most leads?",
                "questionType": "multi_response",
                "description": "Select all that apply",
                "data": [
                    entry("Startup (1-10)", "SaaS & Technology", "2024-Q1", "Email", 12),
                    entry("Startup (1-10)", "SaaS & Technology", "2024-Q1", "SEO", 20),
                    entry("Enterprise (1000+)", "Finance & Banking", "2024-Q1", "Email", 9),
                    entry("Enterprise (1000+)", "Finance & Banking", "2024-Q2", "Events", 15),
                    entry("Startup (1-10)", "Finance & Banking", "2024-Q2", "SEO", 1)
                ]
            },
            {
                "questionId": "q2",
                "questionNumber": 2,
                "question": "Which tools do you use?",
                "questionType": "multi_response",
                "data": [
                    entry("Startup (1-10)", "SaaS & Technology", "2024-Q1", "CRM", 3),
                    entry("Enterprise (1000+)", "Finance & Banking", "2024-Q2", "CRM", 4),
                    entry("Enterprise (1000+)", "Finance & Banking", "2024-Q2", "BI", 8)
                ]
            }
        ]
    })
}

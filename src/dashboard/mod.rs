//! Survey dataset model and the chart pipeline built on top of it
//!
//! The dataset is the JSON document served by the dashboard backend:
//! `uniqueValues` lists the filter dimensions and every question carries its
//! own row records.

mod chart;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataframe::{DataFrame, Row};
use crate::error::{Error, Result};

pub use chart::{chart_series, process_all, process_chart_data, ChartData, ChartOptions, Dataset};

/// Column names used by the filter dimensions
pub const COMPANY_SIZE: &str = "companySize";
pub const INDUSTRY: &str = "industry";
pub const QUARTER: &str = "quarter";

/// One row of survey results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    pub company_size: String,
    pub industry: String,
    pub quarter: String,
    pub response_value: String,
    pub num_responses: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub data: Vec<DataEntry>,
}

impl Question {
    /// Row records of this question as a DataFrame
    pub fn to_frame(&self) -> Result<DataFrame> {
        DataFrame::from_serializable(&self.data)
    }
}

/// Distinct values of each filter dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueValues {
    #[serde(default)]
    pub company_size: Vec<String>,
    #[serde(default)]
    pub industry: Vec<String>,
    #[serde(default)]
    pub quarter: Vec<String>,
}

/// The whole survey document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub unique_values: UniqueValues,
    pub questions: Vec<Question>,
}

/// Response envelope used by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        ApiResponse {
            success: false,
            data: None,
            timestamp: Utc::now(),
            error: Some(error.to_string()),
        }
    }
}

impl SurveyData {
    /// Parse either the bare document or an [`ApiResponse`] wrapping it
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let is_envelope = value
            .as_object()
            .map(|obj| obj.contains_key("success") && !obj.contains_key("questions"))
            .unwrap_or(false);

        if !is_envelope {
            return Ok(serde_json::from_value(value)?);
        }

        let envelope: ApiResponse<SurveyData> = serde_json::from_value(value)?;
        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(Error::Format(format!(
                "data source reported failure: {}",
                envelope.error.as_deref().unwrap_or("no data")
            ))),
        }
    }

    /// Load the document from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let data = Self::from_json_str(&text)?;
        debug!(
            "loaded {} questions from {}",
            data.questions.len(),
            path.as_ref().display()
        );
        Ok(data)
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }
}

/// Selected values per filter dimension; an empty list means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub company_size: Vec<String>,
    pub industry: Vec<String>,
    pub quarter: Vec<String>,
}

fn allows(selected: &[String], value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.iter().any(|s| s == v))
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.company_size.is_empty() && self.industry.is_empty() && self.quarter.is_empty()
    }

    /// Whether a survey row passes every active dimension
    pub fn matches_row(&self, row: &Row<'_>) -> bool {
        allows(&self.company_size, row.get_str(COMPANY_SIZE))
            && allows(&self.industry, row.get_str(INDUSTRY))
            && allows(&self.quarter, row.get_str(QUARTER))
    }

    /// `"Filtered: a, b | c"` for the active dimensions, `"All Data"` otherwise
    pub fn subtitle(&self) -> String {
        let parts: Vec<String> = [&self.company_size, &self.industry, &self.quarter]
            .into_iter()
            .filter(|values| !values.is_empty())
            .map(|values| values.join(", "))
            .collect();

        if parts.is_empty() {
            "All Data".to_string()
        } else {
            format!("Filtered: {}", parts.join(" | "))
        }
    }
}

use log::debug;
use serde::{Deserialize, Serialize};

use super::{FilterState, Question, SurveyData};
use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::groupby::{AggFunc, AggSpec};

/// Which columns feed the chart and how they are combined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Grouping column; its values become the chart labels
    pub label_column: String,
    /// Aggregated column; also the name of the aggregate in the output
    pub value_column: String,
    pub dataset_label: String,
    pub aggregation: AggFunc,
    pub ascending: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            label_column: "responseValue".to_string(),
            value_column: "numResponses".to_string(),
            dataset_label: "Mentions".to_string(),
            aggregation: AggFunc::Sum,
            ascending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Bar chart payload in the shape chart.js consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub subtitle: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Labels paired with the first dataset's values
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        let values = self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[]);
        self.labels
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect()
    }
}

/// group by label -> aggregate value -> sort by value -> read off pairs
pub fn chart_series(df: &DataFrame, options: &ChartOptions) -> Result<Vec<(String, f64)>> {
    let spec = AggSpec::new().with(options.value_column.as_str(), options.aggregation);
    let aggregated = df.group_by(&[options.label_column.as_str()])?.agg(&spec)?;
    let sorted = aggregated.sort_values(&options.value_column, options.ascending)?;
    sorted.chart_pairs(&options.label_column, &options.value_column)
}

/// Build the chart for one question under the given filters
pub fn process_chart_data(
    question: &Question,
    filters: &FilterState,
    options: &ChartOptions,
) -> Result<ChartData> {
    let frame = question.to_frame()?;
    let filtered = if filters.is_empty() {
        frame
    } else {
        frame.filter(|row| filters.matches_row(row))?
    };

    let pairs = chart_series(&filtered, options)?;
    debug!(
        "question {}: {} rows -> {} bars",
        question.question_id,
        filtered.row_count(),
        pairs.len()
    );

    let (labels, data): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
    Ok(ChartData {
        title: question.question.clone(),
        subtitle: filters.subtitle(),
        labels,
        datasets: vec![Dataset {
            label: options.dataset_label.clone(),
            data,
        }],
    })
}

/// Charts for every question, in document order
pub fn process_all(
    data: &SurveyData,
    filters: &FilterState,
    options: &ChartOptions,
) -> Result<Vec<ChartData>> {
    data.questions
        .iter()
        .map(|question| process_chart_data(question, filters, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DataEntry;

    fn entry(industry: &str, value: &str, n: i64) -> DataEntry {
        DataEntry {
            company_size: "Small (11-50)".to_string(),
            industry: industry.to_string(),
            quarter: "2024-Q1".to_string(),
            response_value: value.to_string(),
            num_responses: n,
        }
    }

    fn question() -> Question {
        Question {
            question_id: "q1".to_string(),
            question_number: Some(1),
            question: "Top channels".to_string(),
            question_type: None,
            description: None,
            data: vec![
                entry("SaaS", "Email", 2),
                entry("Finance", "Social", 9),
                entry("SaaS", "Email", 3),
                entry("SaaS", "Events", 5),
            ],
        }
    }

    #[test]
    fn test_chart_sorted_descending() {
        let chart =
            process_chart_data(&question(), &FilterState::default(), &ChartOptions::default())
                .unwrap();
        assert_eq!(chart.title, "Top channels");
        assert_eq!(chart.subtitle, "All Data");
        // Email (5) and Events (5) tie; Email was seen first
        assert_eq!(
            chart.pairs(),
            vec![("Social", 9.0), ("Email", 5.0), ("Events", 5.0)]
        );
        assert_eq!(chart.datasets[0].label, "Mentions");
    }

    #[test]
    fn test_chart_with_filter() {
        let filters = FilterState {
            industry: vec!["SaaS".into()],
            ..FilterState::default()
        };
        let chart = process_chart_data(&question(), &filters, &ChartOptions::default()).unwrap();
        assert_eq!(chart.labels, vec!["Email", "Events"]);
        assert_eq!(chart.subtitle, "Filtered: SaaS");
    }

    #[test]
    fn test_chart_filter_matches_nothing() {
        let filters = FilterState {
            quarter: vec!["2030-Q4".into()],
            ..FilterState::default()
        };
        let chart = process_chart_data(&question(), &filters, &ChartOptions::default()).unwrap();
        assert!(chart.labels.is_empty());
        assert!(chart.datasets[0].data.is_empty());
    }

    #[test]
    fn test_chart_count_aggregation() {
        let options = ChartOptions {
            aggregation: AggFunc::Count,
            ..ChartOptions::default()
        };
        let chart = process_chart_data(&question(), &FilterState::default(), &options).unwrap();
        assert_eq!(chart.pairs()[0], ("Email", 2.0));
    }

    #[test]
    fn test_chart_empty_question() {
        let mut q = question();
        q.data.clear();
        let chart = process_chart_data(&q, &FilterState::default(), &ChartOptions::default()).unwrap();
        assert!(chart.labels.is_empty());
    }

    #[test]
    fn test_chart_unknown_column() {
        let options = ChartOptions {
            label_column: "channel".into(),
            ..ChartOptions::default()
        };
        let err = process_chart_data(&question(), &FilterState::default(), &options).unwrap_err();
        assert!(err.is_config_error());
    }
}

mod common;

use pandash::{sort_values, DataFrame, Error, Scalar};

fn labels(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .iter()
        .map(Scalar::canonical_string)
        .collect()
}

fn ranked() -> DataFrame {
    DataFrame::from_columns(vec![
        (
            "name",
            vec!["p", "q", "r", "s", "t", "u"]
                .into_iter()
                .map(Scalar::from)
                .collect::<Vec<_>>(),
        ),
        (
            "score",
            vec![
                Scalar::Int(2),
                Scalar::Float(1.5),
                Scalar::Int(2),
                Scalar::Null,
                Scalar::Int(1),
                Scalar::Float(2.0),
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_sort_ascending_is_stable() {
    let sorted = ranked().sort_values("score", true).unwrap();
    assert_eq!(labels(&sorted, "name"), vec!["t", "q", "p", "r", "u", "s"]);
}

#[test]
fn test_sort_descending_is_stable() {
    let sorted = sort_values(&ranked(), "score", false).unwrap();
    assert_eq!(labels(&sorted, "name"), vec!["s", "p", "r", "u", "q", "t"]);
}

#[test]
fn test_sort_keeps_all_columns() {
    let df = common::survey_frame();
    let sorted = df.sort_values("numResponses", true).unwrap();
    assert_eq!(sorted.column_names(), df.column_names());
    assert_eq!(sorted.row_count(), df.row_count());
    assert_eq!(labels(&sorted, "industry"), vec!["Finance", "SaaS", "SaaS"]);
}

#[test]
fn test_sort_text_lexicographic() {
    let df = DataFrame::from_columns(vec![("w", vec!["pear", "Apple", "apple", "banana"])]).unwrap();
    let sorted = df.sort_values("w", true).unwrap();
    assert_eq!(labels(&sorted, "w"), vec!["Apple", "apple", "banana", "pear"]);
}

#[test]
fn test_sort_missing_column_is_config_error() {
    let df = common::survey_frame();
    let err = df.sort_values("missing", false).unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(_)));
    assert!(err.is_config_error());
}

#[test]
fn test_sort_empty_table() {
    let df = DataFrame::from_columns(vec![("x", Vec::<i64>::new())]).unwrap();
    let sorted = df.sort_values("x", false).unwrap();
    assert_eq!(sorted.row_count(), 0);
    assert_eq!(sorted.column_names(), &["x"]);
}

#[test]
fn test_sort_int_float_above_f64_precision() {
    use pandash::dataframe::compare_values;
    use std::cmp::Ordering;

    let a = Scalar::Int(9_007_199_254_740_993);
    let b = Scalar::Float(9_007_199_254_740_992.0);
    let c = Scalar::Int(9_007_199_254_740_992);

    assert_eq!(compare_values(&a, &b), Ordering::Greater);
    assert_eq!(compare_values(&b, &a), Ordering::Less);
    assert_eq!(compare_values(&b, &c), Ordering::Equal);
    assert_eq!(compare_values(&a, &c), Ordering::Greater);

    let df = DataFrame::from_columns(vec![("v", vec![a.clone(), b.clone(), c.clone()])]).unwrap();
    let sorted = df.sort_values("v", true).unwrap();
    // b and c tie, so they keep their input order
    assert_eq!(sorted.column("v").unwrap().values(), &[b, c, a]);
}

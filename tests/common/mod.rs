//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary JSON fixtures with automatic cleanup
//! - Sample survey documents and tables

#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{
    sample_rows, sample_survey, survey_frame, test_temp_path, write_json_fixture, TempTestFile,
};

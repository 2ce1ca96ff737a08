//! File-level checks: file type and row count.

use crate::schema::{FileTypeValidation, RowCountValidation};
use crate::types::ValidationFailure;

/// The file name must end with the expected type (plain suffix match).
pub fn validate_file_type(file_name: &str, op: &FileTypeValidation) -> Vec<ValidationFailure> {
    if file_name.ends_with(&op.expected_file_type) {
        return Vec::new();
    }
    vec![ValidationFailure::file(format!(
        "File {file_name} does not have the expected file type {}",
        op.expected_file_type
    ))]
}

/// The row count must lie within `[min or 0, max or unbounded]`. An explicit
/// `0` is a real bound on either side.
pub fn validate_row_count(row_count: usize, op: &RowCountValidation) -> Vec<ValidationFailure> {
    let min = op.min_row_count.unwrap_or(0);
    let max = op.max_row_count.unwrap_or(usize::MAX);
    if (min..=max).contains(&row_count) {
        return Vec::new();
    }
    vec![ValidationFailure::file(format!(
        "File does not have the expected row count (min: {}, max: {})",
        describe_bound(op.min_row_count),
        describe_bound(op.max_row_count)
    ))]
}

fn describe_bound(bound: Option<usize>) -> String {
    bound.map_or_else(|| "none".to_string(), |b| b.to_string())
}

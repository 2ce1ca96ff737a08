//! Column-set conformance plus per-row field checks for one fieldset.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::schema::{ExtraColumnPolicy, FieldsetSchema};
use crate::types::{ParamValues, Row, ValidationFailure};

use super::field::validate_field;

/// Validate the file's columns against `fieldset`, then every row against
/// every declared field.
///
/// Column failures come first, followed by row failures in row-then-field
/// order.
pub fn validate_fieldset(
    columns: &[String],
    rows: &[Row],
    fieldset: &FieldsetSchema,
    param_values: &ParamValues,
) -> Result<Vec<ValidationFailure>, EngineError> {
    let mut failures = check_columns(columns, fieldset);

    for (index, row) in rows.iter().enumerate() {
        for field in &fieldset.fields {
            failures.extend(validate_field(index + 1, row, field, param_values)?);
        }
    }

    Ok(failures)
}

/// Presence, order, and extra-column checks. Column names are compared
/// exactly.
pub fn check_columns(columns: &[String], fieldset: &FieldsetSchema) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let schema_columns = fieldset.column_names();
    let actual: HashSet<&str> = columns.iter().map(String::as_str).collect();

    let missing: Vec<&str> = fieldset
        .required_column_names()
        .into_iter()
        .filter(|name| !actual.contains(name))
        .collect();
    if !missing.is_empty() {
        failures.push(ValidationFailure::file(format!(
            "File is missing columns required by the schema: {}",
            missing.join(", ")
        )));
    }

    if fieldset.order_matters && !is_ordered_subsequence(columns, &schema_columns) {
        failures.push(ValidationFailure::file(
            "Columns in file are not in the same order as in the schema",
        ));
    }

    let expected: HashSet<&str> = schema_columns.iter().copied().collect();
    if actual != expected {
        match fieldset.allow_extra_columns {
            ExtraColumnPolicy::No => failures.push(ValidationFailure::file(
                "File has extra columns not allowed by the schema",
            )),
            ExtraColumnPolicy::OnlyAfterSchemaFields => {
                if !starts_with_schema_columns(columns, &schema_columns) {
                    failures.push(ValidationFailure::file(
                        "Extra columns are only allowed after the schema columns",
                    ));
                }
            }
            ExtraColumnPolicy::Anywhere => {}
        }
    }

    failures
}

/// Each file column, left to right, must match a schema column later than
/// the previous match.
fn is_ordered_subsequence(columns: &[String], schema_columns: &[&str]) -> bool {
    let mut remaining = schema_columns.iter();
    columns
        .iter()
        .all(|column| remaining.any(|expected| *expected == column.as_str()))
}

fn starts_with_schema_columns(columns: &[String], schema_columns: &[&str]) -> bool {
    columns.len() >= schema_columns.len()
        && columns
            .iter()
            .zip(schema_columns)
            .all(|(column, expected)| column == expected)
}

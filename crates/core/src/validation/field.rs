//! Per-row, per-field checks: emptiness, data type, allowed values.

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};

use crate::error::EngineError;
use crate::params::resolve_allowed_values;
use crate::schema::{AllowedValues, DataType, FieldSchema};
use crate::types::{ParamValues, Row, ValidationFailure};

/// Validate one field of one row.
///
/// Checks run in a fixed order (emptiness, data type, allowed values) and
/// are independent, so a single cell can produce several failures. Errors
/// only when an allowed-values param cannot be resolved.
pub fn validate_field(
    row_number: usize,
    row: &Row,
    field: &FieldSchema,
    param_values: &ParamValues,
) -> Result<Vec<ValidationFailure>, EngineError> {
    let mut failures = Vec::new();
    let value = lookup_value(row, field);

    if !field.allow_empty_values && value.map_or(true, str::is_empty) {
        failures.push(ValidationFailure::row(
            row_number,
            format!("Empty value for field '{}'", field.name),
        ));
    }

    match &field.data_type {
        DataType::Any | DataType::String => {}
        DataType::Number => {
            if !value_is_valid(value, is_number) {
                failures.push(ValidationFailure::row(
                    row_number,
                    format!(
                        "Value '{}' for field '{}' is not a valid number",
                        value.unwrap_or_default(),
                        field.name
                    ),
                ));
            }
        }
        DataType::Timestamp { date_time_format } => {
            let check = |v: &str| matches_timestamp_format(v, date_time_format);
            if !value_is_valid(value, check) {
                failures.push(ValidationFailure::row(
                    row_number,
                    format!(
                        "Value '{}' for field '{}' does not match the expected timestamp format {}",
                        value.unwrap_or_default(),
                        field.name,
                        date_time_format
                    ),
                ));
            }
        }
    }

    // An empty literal list places no constraint.
    let allowed = match &field.allowed_values {
        Some(AllowedValues::List(values)) if values.is_empty() => None,
        other => other.as_ref(),
    };
    if let Some(allowed) = allowed {
        let allowed = resolve_allowed_values(allowed, param_values)?;
        let permitted = value.is_some_and(|v| allowed.iter().any(|a| a == v));
        if !permitted {
            failures.push(ValidationFailure::row(
                row_number,
                format!(
                    "Value '{}' is not allowed for field '{}'",
                    value.unwrap_or_default(),
                    field.name
                ),
            ));
        }
    }

    Ok(failures)
}

/// The cell for `field` in `row`, `None` when the column is missing or the
/// cell is empty.
///
/// Case-insensitive lookups take the first key, in row order, that matches
/// once both sides are lowercased.
fn lookup_value<'r>(row: &'r Row, field: &FieldSchema) -> Option<&'r str> {
    let cell = if field.case_sensitive {
        row.get(&field.name)
    } else {
        let wanted = field.name.to_lowercase();
        row.iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, cell)| cell)
    };
    cell.and_then(|c| c.as_deref())
}

/// Type check shared by number and timestamp fields. An absent value is
/// never a type error; emptiness is the empty-value check's concern.
fn value_is_valid(value: Option<&str>, check: impl Fn(&str) -> bool) -> bool {
    value.map_or(true, check)
}

fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Whether `value` matches the strftime-style `pattern` in full.
///
/// Formats that only pin down part of a date or time (e.g. `%Y-%m`) are
/// accepted as long as the fields that are present form a valid calendar
/// value.
pub(crate) fn matches_timestamp_format(value: &str, pattern: &str) -> bool {
    let mut parsed = Parsed::new();
    if format::parse(&mut parsed, value, StrftimeItems::new(pattern)).is_err() {
        return false;
    }

    let date_ok = match parsed.to_naive_date() {
        Ok(_) => true,
        Err(e) => e.kind() == ParseErrorKind::NotEnough,
    };
    let time_ok = match parsed.to_naive_time() {
        Ok(_) => true,
        Err(e) => e.kind() == ParseErrorKind::NotEnough,
    };
    date_ok && time_ok
}

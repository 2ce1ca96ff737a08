//! Shared value types: validation failures, runtime parameter values, and
//! parsed tabular data.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// A single rule violation found in a data file.
///
/// `row_number` is 1-indexed over data rows (the header is not counted) and
/// is `None` for file-level failures such as a wrong file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<usize>,
}

impl ValidationFailure {
    /// A failure that applies to the whole file.
    pub fn file(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            row_number: None,
        }
    }

    /// A failure tied to one data row.
    pub fn row(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            row_number: Some(row_number),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row_number {
            Some(row) => write!(f, "row {row}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter values
// ---------------------------------------------------------------------------

/// A runtime value supplied for a declared workflow param.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Param values keyed by declared param name. `None` marks a param the
/// caller named explicitly but left without a value.
pub type ParamValues = BTreeMap<String, Option<ParamValue>>;

// ---------------------------------------------------------------------------
// Tabular data
// ---------------------------------------------------------------------------

/// One data row, keyed by column name in header order. Empty and missing
/// cells are `None`.
pub type Row = IndexMap<String, Option<String>>;

/// A fully materialized parse of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TabularData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_failure_omits_row_number_when_serialized() {
        let json = serde_json::to_value(ValidationFailure::file("bad type")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "bad type" }));
    }

    #[test]
    fn row_failure_serializes_camel_case_row_number() {
        let json = serde_json::to_value(ValidationFailure::row(3, "empty")).unwrap();
        assert_eq!(json["rowNumber"], 3);
    }

    #[test]
    fn param_values_deserialize_from_json_shapes() {
        let values: ParamValues = serde_json::from_str(
            r#"{"count": 3, "fieldset": "grades", "subjects": ["Math"], "unset": null}"#,
        )
        .unwrap();

        assert_eq!(values["count"], Some(ParamValue::Integer(3)));
        assert_eq!(values["fieldset"], Some(ParamValue::from("grades")));
        assert_eq!(
            values["subjects"],
            Some(ParamValue::List(vec!["Math".to_string()]))
        );
        assert_eq!(values["unset"], None);
    }

    #[test]
    fn display_prefixes_row_number() {
        assert_eq!(
            ValidationFailure::row(2, "oops").to_string(),
            "row 2: oops"
        );
        assert_eq!(ValidationFailure::file("oops").to_string(), "oops");
    }
}

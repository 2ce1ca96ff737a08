//! Typed definitions for workflow schemas.
//!
//! External documents use camelCase keys (`fieldsetSchemas`,
//! `allowExtraColumns`, `dataTypeValidation`, ...); the serde attributes
//! below are the single source of that mapping.

use serde::{Deserialize, Serialize};

/// Schema version written by [`WorkflowSchema::empty`].
pub const DEFAULT_SCHEMA_VERSION: &str = "0.1";

// ---------------------------------------------------------------------------
// Workflow schema
// ---------------------------------------------------------------------------

/// The sequence of operations a workflow applies to a data file, plus the
/// fieldsets and params those operations may refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub operations: Vec<Operation>,
    pub fieldset_schemas: Vec<FieldsetSchema>,
    pub params: Vec<Param>,
}

impl WorkflowSchema {
    /// A schema with no operations, fieldsets, or params.
    pub fn empty() -> Self {
        Self {
            version: Some(DEFAULT_SCHEMA_VERSION.to_string()),
            operations: Vec::new(),
            fieldset_schemas: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Look up a fieldset schema by exact name.
    pub fn fieldset(&self, name: &str) -> Option<&FieldsetSchema> {
        self.fieldset_schemas.iter().find(|f| f.name == name)
    }

    /// Look up a param declaration by exact name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A named input slot whose value is supplied when a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Variable name used by [`ParamReference`]s and in supplied values.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub required: bool,
}

/// Points at a declared param instead of embedding a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamReference {
    #[serde(rename = "paramId")]
    pub param_name: String,
}

impl ParamReference {
    pub fn new(param_name: impl Into<String>) -> Self {
        Self {
            param_name: param_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// One step of a workflow's validation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    FieldsetSchemaValidation(FieldsetSchemaValidation),
    FileTypeValidation(FileTypeValidation),
    RowCountValidation(RowCountValidation),
}

impl Operation {
    pub fn title(&self) -> &str {
        match self {
            Self::FieldsetSchemaValidation(op) => &op.title,
            Self::FileTypeValidation(op) => &op.title,
            Self::RowCountValidation(op) => &op.title,
        }
    }

    /// Stable tag matching the serialized `type` key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FieldsetSchemaValidation(_) => "fieldsetSchemaValidation",
            Self::FileTypeValidation(_) => "fileTypeValidation",
            Self::RowCountValidation(_) => "rowCountValidation",
        }
    }
}

/// Checks the file's columns and every row's values against a fieldset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsetSchemaValidation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub fieldset_schema: FieldsetReference,
}

/// Either a literal fieldset name or a param whose runtime value names one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldsetReference {
    Name(String),
    Param(ParamReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeValidation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub expected_file_type: String,
}

/// Row-count bounds; a missing bound leaves that side open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCountValidation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_row_count: Option<usize>,
    #[serde(default)]
    pub max_row_count: Option<usize>,
}

// ---------------------------------------------------------------------------
// Fieldsets
// ---------------------------------------------------------------------------

/// A named, reusable column-set contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsetSchema {
    pub name: String,
    /// File columns must appear in declared order (gaps allowed).
    pub order_matters: bool,
    pub fields: Vec<FieldSchema>,
    pub allow_extra_columns: ExtraColumnPolicy,
}

impl FieldsetSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn required_column_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Where columns not declared in a fieldset may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraColumnPolicy {
    No,
    Anywhere,
    OnlyAfterSchemaFields,
}

impl ExtraColumnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Anywhere => "anywhere",
            Self::OnlyAfterSchemaFields => "onlyAfterSchemaFields",
        }
    }
}

impl std::fmt::Display for ExtraColumnPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub name: String,
    /// Match `name` against row keys exactly (`true`) or ignoring ASCII and
    /// Unicode case (`false`).
    pub case_sensitive: bool,
    /// The column must be present in the file.
    pub required: bool,
    #[serde(rename = "dataTypeValidation")]
    pub data_type: DataType,
    pub allow_empty_values: bool,
    #[serde(default)]
    pub allowed_values: Option<AllowedValues>,
}

/// The data-type rule for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum DataType {
    Any,
    String,
    Number,
    Timestamp {
        /// strftime-style format, e.g. `%Y-%m-%d %H:%M:%S`.
        #[serde(rename = "dateTimeFormat")]
        date_time_format: String,
    },
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Number => "number",
            Self::Timestamp { .. } => "timestamp",
        }
    }
}

/// Values a column may take: a literal list or a param supplying one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowedValues {
    List(Vec<String>),
    Param(ParamReference),
}

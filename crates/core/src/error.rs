//! Fatal error types.
//!
//! Rule violations found in a data file are never errors; they are collected
//! as [`crate::types::ValidationFailure`]s. The variants here signal a
//! mismatch between the caller, the schema, and the environment, and abort
//! the run.

use crate::params::ResolutionError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Parameter definition for {0} not found in schema.")]
    ParamDefinitionNotFound(String),

    #[error("Parameter {0} is referenced by the schema but no value was supplied.")]
    ParamValueMissing(String),

    #[error("Parameter {param} must be {expected}.")]
    InvalidParamValue {
        param: String,
        expected: &'static str,
    },

    #[error("Fieldset schema {0} not found in schema.")]
    FieldsetSchemaNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid workflow schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ResolutionError> for EngineError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Undeclared(name) => Self::ParamDefinitionNotFound(name),
            ResolutionError::NotSupplied(name) => Self::ParamValueMissing(name),
        }
    }
}

/// Structural problems found while loading a workflow schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Malformed schema document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate fieldset schema name: {0}")]
    DuplicateFieldset(String),

    #[error("Duplicate param name: {0}")]
    DuplicateParam(String),

    #[error("Fieldset schema {fieldset} declares field {field} more than once")]
    DuplicateField { fieldset: String, field: String },
}

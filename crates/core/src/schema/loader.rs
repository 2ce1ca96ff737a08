//! Loading a [`WorkflowSchema`] from a JSON document, with the structural
//! checks serde cannot express (name uniqueness).

use std::collections::HashSet;
use std::path::Path;

use crate::error::{EngineError, SchemaError};

use super::model::WorkflowSchema;

impl WorkflowSchema {
    /// Parse and structurally validate a schema document.
    pub fn from_json(document: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(document)?;
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Like [`WorkflowSchema::from_json`] for an already-parsed JSON value.
    pub fn from_value(document: serde_json::Value) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_value(document)?;
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Reject duplicate fieldset names, duplicate param names, and fields
    /// declared twice within one fieldset.
    ///
    /// Fieldset references are resolved when the workflow runs, not here.
    pub fn validate_structure(&self) -> Result<(), SchemaError> {
        let mut fieldset_names = HashSet::new();
        for fieldset in &self.fieldset_schemas {
            if !fieldset_names.insert(fieldset.name.as_str()) {
                return Err(SchemaError::DuplicateFieldset(fieldset.name.clone()));
            }

            let mut field_names = HashSet::new();
            for field in &fieldset.fields {
                if !field_names.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        fieldset: fieldset.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        let mut param_names = HashSet::new();
        for param in &self.params {
            if !param_names.insert(param.name.as_str()) {
                return Err(SchemaError::DuplicateParam(param.name.clone()));
            }
        }

        Ok(())
    }
}

/// Load a workflow schema from a JSON file.
pub fn load_workflow_schema(path: impl AsRef<Path>) -> Result<WorkflowSchema, EngineError> {
    let path = path.as_ref();
    let document = std::fs::read_to_string(path)?;
    let schema = WorkflowSchema::from_json(&document)?;
    tracing::debug!(
        path = %path.display(),
        operations = schema.operations.len(),
        fieldsets = schema.fieldset_schemas.len(),
        params = schema.params.len(),
        "Loaded workflow schema"
    );
    Ok(schema)
}

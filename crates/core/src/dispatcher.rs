//! Runs a schema's operations, in declared order, over parsed data.

use crate::error::EngineError;
use crate::params::{resolve_param, ResolutionError};
use crate::schema::{FieldsetReference, Operation, WorkflowSchema};
use crate::types::{ParamValues, TabularData, ValidationFailure};
use crate::validation::{validate_fieldset, validate_file_type, validate_row_count};

/// Execute every operation and collect their failures in operation order.
///
/// Operations do not short-circuit one another, with one exception: if a
/// param-backed fieldset reference cannot be resolved to a string, the
/// whole dispatch returns just that one failure. A resolved fieldset name
/// that the schema does not define is fatal.
pub fn dispatch(
    data: &TabularData,
    file_name: &str,
    param_values: &ParamValues,
    schema: &WorkflowSchema,
) -> Result<Vec<ValidationFailure>, EngineError> {
    let mut failures = Vec::new();

    for operation in &schema.operations {
        tracing::debug!(kind = operation.kind(), title = operation.title(), "Running operation");

        match operation {
            Operation::FieldsetSchemaValidation(op) => {
                let name = match resolve_fieldset_name(&op.fieldset_schema, schema, param_values) {
                    Ok(name) => name,
                    Err(failure) => {
                        tracing::warn!(
                            operation = %op.title,
                            reason = %failure.message,
                            "Fieldset reference could not be resolved"
                        );
                        return Ok(vec![failure]);
                    }
                };
                let fieldset = schema
                    .fieldset(name)
                    .ok_or_else(|| EngineError::FieldsetSchemaNotFound(name.to_string()))?;
                failures.extend(validate_fieldset(
                    &data.columns,
                    &data.rows,
                    fieldset,
                    param_values,
                )?);
            }
            Operation::FileTypeValidation(op) => {
                failures.extend(validate_file_type(file_name, op));
            }
            Operation::RowCountValidation(op) => {
                failures.extend(validate_row_count(data.row_count(), op));
            }
        }
    }

    Ok(failures)
}

/// The fieldset name an operation refers to, either literally or through a
/// param whose supplied value must be a string.
pub fn resolve_fieldset_name<'a>(
    reference: &'a FieldsetReference,
    schema: &WorkflowSchema,
    param_values: &'a ParamValues,
) -> Result<&'a str, ValidationFailure> {
    let reference = match reference {
        FieldsetReference::Name(name) => return Ok(name.as_str()),
        FieldsetReference::Param(reference) => reference,
    };

    let not_a_string = || {
        ValidationFailure::file(format!(
            "The param value referenced with {} is not a string.",
            reference.param_name
        ))
    };

    match resolve_param(reference, &schema.params, param_values) {
        Ok(value) => value.as_str().ok_or_else(not_a_string),
        Err(err @ ResolutionError::Undeclared(_)) => Err(ValidationFailure::file(err.to_string())),
        Err(ResolutionError::NotSupplied(_)) => Err(not_a_string()),
    }
}

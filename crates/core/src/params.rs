//! Runtime parameter handling.
//!
//! Resolution is a two-step lookup: a [`ParamReference`] must name a param
//! declared by the schema, and the caller must have supplied a value for
//! it. Each step fails with its own [`ResolutionError`] variant so callers
//! can decide whether the problem is a soft failure or fatal.

use crate::error::EngineError;
use crate::schema::{AllowedValues, Param, ParamReference, WorkflowSchema};
use crate::types::{ParamValue, ParamValues};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("Param with id {0} could not be found in the param schemas.")]
    Undeclared(String),

    #[error("No value was supplied for param {0}.")]
    NotSupplied(String),
}

/// Every supplied key must name a param declared by the schema.
pub fn validate_param_values(
    param_values: &ParamValues,
    schema: &WorkflowSchema,
) -> Result<(), EngineError> {
    for name in param_values.keys() {
        if schema.param(name).is_none() {
            return Err(EngineError::ParamDefinitionNotFound(name.clone()));
        }
    }

    Ok(())
}

/// Resolve a reference against the declared params, then the supplied
/// values.
pub fn resolve_param<'a>(
    reference: &ParamReference,
    declared: &[Param],
    supplied: &'a ParamValues,
) -> Result<&'a ParamValue, ResolutionError> {
    let param = declared
        .iter()
        .find(|p| p.name == reference.param_name)
        .ok_or_else(|| ResolutionError::Undeclared(reference.param_name.clone()))?;

    supplied_value(&param.name, supplied)
}

/// The value supplied for `name`, treating an explicit `null` as missing.
pub fn supplied_value<'a>(
    name: &str,
    supplied: &'a ParamValues,
) -> Result<&'a ParamValue, ResolutionError> {
    supplied
        .get(name)
        .and_then(Option::as_ref)
        .ok_or_else(|| ResolutionError::NotSupplied(name.to_string()))
}

/// Turn an allowed-values rule into a literal list.
///
/// A param-backed list that was not supplied, or whose value is not a list
/// of strings, is a fatal misconfiguration.
pub fn resolve_allowed_values<'a>(
    allowed: &'a AllowedValues,
    supplied: &'a ParamValues,
) -> Result<&'a [String], EngineError> {
    match allowed {
        AllowedValues::List(values) => Ok(values),
        AllowedValues::Param(reference) => {
            let value = supplied_value(&reference.param_name, supplied)?;
            value.as_list().ok_or_else(|| EngineError::InvalidParamValue {
                param: reference.param_name.clone(),
                expected: "a list of strings",
            })
        }
    }
}

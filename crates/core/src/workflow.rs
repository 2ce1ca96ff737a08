//! Top-level entry points: parse a file, check the supplied params, and run
//! the schema's operations.

use std::path::Path;

use crate::config::EngineConfig;
use crate::dispatcher::dispatch;
use crate::error::EngineError;
use crate::params::validate_param_values;
use crate::parser::{CsvParser, TabularParser};
use crate::schema::WorkflowSchema;
use crate::types::{ParamValues, TabularData, ValidationFailure};

/// Validate raw CSV contents against `schema`.
///
/// `file_name` is only used for file-type checks. Returns baseline
/// structural failures (when enabled) followed by rule failures; an empty
/// list means the file is valid.
pub fn process_workflow(
    file_name: &str,
    contents: &[u8],
    param_values: &ParamValues,
    schema: &WorkflowSchema,
    config: &EngineConfig,
) -> Result<Vec<ValidationFailure>, EngineError> {
    process_workflow_with_parser(
        &CsvParser::default(),
        file_name,
        contents,
        param_values,
        schema,
        config,
    )
}

/// [`process_workflow`] with a caller-supplied parser.
pub fn process_workflow_with_parser<P: TabularParser + ?Sized>(
    parser: &P,
    file_name: &str,
    contents: &[u8],
    param_values: &ParamValues,
    schema: &WorkflowSchema,
    config: &EngineConfig,
) -> Result<Vec<ValidationFailure>, EngineError> {
    let parsed = parser.parse(contents)?;

    let mut failures = if config.baseline_validation {
        parsed.baseline_failures
    } else {
        if !parsed.baseline_failures.is_empty() {
            tracing::debug!(
                file_name,
                skipped = parsed.baseline_failures.len(),
                "Baseline validation disabled; dropping structural failures"
            );
        }
        Vec::new()
    };

    failures.extend(process_parsed(file_name, &parsed.data, param_values, schema)?);

    tracing::info!(file_name, failures = failures.len(), "Workflow validation finished");
    Ok(failures)
}

/// Validate already-parsed data. No baseline structural checks are run.
pub fn process_parsed(
    file_name: &str,
    data: &TabularData,
    param_values: &ParamValues,
    schema: &WorkflowSchema,
) -> Result<Vec<ValidationFailure>, EngineError> {
    validate_param_values(param_values, schema)?;
    dispatch(data, file_name, param_values, schema)
}

/// Read a data file from disk and validate it. The path's file name is used
/// for file-type checks.
pub fn process_workflow_file(
    path: impl AsRef<Path>,
    param_values: &ParamValues,
    schema: &WorkflowSchema,
    config: &EngineConfig,
) -> Result<Vec<ValidationFailure>, EngineError> {
    let path = path.as_ref();
    let contents = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    process_workflow(&file_name, &contents, param_values, schema, config)
}

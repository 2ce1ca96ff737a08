//! End-to-end tests for workflow validation against fixture schemas and
//! CSV files.

use std::path::PathBuf;

use assert_matches::assert_matches;
use rowcheck_core::schema::{FieldsetReference, Operation, Param, ParamReference};
use rowcheck_core::{
    load_workflow_schema, process_workflow, process_workflow_file, EngineConfig, EngineError,
    ParamValue, ParamValues, ValidationFailure, WorkflowSchema,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn grades_schema() -> WorkflowSchema {
    load_workflow_schema(fixture("workflow_schema.json")).expect("fixture schema should load")
}

fn subjects() -> ParamValues {
    let mut values = ParamValues::new();
    values.insert(
        "allowed_subjects".to_string(),
        Some(ParamValue::List(vec![
            "Math".to_string(),
            "History".to_string(),
            "Science".to_string(),
        ])),
    );
    values
}

fn run(
    file_name: &str,
    contents: &str,
    params: &ParamValues,
    schema: &WorkflowSchema,
    config: &EngineConfig,
) -> Vec<ValidationFailure> {
    process_workflow(file_name, contents.as_bytes(), params, schema, config)
        .expect("workflow should run")
}

fn messages(failures: &[ValidationFailure]) -> Vec<&str> {
    failures.iter().map(|f| f.message.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Fixture files
// ---------------------------------------------------------------------------

#[test]
fn good_data_has_no_failures() {
    let failures = process_workflow_file(
        fixture("good.csv"),
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    )
    .unwrap();
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
}

#[test]
fn bad_data_reports_disallowed_subject_and_invalid_score() {
    let failures = process_workflow_file(
        fixture("bad.csv"),
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(
        failures,
        vec![
            ValidationFailure::row(2, "Value 'Art' is not allowed for field 'Subject'"),
            ValidationFailure::row(2, "Value 'x' for field 'Score' is not a valid number"),
        ]
    );
}

// ---------------------------------------------------------------------------
// Rule behaviour through the whole pipeline
// ---------------------------------------------------------------------------

#[test]
fn each_empty_required_value_is_reported_once_per_row() {
    let csv = "Subject,Score,Recorded\n,1,\nMath,2,\n,3,\n";
    let schema = WorkflowSchema::from_value(json!({
        "operations": [{
            "type": "fieldsetSchemaValidation",
            "title": "Columns",
            "description": null,
            "fieldsetSchema": "grades"
        }],
        "fieldsetSchemas": [{
            "name": "grades",
            "orderMatters": false,
            "allowExtraColumns": "anywhere",
            "fields": [{
                "name": "Subject",
                "caseSensitive": true,
                "required": true,
                "dataTypeValidation": { "dataType": "string" },
                "allowEmptyValues": false,
                "allowedValues": null
            }]
        }],
        "params": []
    }))
    .unwrap();

    let failures = run("g.csv", csv, &ParamValues::new(), &schema, &EngineConfig::default());
    assert_eq!(
        failures,
        vec![
            ValidationFailure::row(1, "Empty value for field 'Subject'"),
            ValidationFailure::row(3, "Empty value for field 'Subject'"),
        ]
    );
}

#[test]
fn permuted_columns_fail_order_check() {
    let csv = "Score,Subject,Recorded\n10,Math,\n";
    let failures = run(
        "g.csv",
        csv,
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    );
    assert_eq!(
        messages(&failures),
        vec!["Columns in file are not in the same order as in the schema"]
    );
}

#[test]
fn extra_column_rejected_when_not_allowed() {
    let csv = "Subject,Score,Recorded,Instructor\nMath,10,,Smith\n";
    let failures = run(
        "g.csv",
        csv,
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    );
    assert_eq!(
        messages(&failures),
        vec![
            "Columns in file are not in the same order as in the schema",
            "File has extra columns not allowed by the schema",
        ]
    );
}

#[test]
fn file_level_failures_are_reported_in_operation_order() {
    let csv = "Subject,Score,Recorded\n";
    let failures = run(
        "grades.xlsx",
        csv,
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    );
    assert_eq!(
        failures,
        vec![
            ValidationFailure::file("File grades.xlsx does not have the expected file type .csv"),
            ValidationFailure::file(
                "File does not have the expected row count (min: 1, max: 1000)"
            ),
        ]
    );
}

// ---------------------------------------------------------------------------
// Baseline structural validation
// ---------------------------------------------------------------------------

#[test]
fn baseline_failures_precede_rule_failures() {
    let csv = "Subject,Score,Recorded\nMath,10,,surplus\nArt,1,\n";
    let failures = run(
        "g.csv",
        csv,
        &subjects(),
        &grades_schema(),
        &EngineConfig::default(),
    );
    assert_eq!(
        failures,
        vec![
            ValidationFailure::row(1, "Row 1 has an extra value in field at position 4"),
            ValidationFailure::row(2, "Value 'Art' is not allowed for field 'Subject'"),
        ]
    );
}

#[test]
fn disabling_baseline_validation_never_adds_failures() {
    let csv = "Subject,Score,Recorded\nMath,10,,surplus\n,,\nArt,x,\n";
    let schema = grades_schema();

    let with_baseline = run("g.csv", csv, &subjects(), &schema, &EngineConfig::default());
    let without_baseline = run(
        "g.csv",
        csv,
        &subjects(),
        &schema,
        &EngineConfig {
            baseline_validation: false,
        },
    );

    assert!(without_baseline.len() < with_baseline.len());
    assert!(without_baseline.iter().all(|f| with_baseline.contains(f)));
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[test]
fn param_selected_fieldset_matches_literal_fieldset() {
    let contents = std::fs::read(fixture("demographics.csv")).unwrap();

    let mut literal = grades_schema();
    literal.operations = vec![Operation::FieldsetSchemaValidation(
        serde_json::from_value(json!({
            "title": "Demographics",
            "description": null,
            "fieldsetSchema": "demographic_fields"
        }))
        .unwrap(),
    )];
    literal.params.clear();

    let mut indirect = literal.clone();
    let Operation::FieldsetSchemaValidation(op) = &mut indirect.operations[0] else {
        unreachable!();
    };
    op.fieldset_schema = FieldsetReference::Param(ParamReference::new("fieldset_schema"));
    indirect.params.push(Param {
        name: "fieldset_schema".into(),
        display_name: "Fieldset".into(),
        description: "Fieldset to validate against".into(),
        required: true,
    });

    let mut params = ParamValues::new();
    params.insert(
        "fieldset_schema".to_string(),
        Some(ParamValue::Text("demographic_fields".to_string())),
    );

    let config = EngineConfig::default();
    let expected =
        process_workflow("people.csv", &contents, &ParamValues::new(), &literal, &config).unwrap();
    let actual = process_workflow("people.csv", &contents, &params, &indirect, &config).unwrap();

    assert_eq!(
        expected,
        vec![ValidationFailure::row(2, "Value 'Mid' is not allowed for field 'Region'")]
    );
    assert_eq!(actual, expected);
}

#[test]
fn unknown_param_name_aborts_run() {
    let mut params = subjects();
    params.insert("semester".to_string(), Some(ParamValue::Integer(2)));

    let err = process_workflow_file(
        fixture("good.csv"),
        &params,
        &grades_schema(),
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert_matches!(err, EngineError::ParamDefinitionNotFound(name) if name == "semester");
}

#[test]
fn unsupplied_required_param_does_not_abort_run() {
    let mut schema = WorkflowSchema::empty();
    schema.params.push(Param {
        name: "p".into(),
        display_name: "P".into(),
        description: String::new(),
        required: true,
    });

    let failures = process_workflow(
        "a.csv",
        b"a\n1\n",
        &ParamValues::new(),
        &schema,
        &EngineConfig::default(),
    )
    .unwrap();
    assert!(failures.is_empty());
}

#[test]
fn unknown_fieldset_aborts_run() {
    let mut schema = grades_schema();
    schema.fieldset_schemas.retain(|f| f.name != "grades");

    let err = process_workflow_file(
        fixture("good.csv"),
        &subjects(),
        &schema,
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert_matches!(err, EngineError::FieldsetSchemaNotFound(name) if name == "grades");
}

#[test]
fn malformed_schema_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    std::fs::write(
        &path,
        r#"{"operations": [{"type": "mystery", "title": "?"}], "fieldsetSchemas": [], "params": []}"#,
    )
    .unwrap();

    let err = load_workflow_schema(&path).unwrap_err();
    assert_matches!(err, EngineError::Schema(_));
}

#[test]
fn subject_and_score_scenario_yields_two_row_two_failures() {
    let schema = WorkflowSchema::from_value(json!({
        "operations": [{
            "type": "fieldsetSchemaValidation",
            "title": "Scores",
            "description": null,
            "fieldsetSchema": "scores"
        }],
        "fieldsetSchemas": [{
            "name": "scores",
            "orderMatters": false,
            "allowExtraColumns": "no",
            "fields": [
                {
                    "name": "Subject",
                    "caseSensitive": true,
                    "required": true,
                    "dataTypeValidation": { "dataType": "string" },
                    "allowEmptyValues": false,
                    "allowedValues": { "paramId": "allowed_subjects" }
                },
                {
                    "name": "Score",
                    "caseSensitive": true,
                    "required": true,
                    "dataTypeValidation": { "dataType": "number" },
                    "allowEmptyValues": false,
                    "allowedValues": null
                }
            ]
        }],
        "params": [{
            "name": "allowed_subjects",
            "displayName": "Allowed subjects",
            "description": "",
            "required": false
        }]
    }))
    .unwrap();

    let failures = run(
        "scores.csv",
        "Subject,Score\nMath,10\nArt,x\n",
        &subjects(),
        &schema,
        &EngineConfig::default(),
    );
    assert_eq!(
        failures,
        vec![
            ValidationFailure::row(2, "Value 'Art' is not allowed for field 'Subject'"),
            ValidationFailure::row(2, "Value 'x' for field 'Score' is not a valid number"),
        ]
    );
}

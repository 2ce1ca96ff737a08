//! Workflow schema model and loading.
//!
//! A schema is deserialized once from a declarative JSON document and is
//! read-only afterwards; it can be shared freely across validation runs.

pub mod loader;
pub mod model;

pub use loader::load_workflow_schema;
pub use model::{
    AllowedValues, DataType, ExtraColumnPolicy, FieldSchema, FieldsetReference, FieldsetSchema,
    FieldsetSchemaValidation, FileTypeValidation, Operation, Param, ParamReference,
    RowCountValidation, WorkflowSchema,
};

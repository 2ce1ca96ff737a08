//! Schema-driven validation engine for tabular data files.
//!
//! A [`schema::WorkflowSchema`] declares an ordered list of validation
//! operations, a library of reusable fieldset schemas, and named runtime
//! parameters. [`workflow::process_workflow`] parses one file, runs every
//! operation against it, and returns the collected
//! [`types::ValidationFailure`]s. This crate does no database or network
//! I/O and never mutates a loaded schema.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod params;
pub mod parser;
pub mod schema;
pub mod types;
pub mod validation;
pub mod workflow;

pub use config::EngineConfig;
pub use error::{EngineError, SchemaError};
pub use schema::{load_workflow_schema, WorkflowSchema};
pub use types::{ParamValue, ParamValues, ValidationFailure};
pub use workflow::{process_workflow, process_workflow_file};

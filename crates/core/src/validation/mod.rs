//! Rule-based validators.
//!
//! Pure logic over already-parsed data; nothing here reads files or logs.

pub mod field;
pub mod fieldset;
pub mod file;

pub use field::validate_field;
pub use fieldset::{check_columns, validate_fieldset};
pub use file::{validate_file_type, validate_row_count};

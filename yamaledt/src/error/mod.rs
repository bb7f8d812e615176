//! Error types produced while generating test cases.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::{CaseFailure, CaseFailures};
pub use types::SourceError;

pub(crate) use constructors::{
    conversion, dump_write, duplicate_display_name, invalid_structure, macro_syntax, malformed,
    missing_parameter, selection, unexpected_field, unreadable,
};

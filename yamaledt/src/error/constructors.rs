//! Constructors shared by the pipeline stages.
//!
//! Each helper returns the shared `Arc<SourceError>` form so call sites can
//! use them directly inside `map_err` and `ok_or_else`.

use std::sync::Arc;

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::SourceError;
use crate::loader::SelectionError;
use crate::macros::MacroError;

impl SourceError {
    /// Construct a merge error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yamaledt::SourceError;
    /// let fe = figment::Error::from("boom");
    /// let e = SourceError::merge(fe);
    /// assert!(matches!(e, SourceError::Merge(_)));
    /// ```
    #[must_use]
    pub fn merge(source: FigmentError) -> Self {
        Self::Merge(Box::new(source))
    }
}

pub(crate) fn unreadable(resource: &str, source: std::io::Error) -> Arc<SourceError> {
    Arc::new(SourceError::ResourceUnreadable {
        resource: resource.to_owned(),
        source,
    })
}

pub(crate) fn macro_syntax(resource: &str, source: MacroError) -> Arc<SourceError> {
    Arc::new(SourceError::MacroSyntax {
        resource: resource.to_owned(),
        source,
    })
}

pub(crate) fn dump_write(path: &Utf8Path, source: std::io::Error) -> Arc<SourceError> {
    Arc::new(SourceError::DumpWrite {
        path: path.to_owned(),
        source,
    })
}

pub(crate) fn malformed(
    resource: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> Arc<SourceError> {
    Arc::new(SourceError::MalformedSource {
        resource: resource.to_owned(),
        source: source.into(),
    })
}

pub(crate) fn selection(expression: &str, source: SelectionError) -> Arc<SourceError> {
    Arc::new(SourceError::Selection {
        expression: expression.to_owned(),
        source,
    })
}

pub(crate) fn invalid_structure(resource: &str, message: impl Into<String>) -> Arc<SourceError> {
    Arc::new(SourceError::InvalidStructure {
        resource: resource.to_owned(),
        message: message.into(),
    })
}

pub(crate) fn duplicate_display_name(method: &str, first: usize, second: usize) -> Arc<SourceError> {
    Arc::new(SourceError::DuplicateDisplayName {
        method: method.to_owned(),
        first,
        second,
    })
}

pub(crate) fn missing_parameter(parameter: &str, record: &str, method: &str) -> Arc<SourceError> {
    Arc::new(SourceError::MissingParameter {
        parameter: parameter.to_owned(),
        record: record.to_owned(),
        method: method.to_owned(),
    })
}

pub(crate) fn unexpected_field(field: &str, record: &str, method: &str) -> Arc<SourceError> {
    Arc::new(SourceError::UnexpectedField {
        field: field.to_owned(),
        record: record.to_owned(),
        method: method.to_owned(),
    })
}

pub(crate) fn conversion(
    parameter: &str,
    record: &str,
    source: serde_json::Error,
) -> Arc<SourceError> {
    Arc::new(SourceError::Conversion {
        parameter: parameter.to_owned(),
        record: record.to_owned(),
        source,
    })
}

//! Primary error enum for test-case generation.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use crate::loader::SelectionError;
use crate::macros::MacroError;

/// Errors that abort case generation for a test method.
///
/// Every variant names the resource, record, parameter, or method involved so
/// a misconfigured data source can be diagnosed from the message alone.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The resource could not be opened or read as UTF-8 text.
    #[error("The source '{resource}' is not readable: {source}")]
    ResourceUnreadable {
        /// Resource name as declared or defaulted.
        resource: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The macro engine rejected the resource text.
    #[error("The source '{resource}' is not a valid macro source: {source}")]
    MacroSyntax {
        /// Resource name as declared or defaulted.
        resource: String,
        /// Failure reported by the macro engine.
        #[source]
        source: MacroError,
    },

    /// The expanded text could not be written to the configured dump file.
    #[error("Cannot dump the expanded source to '{path}': {source}")]
    DumpWrite {
        /// Location the dump was written to.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The expanded text is not valid YAML.
    #[error("The source '{resource}' is malformed: {source}")]
    MalformedSource {
        /// Resource name as declared or defaulted.
        resource: String,
        /// Parser diagnostics.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The selection expression did not resolve against the parsed tree.
    #[error("Selection expression '{expression}' failed: {source}")]
    Selection {
        /// Expression as configured.
        expression: String,
        /// Why evaluation failed.
        #[source]
        source: SelectionError,
    },

    /// The (selected) tree is not a mapping of records to field mappings.
    #[error("The YAML source '{resource}' is not valid: {message}")]
    InvalidStructure {
        /// Resource name as declared or defaulted.
        resource: String,
        /// Description of the offending node.
        message: String,
    },

    /// More than one parameter resolved to the display-name slot.
    #[error(
        "Test method '{method}' declares more than one display name parameter \
         (positions {first} and {second})"
    )]
    DuplicateDisplayName {
        /// Test method owning the parameters.
        method: String,
        /// Position of the first display name slot.
        first: usize,
        /// Position of the repeated display name slot.
        second: usize,
    },

    /// A scope declared a macro block alongside an inline macro configuration.
    #[error(
        "Scope '{scope}' configures macros both in its source directive and in a \
         separate macro block"
    )]
    ConflictingDirectives {
        /// Scope carrying both declarations.
        scope: String,
    },

    /// No scope in the chain declares where the test data comes from.
    #[error("Test method '{method}' has no source directive in its scope chain")]
    NoSourceDirective {
        /// Test method being generated.
        method: String,
    },

    /// Strict binding found no field for a declared parameter.
    #[error("Parameter '{parameter}' is missing from record '{record}' of test method '{method}'")]
    MissingParameter {
        /// Binding name of the parameter.
        parameter: String,
        /// Record (display name) being bound.
        record: String,
        /// Test method being generated.
        method: String,
    },

    /// Strict binding found a field no parameter consumes.
    #[error("Field '{field}' of record '{record}' is not a parameter of test method '{method}'")]
    UnexpectedField {
        /// Unconsumed field name.
        field: String,
        /// Record (display name) being bound.
        record: String,
        /// Test method being generated.
        method: String,
    },

    /// A bound value could not be converted into the requested type.
    #[error("Parameter '{parameter}' of record '{record}' cannot be converted: {source}")]
    Conversion {
        /// Binding name of the parameter.
        parameter: String,
        /// Record (display name) the value came from.
        record: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Folding the scope directives failed.
    #[error("Failed to merge scope directives: {0}")]
    Merge(#[from] Box<FigmentError>),
}

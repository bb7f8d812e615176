//! Loading expanded text into named records.
//!
//! The loader parses the text, narrows it with the selection expression, and
//! keeps the resulting tree. Its shape is checked only when the records are
//! requested, so a structurally invalid source fails at binding time.

mod select;
mod yaml;

pub use select::{SelectionError, select};

use serde_json::{Map, Value};
use tracing::debug;

use crate::SourceResult;
use crate::error::{invalid_structure, malformed, selection};

/// One named entry of a [`RecordSet`].
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    name: &'a str,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Record<'a> {
    /// Record name, used as the display name of the generated case.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Value of the field called `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.fields
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.map_or(0, Map::len)
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records loaded from one resource, in document order.
///
/// # Examples
///
/// ```
/// use yamaledt::loader::load;
///
/// let set = load("<inline>", "test:\n  t1:\n    a: 1\n  t2:\n    a: 2\nother: {}\n", Some("test"))?;
/// let names: Vec<&str> = set.records()?.iter().map(|record| record.name()).collect();
/// assert_eq!(names, ["t1", "t2"]);
/// # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct RecordSet {
    resource: String,
    tree: Value,
}

impl RecordSet {
    /// Wrap an already parsed `tree` loaded from `resource`.
    #[must_use]
    pub fn new(resource: impl Into<String>, tree: Value) -> Self {
        Self {
            resource: resource.into(),
            tree,
        }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &Value {
        &self.tree
    }

    /// Validate the tree and list its records.
    ///
    /// A `null` tree has no records and a `null` record has no fields.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::InvalidStructure`] when the tree is not a
    /// mapping or a record is neither a mapping nor `null`.
    pub fn records(&self) -> SourceResult<Vec<Record<'_>>> {
        let entries = match &self.tree {
            Value::Null => return Ok(Vec::new()),
            Value::Object(entries) => entries,
            other => {
                return Err(invalid_structure(
                    &self.resource,
                    format!("expected a mapping of records, found {}", kind(other)),
                ));
            }
        };
        entries
            .iter()
            .map(|(name, value)| match value {
                Value::Null => Ok(Record {
                    name: name.as_str(),
                    fields: None,
                }),
                Value::Object(fields) => Ok(Record {
                    name: name.as_str(),
                    fields: Some(fields),
                }),
                other => Err(invalid_structure(
                    &self.resource,
                    format!("record '{name}' should be a mapping, found {}", kind(other)),
                )),
            })
            .collect()
    }
}

/// Parse `text` and narrow it with `selection_expr`.
///
/// # Errors
///
/// Returns [`crate::SourceError::MalformedSource`] when the text is not valid
/// YAML and [`crate::SourceError::Selection`] when the selection does not
/// resolve.
pub fn load(resource: &str, text: &str, selection_expr: Option<&str>) -> SourceResult<RecordSet> {
    let parsed = yaml::parse(text).map_err(|err| malformed(resource, err))?;
    let tree = match selection_expr {
        Some(expression) => {
            debug!(resource, expression, "applying selection");
            select(&parsed, expression)
                .map_err(|err| selection(expression, err))?
                .clone()
        }
        None => parsed,
    };
    Ok(RecordSet::new(resource, tree))
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

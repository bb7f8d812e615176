//! Values bound for one record and their typed extraction.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use super::DisplayName;
use crate::SourceResult;
use crate::error::conversion;

/// Value bound to one parameter slot.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundValue {
    /// Record name for a slot declared with [`DisplayName`].
    DisplayName(DisplayName),
    /// Record name for a display-name slot of any other type.
    Text(String),
    /// Field value taken from the record.
    Value(Value),
    /// Lenient binding found no field for the slot.
    Absent,
}

impl BoundValue {
    /// Whether no field was found for the slot.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The value as an untyped tree; [`BoundValue::Absent`] becomes `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::DisplayName(name) => Value::String(name.as_str().to_owned()),
            Self::Text(text) => Value::String(text.clone()),
            Self::Value(value) => value.clone(),
            Self::Absent => Value::Null,
        }
    }
}

/// Ordered arguments for one generated case.
///
/// # Examples
///
/// ```
/// use yamaledt::binder::{BoundArguments, BoundValue};
///
/// let args = BoundArguments::new(
///     "t1",
///     vec![
///         ("k".to_owned(), BoundValue::Value(serde_json::json!(5))),
///         ("n".to_owned(), BoundValue::Absent),
///     ],
/// );
/// assert_eq!(args.value::<i64>(0)?, 5);
/// assert_eq!(args.value::<Option<i64>>(1)?, None);
/// assert_eq!(args.value_or_default::<i64>(1)?, 0);
/// # Ok::<_, std::sync::Arc<yamaledt::SourceError>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoundArguments {
    record: String,
    entries: Vec<(String, BoundValue)>,
}

impl BoundArguments {
    /// Arguments bound from `record`, as `(binding name, value)` pairs in
    /// parameter order.
    #[must_use]
    pub fn new(record: impl Into<String>, entries: Vec<(String, BoundValue)>) -> Self {
        Self {
            record: record.into(),
            entries,
        }
    }

    /// Name of the record the arguments came from.
    #[must_use]
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BoundValue> {
        self.entries.get(index).map(|(_, value)| value)
    }

    /// Binding name of the parameter at `index`.
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    /// Arguments in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// The bound display name, if a slot received one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.iter().find_map(|value| match value {
            BoundValue::DisplayName(name) => Some(name.as_str()),
            BoundValue::Text(text) => Some(text.as_str()),
            BoundValue::Value(_) | BoundValue::Absent => None,
        })
    }

    /// Deserialize the argument at `index` into `T`.
    ///
    /// An absent argument deserializes from `null`, so `Option<T>` yields
    /// `None` and `()` succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::Conversion`] when there is no argument at
    /// `index` or the value does not fit `T`.
    pub fn value<T: DeserializeOwned>(&self, index: usize) -> SourceResult<T> {
        let (parameter, bound) = self.entry(index)?;
        serde_json::from_value(bound.to_value())
            .map_err(|err| conversion(parameter, &self.record, err))
    }

    /// Like [`BoundArguments::value`], but absent and `null` arguments yield
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::Conversion`] when there is no argument at
    /// `index` or a present value does not fit `T`.
    pub fn value_or_default<T: DeserializeOwned + Default>(&self, index: usize) -> SourceResult<T> {
        let (_, bound) = self.entry(index)?;
        match bound {
            BoundValue::Absent | BoundValue::Value(Value::Null) => Ok(T::default()),
            _ => self.value(index),
        }
    }

    fn entry(&self, index: usize) -> SourceResult<(&str, &BoundValue)> {
        self.entries
            .get(index)
            .map(|(name, value)| (name.as_str(), value))
            .ok_or_else(|| {
                conversion(
                    &format!("#{index}"),
                    &self.record,
                    serde_json::Error::custom(format!(
                        "only {} argument(s) were bound",
                        self.entries.len()
                    )),
                )
            })
    }
}

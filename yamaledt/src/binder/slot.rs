//! Formal parameters of a data-driven test method.

use std::any::{TypeId, type_name};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SourceResult;
use crate::error::duplicate_display_name;

/// Binding name of the slot that receives the record name.
pub const DISPLAY_NAME: &str = "DisplayName";

/// Record name handed to a parameter declared with this type.
///
/// Declaring a slot with [`ParameterSlot::of::<DisplayName>()`] makes it the
/// display-name slot, because its simple type name is [`DISPLAY_NAME`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Wrap a record name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The record name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the record name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DisplayName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One formal parameter: its position, declared type, and binding name.
///
/// # Examples
///
/// ```
/// use yamaledt::binder::{DisplayName, ParameterSlot};
///
/// assert_eq!(ParameterSlot::of::<i64>().binding(), "i64");
/// assert_eq!(ParameterSlot::named::<i64>("k").binding(), "k");
/// assert!(ParameterSlot::of::<DisplayName>().is_display_name());
/// assert!(ParameterSlot::named::<String>("DisplayName").is_display_name());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSlot {
    position: usize,
    type_id: TypeId,
    type_name: &'static str,
    binding: String,
}

impl ParameterSlot {
    /// Slot bound by the simple name of `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        let simple = simple_type_name(type_name::<T>());
        Self {
            position: 0,
            type_id: TypeId::of::<T>(),
            type_name: simple,
            binding: simple.to_owned(),
        }
    }

    /// Slot of type `T` bound by an explicit `name`.
    #[must_use]
    pub fn named<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            binding: name.into(),
            ..Self::of::<T>()
        }
    }

    /// Ordinal position within its [`ParameterList`].
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Simple name of the declared type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Identity of the declared type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Field name this slot binds.
    #[must_use]
    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Whether this slot receives the record name.
    #[must_use]
    pub fn is_display_name(&self) -> bool {
        self.binding == DISPLAY_NAME
    }

    /// Whether the record name should be wrapped in [`DisplayName`].
    #[must_use]
    pub fn wraps_display_name(&self) -> bool {
        self.type_id == TypeId::of::<DisplayName>()
    }
}

/// Last path segment of `full` with generic arguments removed.
fn simple_type_name(full: &'static str) -> &'static str {
    let base = full.split_once('<').map_or(full, |(base, _)| base);
    base.rsplit_once("::").map_or(base, |(_, last)| last)
}

/// Validated, positioned parameter list of one test method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterList {
    slots: Vec<ParameterSlot>,
}

impl ParameterList {
    /// Number the `slots` in order and check that at most one of them is the
    /// display-name slot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SourceError::DuplicateDisplayName`] naming `method`
    /// and the positions of the first two display-name slots.
    pub fn new(method: &str, slots: impl IntoIterator<Item = ParameterSlot>) -> SourceResult<Self> {
        let mut display = None;
        let mut positioned = Vec::new();
        for (position, mut slot) in slots.into_iter().enumerate() {
            slot.position = position;
            if slot.is_display_name() {
                if let Some(first) = display {
                    return Err(duplicate_display_name(method, first, position));
                }
                display = Some(position);
            }
            positioned.push(slot);
        }
        Ok(Self { slots: positioned })
    }

    /// Slots in declaration order.
    #[must_use]
    pub fn slots(&self) -> &[ParameterSlot] {
        &self.slots
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the method takes no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of the display-name slot, if any.
    #[must_use]
    pub fn display_name_position(&self) -> Option<usize> {
        self.slots.iter().position(ParameterSlot::is_display_name)
    }

    pub(crate) fn consumes(&self, field: &str) -> bool {
        self.slots.iter().any(|slot| slot.binding == field)
    }
}

//! Mapping one record onto a parameter list.

use tracing::trace;

use super::{BoundArguments, BoundValue, DisplayName, ParameterList};
use crate::SourceResult;
use crate::error::{missing_parameter, unexpected_field};
use crate::loader::Record;

/// Bind `record` to `parameters` for the test method `method`.
///
/// The display-name slot receives the record name and every other slot the
/// field named by its binding. A missing field binds [`BoundValue::Absent`]
/// unless `strict` is set.
///
/// # Errors
///
/// In strict mode returns [`crate::SourceError::MissingParameter`] for the
/// first slot without a field and [`crate::SourceError::UnexpectedField`] for
/// the first field no slot binds.
pub fn bind(
    method: &str,
    parameters: &ParameterList,
    record: Record<'_>,
    strict: bool,
) -> SourceResult<BoundArguments> {
    let mut entries = Vec::with_capacity(parameters.len());
    for slot in parameters.slots() {
        let value = if slot.is_display_name() {
            let name = record.name();
            if slot.wraps_display_name() {
                BoundValue::DisplayName(DisplayName::new(name))
            } else {
                BoundValue::Text(name.to_owned())
            }
        } else {
            match record.field(slot.binding()) {
                Some(value) => BoundValue::Value(value.clone()),
                None if strict => {
                    return Err(missing_parameter(slot.binding(), record.name(), method));
                }
                None => BoundValue::Absent,
            }
        };
        entries.push((slot.binding().to_owned(), value));
    }
    if strict
        && let Some(field) = record.field_names().find(|field| !parameters.consumes(field))
    {
        return Err(unexpected_field(field, record.name(), method));
    }
    trace!(method, record = record.name(), "bound record");
    Ok(BoundArguments::new(record.name(), entries))
}

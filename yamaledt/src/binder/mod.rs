//! Binding records to the formal parameters of a test method.

mod arguments;
mod bind;
mod slot;

pub use arguments::{BoundArguments, BoundValue};
pub use bind::bind;
pub use slot::{DISPLAY_NAME, DisplayName, ParameterList, ParameterSlot};

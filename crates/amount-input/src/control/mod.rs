//! Control module - the public amount input composing field, sign, currency
//! selection, exchange link and persistence.

mod amount_input;
mod layout;


pub use amount_input::AmountInput;
pub use layout::{ControlId, ControlPart, DescendantId};

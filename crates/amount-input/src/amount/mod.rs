//! Amount module - raw text parsing, precision clamping and field errors.

mod amount_field;
mod amount_model;
mod amount_parser;

pub use amount_field::AmountField;
pub use amount_model::FieldError;
pub use amount_parser::{format_magnitude, parse, parse_rate};

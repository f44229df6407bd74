//! Exchange module - the rate linking the amount to a converted value.

mod exchange_link;
mod exchange_model;

pub use exchange_link::{CompoundResultListener, ExchangeLink};
pub use exchange_model::{sanitize_rate, CurrencyPairing};

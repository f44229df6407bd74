//! Currency module - host-owned currency units and the selectable list.

mod currency_model;
mod currency_selection;

pub use currency_model::{CurrencyOption, CurrencyUnit};
pub use currency_selection::CurrencySelection;

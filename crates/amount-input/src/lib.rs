//! Wealthfolio Amount Input - headless engine behind the amount entry control.
//!
//! This crate holds the logic of the composite amount field used in activity
//! and transfer forms: a signed amount, an optional currency selector and an
//! optional exchange rate linking the amount to a converted value. It is
//! UI-toolkit agnostic; the host owns the widgets and forwards input events
//! into [`AmountInput`], which keeps the derived values consistent and can be
//! snapshotted and restored across a widget rebuild.

pub mod amount;
pub mod config;
pub mod constants;
pub mod control;
pub mod currency;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod host;
pub mod persistence;
pub mod sign;

pub use amount::{AmountField, FieldError};
pub use config::{AmountInputConfig, LayoutVariant};
pub use control::{AmountInput, ControlId, ControlPart, DescendantId};
pub use currency::{CurrencyOption, CurrencySelection, CurrencyUnit};
pub use events::{AmountInputEvent, AmountInputEventSink, MockEventSink, NoOpEventSink};
pub use exchange::{CompoundResultListener, CurrencyPairing, ExchangeLink};
pub use host::{AmountInputHost, MockAmountInputHost};
pub use persistence::{PersistedState, PersistenceError};
pub use sign::{SignMode, SignState};

// Re-export error types
pub use errors::Error;
pub use errors::Result;

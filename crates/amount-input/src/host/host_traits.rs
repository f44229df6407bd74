use rust_decimal::Decimal;

use crate::control::{ControlId, DescendantId};
use crate::currency::CurrencyUnit;

/// Trait defining the capabilities the host provides to an amount input.
///
/// The host is injected with [`AmountInput::with_host`](crate::AmountInput::with_host).
/// A control without a host works until one of these capabilities is needed,
/// at which point the operation fails with
/// [`Error::MissingHostCapability`](crate::Error::MissingHostCapability).
pub trait AmountInputHost {
    /// Opens the calculator overlay seeded with the current amount.
    fn show_calculator(&self, amount: Option<Decimal>, control_id: ControlId);

    /// The user picked another currency in the dropdown.
    fn on_currency_selection_changed(&self, unit: &CurrencyUnit);

    /// Called one event-loop turn after a restore, once the rebuilt tree is
    /// laid out, so the host can move focus back to `descendant_id`.
    fn request_focus_after_restore(&self, control_id: ControlId, descendant_id: DescendantId);

    /// Resolves a currency code from the host catalog.
    fn lookup_currency(&self, code: &str) -> Option<CurrencyUnit>;
}

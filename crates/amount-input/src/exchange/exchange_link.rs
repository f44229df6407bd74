use std::fmt;

use rust_decimal::Decimal;

use super::exchange_model::{sanitize_rate, CurrencyPairing};
use crate::amount::{parse_rate, AmountField};
use crate::currency::CurrencyUnit;

/// Receives `amount × rate` whenever the amount or the rate changes.
pub type CompoundResultListener = Box<dyn FnMut(Decimal)>;

/// Bidirectional engine between the amount, the exchange rate and the
/// converted ("compound") value.
///
/// Two directions exist:
/// - output: the amount is multiplied by the rate and pushed to a listener;
/// - input: an externally supplied value is multiplied by the rate and
///   written back as the displayed amount.
///
/// Only one writer is meant to be active. Subscribing to the output clears a
/// pending input, otherwise the two directions would keep rewriting each
/// other. The reverse is not enforced: setting a pending input while an
/// output listener is attached keeps the listener, so the written amount is
/// re-emitted through it. Callers that need strict exclusion must not mix
/// the two.
pub struct ExchangeLink {
    enabled: bool,
    editable: bool,
    rate: Option<Decimal>,
    inverse: bool,
    pairing: CurrencyPairing,
    pending_input: Option<Decimal>,
    output: Option<CompoundResultListener>,
}

impl fmt::Debug for ExchangeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeLink")
            .field("enabled", &self.enabled)
            .field("editable", &self.editable)
            .field("rate", &self.rate)
            .field("inverse", &self.inverse)
            .field("pairing", &self.pairing)
            .field("pending_input", &self.pending_input)
            .field("output_subscribed", &self.output.is_some())
            .finish()
    }
}

impl ExchangeLink {
    /// `enabled` mirrors whether the control shows a rate editor at all.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            editable: true,
            rate: None,
            inverse: false,
            pairing: CurrencyPairing::default(),
            pending_input: None,
            output: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_editable(&self) -> bool {
        self.enabled && self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Stored rate, converting the primary currency into the home currency.
    pub fn rate(&self) -> Option<Decimal> {
        self.rate
    }

    /// Rate in the requested direction. The inverse is `1 / rate`.
    pub fn rate_for(&self, inverse: bool) -> Option<Decimal> {
        let rate = self.rate?;
        if inverse {
            Decimal::ONE.checked_div(rate)
        } else {
            Some(rate)
        }
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Switches the presented direction. The stored rate is unchanged.
    pub fn set_inverse(&mut self, inverse: bool) {
        self.inverse = inverse;
    }

    pub fn pairing(&self) -> &CurrencyPairing {
        &self.pairing
    }

    /// Reconfigures which currencies the rate relates. Labels only, the
    /// numeric rate is left alone.
    pub fn set_pairing(&mut self, primary: Option<CurrencyUnit>, home: Option<CurrencyUnit>) {
        if !self.enabled {
            log::trace!("Exchange rate disabled, ignoring pairing update");
            return;
        }
        self.pairing = CurrencyPairing::new(primary, home);
    }

    pub fn pending_input(&self) -> Option<Decimal> {
        self.pending_input
    }

    pub fn is_output_subscribed(&self) -> bool {
        self.output.is_some()
    }

    /// Attaches the output listener and drops any pending input.
    pub fn set_output_subscription(&mut self, listener: CompoundResultListener) {
        if self.pending_input.take().is_some() {
            log::debug!("Output subscription attached, discarding pending input");
        }
        self.output = Some(listener);
    }

    /// Stores an external value to convert into the displayed amount and
    /// applies it right away when a rate is known. Returns true when the
    /// amount was rewritten.
    pub fn set_pending_input(&mut self, value: Decimal, field: &mut AmountField) -> bool {
        self.pending_input = Some(value);
        self.apply_pending_input(field, false)
    }

    /// Pushes `amount × rate` to the output listener when all three exist.
    /// The displayed error is left untouched.
    pub fn on_amount_changed(&mut self, field: &AmountField) {
        let Some(listener) = self.output.as_mut() else {
            return;
        };
        let amount = field.peek();
        let (Some(amount), Some(rate)) = (amount, self.rate) else {
            return;
        };
        match amount.checked_mul(rate) {
            Some(result) => listener(result),
            None => log::warn!("Compound result overflowed for {} × {}", amount, rate),
        }
    }

    /// Stores the new rate and recomputes both directions.
    ///
    /// While restoring, writing the pending input back does not trigger the
    /// output a second time. Returns true when the pending input rewrote
    /// the amount.
    pub fn on_rate_changed(
        &mut self,
        new_rate: Option<Decimal>,
        field: &mut AmountField,
        is_restoring: bool,
    ) -> bool {
        self.rate = sanitize_rate(new_rate);
        self.on_amount_changed(field);
        self.apply_pending_input(field, is_restoring)
    }

    /// Programmatic rate update. `None` when the rate is unchanged, in which
    /// case nothing is recomputed or emitted; otherwise whether the amount
    /// was rewritten.
    pub fn set_rate(
        &mut self,
        new_rate: Option<Decimal>,
        field: &mut AmountField,
    ) -> Option<bool> {
        let new_rate = sanitize_rate(new_rate);
        if new_rate == self.rate {
            log::trace!("Exchange rate unchanged, skipping recompute");
            return None;
        }
        Some(self.on_rate_changed(new_rate, field, false))
    }

    /// User edit of the rate text. The text is read in the presented
    /// direction. `None` when the editor is disabled; otherwise whether the
    /// amount was rewritten.
    pub fn on_rate_text_changed(
        &mut self,
        text: &str,
        field: &mut AmountField,
    ) -> Option<bool> {
        if !self.is_editable() {
            log::debug!("Exchange rate editor is disabled, ignoring edit");
            return None;
        }
        let parsed = parse_rate(text);
        let rate = if self.inverse {
            parsed.and_then(|value| Decimal::ONE.checked_div(value))
        } else {
            parsed
        };
        Some(self.on_rate_changed(rate, field, false))
    }

    fn apply_pending_input(&mut self, field: &mut AmountField, is_restoring: bool) -> bool {
        let (Some(input), Some(rate)) = (self.pending_input, self.rate) else {
            return false;
        };
        let Some(amount) = input.checked_mul(rate) else {
            log::warn!("Pending input overflowed for {} × {}", input, rate);
            return false;
        };
        field.set_magnitude(amount);
        if !is_restoring {
            self.on_amount_changed(field);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_listener() -> (CompoundResultListener, Rc<RefCell<Vec<Decimal>>>) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        (Box::new(move |value| sink.borrow_mut().push(value)), received)
    }

    fn field_with(text: &str) -> AmountField {
        let mut field = AmountField::new(2);
        field.set_raw_text(text);
        field
    }

    #[test]
    fn test_amount_change_emits_compound_result() {
        let mut link = ExchangeLink::new(true);
        let mut field = field_with("12.50");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);

        link.on_rate_changed(Some(dec!(1.1)), &mut field, false);
        assert_eq!(*received.borrow(), vec![dec!(13.75)]);
    }

    #[test]
    fn test_amount_change_without_rate_is_noop() {
        let mut link = ExchangeLink::new(true);
        let field = field_with("12.50");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);

        link.on_amount_changed(&field);
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_invalid_amount_is_not_emitted() {
        let mut link = ExchangeLink::new(true);
        let mut field = field_with("abc");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);

        link.on_rate_changed(Some(dec!(2)), &mut field, false);
        assert!(received.borrow().is_empty());
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_pending_input_is_written_when_rate_arrives() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);

        assert!(!link.set_pending_input(dec!(100), &mut field));
        assert_eq!(field.raw_text(), "");

        assert!(link.on_rate_changed(Some(dec!(1.2)), &mut field, false));
        assert_eq!(field.peek(), Some(dec!(120)));
    }

    #[test]
    fn test_pending_input_applies_immediately_with_known_rate() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);
        link.on_rate_changed(Some(dec!(0.5)), &mut field, false);

        assert!(link.set_pending_input(dec!(30), &mut field));
        assert_eq!(field.peek(), Some(dec!(15)));
    }

    #[test]
    fn test_output_subscription_clears_pending_input() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);
        link.set_pending_input(dec!(100), &mut field);

        let (listener, _received) = recording_listener();
        link.set_output_subscription(listener);
        assert_eq!(link.pending_input(), None);

        link.on_rate_changed(Some(dec!(1.2)), &mut field, false);
        assert_eq!(field.raw_text(), "");
    }

    #[test]
    fn test_pending_input_after_subscription_keeps_listener() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);
        link.on_rate_changed(Some(dec!(2)), &mut field, false);

        link.set_pending_input(dec!(10), &mut field);
        assert!(link.is_output_subscribed());
        assert_eq!(field.peek(), Some(dec!(20)));
        assert_eq!(*received.borrow(), vec![dec!(40)]);
    }

    #[test]
    fn test_restoring_rate_does_not_reemit_pending_write() {
        let mut link = ExchangeLink::new(true);
        let mut field = field_with("5");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);
        link.set_pending_input(dec!(10), &mut field);

        link.on_rate_changed(Some(dec!(3)), &mut field, true);
        // one emission for the amount present before the write
        assert_eq!(*received.borrow(), vec![dec!(15)]);
        assert_eq!(field.peek(), Some(dec!(30)));
    }

    #[test]
    fn test_set_rate_is_idempotent() {
        let mut link = ExchangeLink::new(true);
        let mut field = field_with("10");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);

        assert_eq!(link.set_rate(Some(dec!(1.5)), &mut field), Some(false));
        assert_eq!(link.set_rate(Some(dec!(1.5)), &mut field), None);
        assert_eq!(*received.borrow(), vec![dec!(15)]);
    }

    #[test]
    fn test_non_positive_rate_is_absent() {
        let mut link = ExchangeLink::new(true);
        let mut field = field_with("10");
        let (listener, received) = recording_listener();
        link.set_output_subscription(listener);

        link.on_rate_changed(Some(dec!(-1)), &mut field, false);
        assert_eq!(link.rate(), None);
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_rate_text_is_read_in_presented_direction() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);

        link.set_inverse(true);
        assert_eq!(link.on_rate_text_changed("4", &mut field), Some(false));
        assert_eq!(link.rate(), Some(dec!(0.25)));
        assert_eq!(link.rate_for(true), Some(dec!(4)));

        link.set_editable(false);
        assert_eq!(link.on_rate_text_changed("2", &mut field), None);
        assert_eq!(link.rate(), Some(dec!(0.25)));
    }

    #[test]
    fn test_pairing_ignored_when_disabled() {
        let mut link = ExchangeLink::new(false);
        link.set_pairing(Some(CurrencyUnit::new("EUR", 2)), None);
        assert_eq!(link.pairing(), &CurrencyPairing::default());
    }

    #[test]
    fn test_pairing_keeps_rate() {
        let mut link = ExchangeLink::new(true);
        let mut field = AmountField::new(2);
        link.on_rate_changed(Some(dec!(1.1)), &mut field, false);

        link.set_pairing(
            Some(CurrencyUnit::new("EUR", 2)),
            Some(CurrencyUnit::new("USD", 2)),
        );
        assert_eq!(link.rate(), Some(dec!(1.1)));
        assert_eq!(
            link.pairing().presented_codes(false),
            (Some("EUR"), Some("USD"))
        );
    }
}

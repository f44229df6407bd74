//! Property-based integration tests for the amount input.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use wealthfolio_amount_input::{
    AmountInput, AmountInputConfig, ControlId, CurrencyOption, CurrencyUnit, MockAmountInputHost,
};

// =============================================================================
// Generators
// =============================================================================

/// Generates a non-negative amount with at most two decimals.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Generates a positive exchange rate with up to six decimals.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Generates raw text a user might leave in the field, valid or not.
fn arb_raw_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}(\\.[0-9]{0,4})?",
        "[0-9a-z.,-]{0,8}",
        Just(String::new()),
    ]
}

fn catalog() -> Vec<CurrencyUnit> {
    vec![
        CurrencyUnit::new("EUR", 2),
        CurrencyUnit::new("JPY", 0),
        CurrencyUnit::new("KWD", 3),
    ]
}

fn options() -> Vec<CurrencyOption> {
    catalog().iter().map(CurrencyOption::from).collect()
}

fn config() -> AmountInputConfig {
    AmountInputConfig::default()
        .with_currency_selection(true)
        .with_exchange_rate(true)
}

fn build(host: &Rc<MockAmountInputHost>) -> AmountInput {
    let mut input = AmountInput::new(ControlId(1), config()).with_host(host.clone());
    input
        .add_currencies(options())
        .expect("catalog covers every option");
    input
}

fn subscribe(input: &mut AmountInput) -> Rc<RefCell<Vec<Decimal>>> {
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    input.set_compound_result_listener(Box::new(move |value| sink.borrow_mut().push(value)));
    received
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Setting a signed amount and reading the typed value gives it back.
    #[test]
    fn prop_set_amount_round_trips_typed_value(amount in arb_amount(), positive in any::<bool>()) {
        let mut input = AmountInput::new(ControlId(1), AmountInputConfig::default());
        let signed = if positive { amount } else { -amount };

        input.set_amount(signed, true);
        prop_assert_eq!(input.typed_value_or_zero(), signed);
    }

    /// Restoring a snapshot into a fresh control reproduces the observable
    /// values and never reports a currency change to the host.
    #[test]
    fn prop_snapshot_restore_reproduces_state(
        raw in arb_raw_text(),
        positive in any::<bool>(),
        currency_index in 0usize..3,
        rate in proptest::option::of(arb_rate()),
    ) {
        let host = Rc::new(MockAmountInputHost::new(catalog()));
        let mut original = build(&host);
        original.select_currency(currency_index).unwrap();
        original.on_text_changed(raw);
        original.set_type(positive);
        original.set_exchange_rate(rate);
        let state = original.snapshot();

        let mut restored = build(&host);
        host.clear();
        restored.restore(&state).unwrap();

        prop_assert_eq!(restored.typed_value(false, false), original.typed_value(false, false));
        prop_assert_eq!(restored.exchange_rate(), original.exchange_rate());
        prop_assert_eq!(restored.selected_currency(), original.selected_currency());
        prop_assert!(host.currency_changes().is_empty());
        prop_assert_eq!(restored.snapshot(), state);
    }

    /// Once an output listener is attached, a rate change never writes an
    /// amount derived from an earlier pending input.
    #[test]
    fn prop_subscription_discards_pending_input(
        raw in "[0-9]{1,4}",
        pending in arb_amount(),
        rate in arb_rate(),
    ) {
        let host = Rc::new(MockAmountInputHost::new(catalog()));
        let mut input = build(&host);
        input.on_text_changed(raw.clone());

        input.set_compound_result_input(pending);
        let _received = subscribe(&mut input);
        input.set_exchange_rate(Some(rate));

        prop_assert_eq!(input.amount_text(), raw.as_str());
        prop_assert_eq!(input.compound_result_input(), None);
    }

    /// Setting the same rate twice emits exactly what setting it once does.
    #[test]
    fn prop_set_rate_is_idempotent(amount in arb_amount(), rate in arb_rate()) {
        let host = Rc::new(MockAmountInputHost::new(catalog()));

        let mut once = build(&host);
        once.set_amount(amount, false);
        let once_received = subscribe(&mut once);
        once.set_exchange_rate(Some(rate));

        let mut twice = build(&host);
        twice.set_amount(amount, false);
        let twice_received = subscribe(&mut twice);
        twice.set_exchange_rate(Some(rate));
        twice.set_exchange_rate(Some(rate));

        prop_assert_eq!(once_received.borrow().len(), 1);
        prop_assert_eq!(&*once_received.borrow(), &*twice_received.borrow());
    }

    /// The validated magnitude never carries more decimals than the currency allows.
    #[test]
    fn prop_validated_amount_respects_precision(
        raw in "[0-9]{1,6}\\.[0-9]{1,6}",
        currency_index in 0usize..3,
    ) {
        let host = Rc::new(MockAmountInputHost::new(catalog()));
        let mut input = build(&host);
        input.select_currency(currency_index).unwrap();
        input.on_text_changed(raw);

        let value = input.validate(false).unwrap();
        prop_assert!(value.scale() <= input.fraction_digits());
        prop_assert!(!value.is_sign_negative());
    }
}

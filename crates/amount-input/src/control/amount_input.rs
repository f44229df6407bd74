use std::collections::VecDeque;
use std::rc::Rc;

use rust_decimal::Decimal;

use super::layout::{ControlId, ControlPart, DescendantId};
use crate::amount::{AmountField, FieldError};
use crate::config::{AmountInputConfig, LayoutVariant};
use crate::currency::{CurrencyOption, CurrencySelection, CurrencyUnit};
use crate::errors::{Error, Result};
use crate::events::{AmountInputEvent, AmountInputEventSink, NoOpEventSink};
use crate::exchange::{CompoundResultListener, CurrencyPairing, ExchangeLink};
use crate::host::AmountInputHost;
use crate::persistence::PersistedState;
use crate::sign::{SignMode, SignState};

/// Work that must wait for the host's next event-loop turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredTask {
    RestoreFocus(DescendantId),
}

/// Amount entry control: a signed amount with optional currency selection
/// and an optional exchange rate.
///
/// All operations run synchronously on the thread that owns the control.
/// The host forwards user input (`on_text_changed`, `on_type_button_clicked`,
/// `select_currency`, `on_rate_text_changed`, ...) and reads back values.
/// The only deferred work is focus restoration after [`AmountInput::restore`],
/// delivered by [`AmountInput::dispatch_deferred`] once the host has laid out
/// the rebuilt tree. Dropping the control drops pending deferred work.
pub struct AmountInput {
    id: ControlId,
    config: AmountInputConfig,
    host: Option<Rc<dyn AmountInputHost>>,
    event_sink: Rc<dyn AmountInputEventSink>,
    field: AmountField,
    sign: SignState,
    currencies: CurrencySelection,
    exchange: ExchangeLink,
    content_description: Option<String>,
    focused: Option<DescendantId>,
    deferred: VecDeque<DeferredTask>,
}

impl AmountInput {
    pub fn new(id: ControlId, config: AmountInputConfig) -> Self {
        let mode = if config.with_type_switch {
            SignMode::Enabled
        } else {
            SignMode::Disabled
        };
        Self {
            id,
            field: AmountField::new(config.fraction_digits),
            sign: SignState::new(mode, config.default_positive),
            currencies: CurrencySelection::new(),
            exchange: ExchangeLink::new(config.with_exchange_rate),
            config,
            host: None,
            event_sink: Rc::new(NoOpEventSink),
            content_description: None,
            focused: None,
            deferred: VecDeque::new(),
        }
    }

    /// Injects the host capabilities.
    pub fn with_host(mut self, host: Rc<dyn AmountInputHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the event sink for this control.
    pub fn with_event_sink(mut self, event_sink: Rc<dyn AmountInputEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn config(&self) -> &AmountInputConfig {
        &self.config
    }

    fn host(&self, capability: &'static str) -> Result<Rc<dyn AmountInputHost>> {
        self.host.clone().ok_or_else(|| {
            log::error!(
                "Amount input {:?} needs host capability '{}' but no host was provided",
                self.id,
                capability
            );
            Error::MissingHostCapability(capability)
        })
    }

    // ---------------------------------------------------------------------
    // Amount
    // ---------------------------------------------------------------------

    /// Text edit from the user or the host. Runs the compound output before
    /// returning.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.field.set_raw_text(text);
        self.after_text_changed();
    }

    pub fn clear(&mut self) {
        self.field.clear();
        self.after_text_changed();
    }

    /// Writes `amount` as the displayed magnitude. With `update_type` the
    /// toggle follows the sign of `amount` (zero counts as positive).
    pub fn set_amount(&mut self, amount: Decimal, update_type: bool) {
        self.field.set_magnitude(amount);
        self.after_text_changed();
        if update_type {
            self.set_type(amount.is_zero() || amount.is_sign_positive());
        }
    }

    fn after_text_changed(&mut self) {
        self.emit_amount_text_changed();
        self.exchange.on_amount_changed(&self.field);
    }

    /// The compound output for a rewrite by the exchange link has already
    /// run inside the link, so only the event is left to send.
    fn after_exchange_write(&self, amount_written: bool) {
        if amount_written {
            self.emit_amount_text_changed();
        }
    }

    fn emit_amount_text_changed(&self) {
        self.event_sink.emit(AmountInputEvent::amount_text_changed(
            self.id,
            self.field.raw_text(),
        ));
    }

    pub fn amount_text(&self) -> &str {
        self.field.raw_text()
    }

    pub fn validate(&mut self, surface_error: bool) -> Option<Decimal> {
        self.field.validate(surface_error)
    }

    /// The validated magnitude with the current sign applied.
    pub fn typed_value(
        &mut self,
        if_absent_return_zero: bool,
        surface_error: bool,
    ) -> Option<Decimal> {
        match self.field.validate(surface_error) {
            None if if_absent_return_zero => Some(Decimal::ZERO),
            None => None,
            Some(magnitude) if self.sign.is_positive() => Some(magnitude),
            Some(magnitude) => Some(-magnitude),
        }
    }

    pub fn typed_value_or_zero(&mut self) -> Decimal {
        self.typed_value(true, false).unwrap_or(Decimal::ZERO)
    }

    pub fn field_error(&self) -> Option<&FieldError> {
        self.field.error()
    }

    pub fn set_error(&mut self, error: Option<FieldError>) {
        self.field.set_error(error);
    }

    pub fn fraction_digits(&self) -> u32 {
        self.field.fraction_digits()
    }

    pub fn set_fraction_digits(&mut self, fraction_digits: u32) {
        self.field.set_fraction_digits(fraction_digits);
    }

    // ---------------------------------------------------------------------
    // Sign
    // ---------------------------------------------------------------------

    pub fn set_type(&mut self, positive: bool) {
        if self.sign.set_type(positive) {
            self.on_type_changed();
        }
    }

    pub fn toggle(&mut self) {
        self.sign.toggle();
        self.on_type_changed();
    }

    /// Click on the debit/credit toggle. Ignored while the toggle is hidden
    /// or made read-only.
    pub fn on_type_button_clicked(&mut self) {
        if self.sign.is_user_editable() {
            self.toggle();
        } else {
            log::debug!("Type toggle of {:?} is not editable, ignoring click", self.id);
        }
    }

    fn on_type_changed(&mut self) {
        if !self.sign.notifies() {
            return;
        }
        let positive = self.sign.checked();
        self.event_sink.emit_batch(vec![
            AmountInputEvent::description_refresh(self.id, ControlPart::TypeButton),
            AmountInputEvent::type_changed(self.id, positive),
        ]);
    }

    /// True for credit. Always true when the type switch is off.
    pub fn is_positive(&self) -> bool {
        self.sign.is_positive()
    }

    pub fn set_with_type_switch(&mut self, enabled: bool) {
        self.sign.set_mode(if enabled {
            SignMode::Enabled
        } else {
            SignMode::Disabled
        });
    }

    pub fn set_type_enabled(&mut self, enabled: bool) {
        self.sign.set_user_editable(enabled);
    }

    // ---------------------------------------------------------------------
    // Currency selection
    // ---------------------------------------------------------------------

    /// Appends dropdown entries. Populating an empty list selects the first
    /// entry, which notifies the host like a user selection.
    pub fn add_currencies(&mut self, options: Vec<CurrencyOption>) -> Result<()> {
        if !self.config.with_currency_selection {
            log::warn!(
                "Amount input {:?} has no currency selection, ignoring {} currencies",
                self.id,
                options.len()
            );
            return Ok(());
        }
        if self.currencies.append(options) {
            self.apply_selection(0, true)?;
        }
        Ok(())
    }

    /// Selects the entry at `index`: updates precision and pairing, then
    /// notifies the host. Ignored while selection is disabled.
    pub fn select_currency(&mut self, index: usize) -> Result<()> {
        if !self.config.with_currency_selection {
            log::warn!("Amount input {:?} has no currency selection", self.id);
            return Ok(());
        }
        if self.currencies.is_frozen() {
            log::debug!("Currency selection of {:?} is disabled, ignoring", self.id);
            return Ok(());
        }
        self.apply_selection(index, true)
    }

    /// Selects the entry matching `unit`'s code. Without a matching entry,
    /// or on a control without currency selection, only precision and
    /// pairing are taken from `unit`.
    pub fn set_selected_currency(&mut self, unit: &CurrencyUnit) -> Result<()> {
        if self.currencies.is_frozen() {
            log::debug!("Currency selection of {:?} is disabled, ignoring", self.id);
            return Ok(());
        }
        match self.currencies.position_of(&unit.code) {
            Some(index) if self.config.with_currency_selection => {
                self.apply_selection(index, true)
            }
            _ => {
                if self.config.with_currency_selection {
                    log::warn!(
                        "Currency {} is not offered by {:?}, configuring without selecting",
                        unit.code,
                        self.id
                    );
                }
                self.configure_currency(unit.clone());
                Ok(())
            }
        }
    }

    fn apply_selection(&mut self, index: usize, notify: bool) -> Result<()> {
        let option = self
            .currencies
            .options()
            .get(index)
            .cloned()
            .ok_or(Error::CurrencyIndexOutOfRange {
                index,
                len: self.currencies.len(),
            })?;
        let unit = self.lookup_currency(&option.code)?;
        self.currencies.set_selected(index)?;
        self.configure_currency(unit.clone());
        if notify {
            self.host("on_currency_selection_changed")?
                .on_currency_selection_changed(&unit);
        }
        Ok(())
    }

    fn lookup_currency(&self, code: &str) -> Result<CurrencyUnit> {
        self.host("lookup_currency")?
            .lookup_currency(code)
            .ok_or_else(|| Error::UnsupportedCurrency(code.to_string()))
    }

    fn configure_currency(&mut self, unit: CurrencyUnit) {
        self.field.set_fraction_digits(unit.fraction_digits);
        self.exchange.set_pairing(Some(unit), None);
    }

    pub fn selected_currency(&self) -> Option<&CurrencyOption> {
        self.currencies.selected()
    }

    pub fn selected_currency_index(&self) -> Option<usize> {
        self.currencies.selected_index()
    }

    pub fn currency_options(&self) -> &[CurrencyOption] {
        self.currencies.options()
    }

    /// Freezes the current selection. Precision and pairing are kept.
    pub fn disable_currency_selection(&mut self) {
        self.currencies.freeze();
    }

    pub fn is_currency_selection_enabled(&self) -> bool {
        self.config.with_currency_selection && !self.currencies.is_frozen()
    }

    // ---------------------------------------------------------------------
    // Exchange rate
    // ---------------------------------------------------------------------

    /// Programmatic rate update. Setting the current rate again is a no-op.
    pub fn set_exchange_rate(&mut self, rate: Option<Decimal>) {
        let written = self.exchange.set_rate(rate, &mut self.field);
        self.after_exchange_write(written.unwrap_or(false));
    }

    /// Rate converting the primary currency into the home currency.
    pub fn exchange_rate(&self) -> Option<Decimal> {
        self.exchange.rate()
    }

    pub fn exchange_rate_for(&self, inverse: bool) -> Option<Decimal> {
        self.exchange.rate_for(inverse)
    }

    /// User edit of the rate text, read in the presented direction.
    pub fn on_rate_text_changed(&mut self, text: &str) {
        let written = self.exchange.on_rate_text_changed(text, &mut self.field);
        self.after_exchange_write(written.unwrap_or(false));
    }

    pub fn set_rate_inverse(&mut self, inverse: bool) {
        self.exchange.set_inverse(inverse);
    }

    pub fn is_rate_inverse(&self) -> bool {
        self.exchange.is_inverse()
    }

    pub fn disable_exchange_rate_edit(&mut self) {
        self.exchange.set_editable(false);
    }

    pub fn is_exchange_rate_editable(&self) -> bool {
        self.exchange.is_editable()
    }

    pub fn configure_exchange(&mut self, primary: Option<CurrencyUnit>, home: Option<CurrencyUnit>) {
        self.exchange.set_pairing(primary, home);
    }

    /// Sets the home currency of the pairing, taking the primary currency
    /// from the current selection. No-op without currency selection.
    pub fn configure_exchange_home(&mut self, home: Option<CurrencyUnit>) -> Result<()> {
        if !self.config.with_currency_selection {
            return Ok(());
        }
        let primary = match self.currencies.selected() {
            Some(option) => Some(self.lookup_currency(&option.code)?),
            None => None,
        };
        self.exchange.set_pairing(primary, home);
        Ok(())
    }

    pub fn pairing(&self) -> &CurrencyPairing {
        self.exchange.pairing()
    }

    /// Subscribes to `amount × rate`. Discards a pending compound input.
    pub fn set_compound_result_listener(&mut self, listener: CompoundResultListener) {
        self.exchange.set_output_subscription(listener);
    }

    /// Converts `value` by the rate and displays it as the amount, now and
    /// on every later rate change. The sign is left untouched.
    pub fn set_compound_result_input(&mut self, value: Decimal) {
        let written = self.exchange.set_pending_input(value, &mut self.field);
        self.after_exchange_write(written);
    }

    pub fn compound_result_input(&self) -> Option<Decimal> {
        self.exchange.pending_input()
    }

    // ---------------------------------------------------------------------
    // Calculator, focus, accessibility, layout
    // ---------------------------------------------------------------------

    pub fn on_calculator_clicked(&mut self) -> Result<()> {
        let host = self.host("show_calculator")?;
        let amount = self.field.validate(false);
        host.show_calculator(amount, self.id);
        Ok(())
    }

    pub fn set_focused_descendant(&mut self, descendant: Option<DescendantId>) {
        self.focused = descendant;
    }

    pub fn focused_descendant(&self) -> Option<DescendantId> {
        self.focused
    }

    /// Sets the label the part descriptions derive from and asks the host to
    /// refresh them.
    pub fn set_content_description(&mut self, description: impl Into<String>) {
        self.content_description = Some(description.into());
        let events = [
            ControlPart::Calculator,
            ControlPart::CurrencySelector,
            ControlPart::TypeButton,
        ]
        .into_iter()
        .map(|part| AmountInputEvent::description_refresh(self.id, part))
        .collect();
        self.event_sink.emit_batch(events);
    }

    pub fn content_description(&self) -> Option<&str> {
        self.content_description.as_deref()
    }

    pub fn layout(&self) -> LayoutVariant {
        self.config.layout
    }

    pub fn is_part_visible(&self, part: ControlPart) -> bool {
        match part {
            ControlPart::TypeButton => self.sign.mode() == SignMode::Enabled,
            ControlPart::AmountText | ControlPart::Calculator => true,
            ControlPart::CurrencySelector => self.config.with_currency_selection,
            ControlPart::ExchangeRate => self.config.with_exchange_rate,
        }
    }

    /// Visible parts in the reading order of the configured layout.
    pub fn visible_parts(&self) -> Vec<ControlPart> {
        self.config
            .layout
            .parts_in_order()
            .into_iter()
            .filter(|part| self.is_part_visible(*part))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn snapshot(&self) -> PersistedState {
        PersistedState::new(
            self.sign.checked(),
            self.field.raw_text(),
            self.currencies.selected_index(),
            self.exchange.rate(),
            self.focused,
        )
    }

    /// Applies a snapshot to a freshly built control.
    ///
    /// Order: sign, raw text, currency index, rate. No type-changed event,
    /// no validation error and no currency notification is produced. The
    /// rate goes through the restoring path, so the output listener sees the
    /// restored amount once. Focus is queued for [`Self::dispatch_deferred`].
    pub fn restore(&mut self, state: &PersistedState) -> Result<()> {
        log::debug!("Restoring amount input {:?}", self.id);

        if self.sign.set_type(state.sign_flag) && self.sign.notifies() {
            self.event_sink.emit(AmountInputEvent::description_refresh(
                self.id,
                ControlPart::TypeButton,
            ));
        }

        self.field.restore_raw_text(state.raw_amount_text.clone());

        if let Some(index) = state.currency_selection_index {
            if !self.config.with_currency_selection {
                log::warn!("Snapshot carries a currency index but {:?} has no selection", self.id);
            } else if index >= self.currencies.len() {
                log::warn!(
                    "Snapshot currency index {} is out of range for {:?} ({} currencies), skipping",
                    index,
                    self.id,
                    self.currencies.len()
                );
            } else {
                self.apply_selection(index, false)?;
            }
        }

        // a rewrite from a pending input stays silent here
        self.exchange
            .on_rate_changed(state.exchange_rate, &mut self.field, true);

        if let Some(descendant) = state.focused_descendant_id {
            self.deferred.push_back(DeferredTask::RestoreFocus(descendant));
        }
        Ok(())
    }

    /// Snapshot encoded with the versioned JSON codec.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(self.snapshot().to_json()?)
    }

    /// Decodes a snapshot produced by [`Self::snapshot_json`] and restores it.
    pub fn restore_json(&mut self, json: &str) -> Result<()> {
        let state = PersistedState::from_json(json)?;
        self.restore(&state)
    }

    pub fn has_deferred_tasks(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Runs work queued by [`Self::restore`]. The host calls this on the
    /// event-loop turn after layout. Returns the number of tasks run.
    ///
    /// A task whose capability is missing stays queued, so a later call
    /// with a host attached still delivers it.
    pub fn dispatch_deferred(&mut self) -> Result<usize> {
        let mut dispatched = 0;
        while let Some(task) = self.deferred.front().copied() {
            match task {
                DeferredTask::RestoreFocus(descendant) => {
                    self.host("request_focus_after_restore")?
                        .request_focus_after_restore(self.id, descendant);
                }
            }
            self.deferred.pop_front();
            dispatched += 1;
        }
        Ok(dispatched)
    }
}

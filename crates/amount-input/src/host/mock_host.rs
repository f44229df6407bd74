use std::cell::RefCell;
use std::collections::HashMap;

use rust_decimal::Decimal;

use super::host_traits::AmountInputHost;
use crate::control::{ControlId, DescendantId};
use crate::currency::CurrencyUnit;

/// Mock host for testing - serves a fixed catalog and records every call.
#[derive(Default)]
pub struct MockAmountInputHost {
    catalog: HashMap<String, CurrencyUnit>,
    calculator_requests: RefCell<Vec<(Option<Decimal>, ControlId)>>,
    currency_changes: RefCell<Vec<CurrencyUnit>>,
    focus_requests: RefCell<Vec<(ControlId, DescendantId)>>,
}

impl MockAmountInputHost {
    pub fn new(units: impl IntoIterator<Item = CurrencyUnit>) -> Self {
        Self {
            catalog: units
                .into_iter()
                .map(|unit| (unit.code.clone(), unit))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calculator_requests(&self) -> Vec<(Option<Decimal>, ControlId)> {
        self.calculator_requests.borrow().clone()
    }

    pub fn currency_changes(&self) -> Vec<CurrencyUnit> {
        self.currency_changes.borrow().clone()
    }

    pub fn focus_requests(&self) -> Vec<(ControlId, DescendantId)> {
        self.focus_requests.borrow().clone()
    }

    /// Clears recorded calls; the catalog is kept.
    pub fn clear(&self) {
        self.calculator_requests.borrow_mut().clear();
        self.currency_changes.borrow_mut().clear();
        self.focus_requests.borrow_mut().clear();
    }
}

impl AmountInputHost for MockAmountInputHost {
    fn show_calculator(&self, amount: Option<Decimal>, control_id: ControlId) {
        self.calculator_requests
            .borrow_mut()
            .push((amount, control_id));
    }

    fn on_currency_selection_changed(&self, unit: &CurrencyUnit) {
        self.currency_changes.borrow_mut().push(unit.clone());
    }

    fn request_focus_after_restore(&self, control_id: ControlId, descendant_id: DescendantId) {
        self.focus_requests
            .borrow_mut()
            .push((control_id, descendant_id));
    }

    fn lookup_currency(&self, code: &str) -> Option<CurrencyUnit> {
        self.catalog.get(code).cloned()
    }
}

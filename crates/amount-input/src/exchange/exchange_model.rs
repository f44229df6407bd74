use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyUnit;

/// The two currencies an exchange rate relates.
///
/// The stored rate always converts `primary` into `home`. The inverse flag
/// only decides which direction is presented to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPairing {
    pub primary: Option<CurrencyUnit>,
    pub home: Option<CurrencyUnit>,
}

impl CurrencyPairing {
    pub fn new(primary: Option<CurrencyUnit>, home: Option<CurrencyUnit>) -> Self {
        Self { primary, home }
    }

    /// Currency codes in presentation order: `(from, to)`.
    pub fn presented_codes(&self, inverse: bool) -> (Option<&str>, Option<&str>) {
        let primary = self.primary.as_ref().map(|unit| unit.code.as_str());
        let home = self.home.as_ref().map(|unit| unit.code.as_str());
        if inverse {
            (home, primary)
        } else {
            (primary, home)
        }
    }
}

/// Drops rates that are zero or negative.
pub fn sanitize_rate(rate: Option<Decimal>) -> Option<Decimal> {
    match rate {
        Some(value) if value > Decimal::ZERO => Some(value),
        Some(value) => {
            log::debug!("Ignoring non-positive exchange rate {}", value);
            None
        }
        None => None,
    }
}

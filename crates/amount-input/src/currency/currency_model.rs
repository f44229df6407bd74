use serde::{Deserialize, Serialize};

/// A currency as resolved by the host catalog.
///
/// Owned by the host; the control only keeps read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyUnit {
    pub code: String,
    pub fraction_digits: u32,
}

impl CurrencyUnit {
    pub fn new(code: impl Into<String>, fraction_digits: u32) -> Self {
        Self {
            code: code.into(),
            fraction_digits,
        }
    }
}

/// An entry of the currency dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    pub code: String,
    pub display_name: String,
}

impl CurrencyOption {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<&CurrencyUnit> for CurrencyOption {
    fn from(unit: &CurrencyUnit) -> Self {
        Self::new(unit.code.clone(), unit.code.clone())
    }
}

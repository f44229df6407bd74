//! Construction-time configuration of the amount input.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FRACTION_DIGITS, MAX_FRACTION_DIGITS};
use crate::control::ControlPart;
use crate::errors::{Error, Result};

/// Visual arrangement of the parts. Cosmetic only: the engine behaves the
/// same for both variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutVariant {
    /// Toggle, amount, calculator, currency on one row, rate below.
    #[default]
    Standard,
    /// Currency leads, toggle trails; used in narrow split forms.
    Alternate,
}

impl LayoutVariant {
    /// Parts in reading order for this variant.
    pub fn parts_in_order(self) -> [ControlPart; 5] {
        match self {
            LayoutVariant::Standard => [
                ControlPart::TypeButton,
                ControlPart::AmountText,
                ControlPart::Calculator,
                ControlPart::CurrencySelector,
                ControlPart::ExchangeRate,
            ],
            LayoutVariant::Alternate => [
                ControlPart::CurrencySelector,
                ControlPart::AmountText,
                ControlPart::Calculator,
                ControlPart::TypeButton,
                ControlPart::ExchangeRate,
            ],
        }
    }
}

/// Flags fixed when the control is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmountInputConfig {
    pub with_currency_selection: bool,
    pub with_exchange_rate: bool,
    pub with_type_switch: bool,
    pub layout: LayoutVariant,
    /// Precision used until a currency is configured.
    pub fraction_digits: u32,
    /// Initial state of the debit/credit toggle.
    pub default_positive: bool,
}

impl Default for AmountInputConfig {
    fn default() -> Self {
        Self {
            with_currency_selection: false,
            with_exchange_rate: false,
            with_type_switch: true,
            layout: LayoutVariant::Standard,
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            default_positive: false,
        }
    }
}

impl AmountInputConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfigValue(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(Error::InvalidConfigValue(format!(
                "fractionDigits must be at most {}, got {}",
                MAX_FRACTION_DIGITS, self.fraction_digits
            )));
        }
        Ok(())
    }

    pub fn with_currency_selection(mut self, enabled: bool) -> Self {
        self.with_currency_selection = enabled;
        self
    }

    pub fn with_exchange_rate(mut self, enabled: bool) -> Self {
        self.with_exchange_rate = enabled;
        self
    }

    pub fn with_type_switch(mut self, enabled: bool) -> Self {
        self.with_type_switch = enabled;
        self
    }

    pub fn with_layout(mut self, layout: LayoutVariant) -> Self {
        self.layout = layout;
        self
    }
}

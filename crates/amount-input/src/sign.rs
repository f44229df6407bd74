//! Debit/credit toggle of the amount input.

use serde::{Deserialize, Serialize};

/// Whether the user can pick the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignMode {
    /// The toggle is shown and decides the sign.
    Enabled,
    /// The toggle is hidden and the value is always positive.
    Disabled,
}

/// Sign of the amount, carried out-of-band from the non-negative magnitude.
///
/// The checked flag is kept even in [`SignMode::Disabled`] because it is
/// part of the persisted state; only [`SignState::is_positive`] honours the
/// mode.
#[derive(Debug, Clone)]
pub struct SignState {
    checked: bool,
    mode: SignMode,
    user_editable: bool,
}

impl SignState {
    pub fn new(mode: SignMode, positive: bool) -> Self {
        Self {
            checked: positive,
            mode,
            user_editable: true,
        }
    }

    pub fn mode(&self) -> SignMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SignMode) {
        self.mode = mode;
    }

    /// Raw toggle state, independent of the mode.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Sets the flag. Returns true when it actually changed.
    pub fn set_type(&mut self, positive: bool) -> bool {
        let changed = self.checked != positive;
        self.checked = positive;
        changed
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }

    pub fn is_positive(&self) -> bool {
        self.mode == SignMode::Disabled || self.checked
    }

    /// Whether change notifications are delivered for this state.
    pub fn notifies(&self) -> bool {
        self.mode == SignMode::Enabled
    }

    pub fn is_user_editable(&self) -> bool {
        self.mode == SignMode::Enabled && self.user_editable
    }

    pub fn set_user_editable(&mut self, editable: bool) {
        self.user_editable = editable;
    }
}

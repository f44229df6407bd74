use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::persistence_errors::PersistenceError;
use crate::constants::PERSISTED_STATE_VERSION;
use crate::control::DescendantId;

/// Snapshot of an amount input taken before the widget tree is torn down.
///
/// Field order is part of the format and must not change. New fields go at
/// the end with a serde default so older snapshots stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub schema_version: u32,
    /// Raw toggle state, kept even when the type switch is hidden.
    pub sign_flag: bool,
    /// Text exactly as typed, possibly incomplete.
    #[serde(default)]
    pub raw_amount_text: String,
    #[serde(default)]
    pub currency_selection_index: Option<usize>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exchange_rate: Option<Decimal>,
    /// Descendant that held focus; `None` when focus was elsewhere.
    #[serde(default)]
    pub focused_descendant_id: Option<DescendantId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    schema_version: u32,
}

impl PersistedState {
    pub fn new(
        sign_flag: bool,
        raw_amount_text: impl Into<String>,
        currency_selection_index: Option<usize>,
        exchange_rate: Option<Decimal>,
        focused_descendant_id: Option<DescendantId>,
    ) -> Self {
        Self {
            schema_version: PERSISTED_STATE_VERSION,
            sign_flag,
            raw_amount_text: raw_amount_text.into(),
            currency_selection_index,
            exchange_rate,
            focused_descendant_id,
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Encode)
    }

    /// Deserialize from JSON string, rejecting snapshots written by a newer
    /// format version.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let probe: VersionProbe = serde_json::from_str(json).map_err(PersistenceError::Decode)?;
        if probe.schema_version > PERSISTED_STATE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: probe.schema_version,
                supported: PERSISTED_STATE_VERSION,
            });
        }
        serde_json::from_str(json).map_err(PersistenceError::Decode)
    }
}

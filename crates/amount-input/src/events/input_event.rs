//! Control event types.

use serde::{Deserialize, Serialize};

use crate::control::{ControlId, ControlPart};

/// Events emitted by the amount input after a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmountInputEvent {
    /// The debit/credit toggle changed.
    TypeChanged { control_id: ControlId, positive: bool },

    /// The accessibility description of a part must be recomputed.
    DescriptionRefresh {
        control_id: ControlId,
        part: ControlPart,
    },

    /// The amount text changed through an edit or a programmatic write.
    AmountTextChanged { control_id: ControlId, text: String },
}

impl AmountInputEvent {
    /// Creates a TypeChanged event.
    pub fn type_changed(control_id: ControlId, positive: bool) -> Self {
        Self::TypeChanged {
            control_id,
            positive,
        }
    }

    /// Creates a DescriptionRefresh event.
    pub fn description_refresh(control_id: ControlId, part: ControlPart) -> Self {
        Self::DescriptionRefresh { control_id, part }
    }

    /// Creates an AmountTextChanged event.
    pub fn amount_text_changed(control_id: ControlId, text: impl Into<String>) -> Self {
        Self::AmountTextChanged {
            control_id,
            text: text.into(),
        }
    }

    pub fn control_id(&self) -> ControlId {
        match self {
            Self::TypeChanged { control_id, .. }
            | Self::DescriptionRefresh { control_id, .. }
            | Self::AmountTextChanged { control_id, .. } => *control_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = AmountInputEvent::type_changed(ControlId(7), true);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "type_changed");
        assert_eq!(json["positive"], true);
        assert_eq!(event.control_id(), ControlId(7));
    }
}

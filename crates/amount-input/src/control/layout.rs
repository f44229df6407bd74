use serde::{Deserialize, Serialize};

/// Identifier the host assigned to an amount input instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(pub u32);

/// Stable identifier of a part inside one amount input. Stable across
/// layout variants and rebuilds, so it can be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescendantId(pub u32);

/// The parts a host renders for an amount input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPart {
    TypeButton,
    AmountText,
    Calculator,
    CurrencySelector,
    ExchangeRate,
}

impl ControlPart {
    pub const ALL: [ControlPart; 5] = [
        ControlPart::TypeButton,
        ControlPart::AmountText,
        ControlPart::Calculator,
        ControlPart::CurrencySelector,
        ControlPart::ExchangeRate,
    ];

    pub fn descendant_id(self) -> DescendantId {
        match self {
            ControlPart::TypeButton => DescendantId(1),
            ControlPart::AmountText => DescendantId(2),
            ControlPart::Calculator => DescendantId(3),
            ControlPart::CurrencySelector => DescendantId(4),
            ControlPart::ExchangeRate => DescendantId(5),
        }
    }

    pub fn from_descendant_id(id: DescendantId) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.descendant_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendant_ids_round_trip() {
        for part in ControlPart::ALL {
            assert_eq!(ControlPart::from_descendant_id(part.descendant_id()), Some(part));
        }
        assert_eq!(ControlPart::from_descendant_id(DescendantId(0)), None);
    }
}

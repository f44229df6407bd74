use super::currency_model::CurrencyOption;
use crate::errors::{Error, Result};

/// Ordered, append-only list of selectable currencies and the selection.
///
/// This type only tracks positions. Resolving the selected entry into a
/// [`CurrencyUnit`](super::CurrencyUnit) and reconfiguring precision is done
/// by the control, which has access to the host catalog.
#[derive(Debug, Clone, Default)]
pub struct CurrencySelection {
    options: Vec<CurrencyOption>,
    selected: Option<usize>,
    frozen: bool,
}

impl CurrencySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[CurrencyOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Appends entries. Returns true when the list was empty before.
    pub fn append(&mut self, options: impl IntoIterator<Item = CurrencyOption>) -> bool {
        let was_empty = self.options.is_empty();
        self.options.extend(options);
        was_empty && !self.options.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&CurrencyOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    pub fn position_of(&self, code: &str) -> Option<usize> {
        self.options.iter().position(|option| option.code == code)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stops further selection changes. The current selection is kept.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Moves the selection, bypassing the freeze. Used by user selection
    /// after the freeze check and by state restoration.
    pub fn set_selected(&mut self, index: usize) -> Result<&CurrencyOption> {
        let len = self.options.len();
        match self.options.get(index) {
            Some(option) => {
                self.selected = Some(index);
                Ok(option)
            }
            None => Err(Error::CurrencyIndexOutOfRange { index, len }),
        }
    }
}

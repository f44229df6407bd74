use rust_decimal::Decimal;

use super::amount_model::FieldError;
use super::amount_parser::{format_magnitude, parse_detailed};
use crate::constants::{DEFAULT_FRACTION_DIGITS, MAX_FRACTION_DIGITS};

/// The amount text field as seen by the engine: raw text, the precision of
/// the active currency and the currently displayed error.
///
/// The magnitude is never stored in parsed form. It is derived from the raw
/// text on demand so that a partially typed value survives a rebuild as-is.
#[derive(Debug, Clone)]
pub struct AmountField {
    raw_text: String,
    fraction_digits: u32,
    error: Option<FieldError>,
}

impl Default for AmountField {
    fn default() -> Self {
        Self::new(DEFAULT_FRACTION_DIGITS)
    }
}

impl AmountField {
    pub fn new(fraction_digits: u32) -> Self {
        Self {
            raw_text: String::new(),
            fraction_digits: fraction_digits.min(MAX_FRACTION_DIGITS),
            error: None,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Replaces the text as a keystroke would. Editing clears a shown error.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.error = None;
    }

    /// Puts back text captured in a snapshot without running validation,
    /// so an incomplete value does not come back with an error attached.
    pub(crate) fn restore_raw_text(&mut self, text: String) {
        self.raw_text = text;
        self.error = None;
    }

    /// Overwrites the displayed magnitude, formatted to the field precision.
    pub fn set_magnitude(&mut self, value: Decimal) {
        self.raw_text = format_magnitude(value, self.fraction_digits);
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.raw_text.clear();
        self.error = None;
    }

    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    pub fn set_fraction_digits(&mut self, fraction_digits: u32) {
        if fraction_digits > MAX_FRACTION_DIGITS {
            log::warn!(
                "Fraction digits {} exceed the supported maximum, clamping to {}",
                fraction_digits,
                MAX_FRACTION_DIGITS
            );
        }
        self.fraction_digits = fraction_digits.min(MAX_FRACTION_DIGITS);
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: Option<FieldError>) {
        self.error = error;
    }

    /// Parses the current text without touching the displayed error.
    pub fn peek(&self) -> Option<Decimal> {
        parse_detailed(&self.raw_text, self.fraction_digits).ok()
    }

    /// Parses the current text. On failure the error is shown only when
    /// `surface_error` is set; otherwise any earlier error is cleared.
    pub fn validate(&mut self, surface_error: bool) -> Option<Decimal> {
        match parse_detailed(&self.raw_text, self.fraction_digits) {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(error) => {
                self.error = if surface_error { Some(error) } else { None };
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_surfaces_error_only_when_asked() {
        let mut field = AmountField::default();
        field.set_raw_text("abc");

        assert_eq!(field.validate(true), None);
        assert_eq!(field.error(), Some(&FieldError::InvalidNumber));

        assert_eq!(field.validate(false), None);
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_validate_empty_text_reports_required() {
        let mut field = AmountField::default();
        assert_eq!(field.validate(true), None);
        assert_eq!(field.error(), Some(&FieldError::Required));
    }

    #[test]
    fn test_successful_validation_clears_error() {
        let mut field = AmountField::default();
        field.set_raw_text("10");
        field.set_error(Some(FieldError::Custom("Too large".to_string())));

        assert_eq!(field.validate(true), Some(dec!(10)));
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_precision_follows_fraction_digits() {
        let mut field = AmountField::new(2);
        field.set_raw_text("12.99");
        assert_eq!(field.peek(), Some(dec!(12.99)));

        field.set_fraction_digits(0);
        assert_eq!(field.peek(), Some(dec!(13)));
        // raw text is kept as typed
        assert_eq!(field.raw_text(), "12.99");
    }

    #[test]
    fn test_set_magnitude_drops_sign_and_formats() {
        let mut field = AmountField::new(2);
        field.set_magnitude(dec!(-120));
        assert_eq!(field.raw_text(), "120.00");
        assert_eq!(field.peek(), Some(dec!(120)));
    }

    #[test]
    fn test_fraction_digits_are_clamped() {
        let mut field = AmountField::new(2);
        field.set_fraction_digits(40);
        assert_eq!(field.fraction_digits(), MAX_FRACTION_DIGITS);
    }
}

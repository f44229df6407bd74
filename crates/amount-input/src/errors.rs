//! Error types for the amount input engine.
//!
//! Parse and precision problems never surface here: they stay inside the
//! amount field as an absent value or a [`FieldError`](crate::FieldError).
//! What remains are integration defects on the host side and codec failures.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the amount input engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The control was asked to use a host capability but no host was injected.
    #[error("Host does not provide the '{0}' capability")]
    MissingHostCapability(&'static str),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Currency index {index} is out of range ({len} currencies available)")]
    CurrencyIndexOutOfRange { index: usize, len: usize },

    #[error("Persisted state error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// Returns true for errors that indicate a host integration defect.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MissingHostCapability(_))
    }
}

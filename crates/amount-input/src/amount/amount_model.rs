use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-visible error attached to the amount text field.
///
/// These never propagate as failures; the field keeps at most one of them
/// and the host decides how to render it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldError {
    #[error("Amount is required")]
    Required,

    #[error("Invalid number format")]
    InvalidNumber,

    /// Message supplied by the host, e.g. a form-level constraint.
    #[error("{0}")]
    Custom(String),
}

//! Error taxonomy and backend error-message extraction.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Admin privileges required")]
    Unauthorized,

    #[error("Please select at least one image")]
    MissingImages,

    #[error("Please enter a valid price")]
    InvalidPrice,

    #[error("Discount must be a percentage between 0 and 100")]
    InvalidDiscount,

    #[error("Please choose a category")]
    MissingCategory,

    #[error("Maximum {max} images allowed total, got {total}")]
    TooManyImages { total: usize, max: usize },

    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Opaque failure payload returned by a remote collaborator.
///
/// Backends answer in whatever shape they like: a bare string, an object with
/// a `message` or `error_description` field, or a nested error object. The
/// payload is kept as raw JSON and flattened with [`error_message`] only when
/// it is shown to the operator.
#[derive(Debug, Clone)]
pub struct BackendError(pub Value);

impl BackendError {
    pub fn from_message(msg: impl Into<String>) -> Self {
        Self(Value::String(msg.into()))
    }
}

impl From<BackendError> for StorefrontError {
    fn from(err: BackendError) -> Self {
        Self::Backend(error_message(&err.0))
    }
}

/// Flattens an arbitrary collaborator error payload into a human-readable
/// message. Fixed priority: bare string, `message` field, `error_description`
/// field, nested `error.message`, JSON dump of the payload, generic fallback.
pub fn error_message(err: &Value) -> String {
    if let Value::String(s) = err {
        return s.clone();
    }
    if let Some(msg) = err.get("message").and_then(Value::as_str) {
        return msg.to_string();
    }
    if let Some(msg) = err.get("error_description").and_then(Value::as_str) {
        return msg.to_string();
    }
    if let Some(msg) = err
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return msg.to_string();
    }
    if err.is_object() || err.is_array() {
        if let Ok(json) = serde_json::to_string(err) {
            if json != "{}" && json != "[]" {
                return format!("Error: {json}");
            }
        }
    }
    "Operation failed with an unexpected error.".to_string()
}

//! The two card tools offered to the model and the registry that dispatches on their names.

pub mod author;
pub mod book;
pub mod registry;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::ClassifyError;

/// Deserialises arguments that already passed schema normalisation; anything
/// that still does not fit the record fails here as a validation error.
fn from_validated<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ClassifyError> {
    serde_json::from_value(args).map_err(|e| ClassifyError::Validation {
        tool: tool.to_string(),
        field: "$".to_string(),
        reason: e.to_string(),
    })
}

pub mod client;
pub mod error;
pub mod model;

pub use client::HbnbApi;
pub use error::HbnbError;
pub use model::*;

use serde::de::DeserializeOwned;

/// Decode caller-supplied JSON into a contract input type.
///
/// All input types deny unknown fields, so a misspelled or read-only key
/// (`id`, `created_at`, ...) is a validation error rather than a silent no-op.
pub fn decode_input<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, HbnbError> {
    serde_json::from_value(value).map_err(|e| HbnbError::validation(e.to_string()))
}

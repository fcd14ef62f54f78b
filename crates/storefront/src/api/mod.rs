//! # API Layer
//!
//! Typed wrappers around the backend endpoints. Each wrapper owns a shared
//! `Arc<dyn Transport>` and turns JSON bodies into model types; none of them touch
//! client state. Slices call these inside tracked operations.
//!
//! Some endpoints answer with a bare body, others wrap it in the
//! `{success, message, data}` envelope. [`decode`] accepts both.

pub mod auth_api;
pub mod cart_api;
pub mod order_api;
pub mod product_api;
pub mod resource_api;
pub mod user_api;

pub use auth_api::AuthApi;
pub use cart_api::CartApi;
pub use order_api::OrderApi;
pub use product_api::ProductApi;
pub use resource_api::ResourceApi;
pub use user_api::UserApi;

use serde::de::DeserializeOwned;
use serde_json::Value;
use store_framework::ApiError;

/// Strips the `{success, data}` envelope when present.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("success") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decodes a response body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(unwrap_envelope(value)).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes one entity that may arrive bare or nested under `key` (e.g. `{user: {...}}`).
pub(crate) fn decode_entity<T: DeserializeOwned>(value: Value, key: &str) -> Result<T, ApiError> {
    match unwrap_envelope(value) {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_object) => {
            decode(map.remove(key).unwrap_or(Value::Null))
        }
        other => decode(other),
    }
}

/// Decodes a list that may arrive as a bare array or nested under `key`.
pub(crate) fn decode_list<T: DeserializeOwned>(
    value: Value,
    key: &str,
) -> Result<Vec<T>, ApiError> {
    match unwrap_envelope(value) {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_array) => {
            decode(map.remove(key).unwrap_or(Value::Null))
        }
        other => decode(other),
    }
}

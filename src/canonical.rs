//! # Canonical JSON
//!
//! Claim data is compared by its JCS ([RFC8785]) serialization so that two
//! values are equal regardless of object key order.
//!
//! [RFC8785]: https://www.rfc-editor.org/rfc/rfc8785

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Serialize `value` to canonical JSON.
///
/// # Errors
///
/// Will return an error if the value cannot be serialized.
pub fn stringify<T: Serialize>(value: &T) -> Result<String> {
    serde_json_canonicalizer::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Returns true if `data` canonicalizes to `expected`.
///
/// Data that cannot be canonicalized never matches.
#[must_use]
pub fn matches(data: &Value, expected: &str) -> bool {
    stringify(data).is_ok_and(|s| s == expected)
}

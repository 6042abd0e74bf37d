//! JSON response decoding.

use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Decode a response body into `T`.
///
/// Unknown keys are ignored and missing keys fall back to the target type's
/// serde defaults. On failure nothing is returned but the error, which keeps
/// the raw bytes for diagnostics.
///
/// # Errors
///
/// Returns [`Error::DecodingError`] on malformed JSON or a shape mismatch.
pub fn decode<T>(raw: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(raw).map_err(|err| Error::DecodingError {
        raw: raw.to_vec(),
        message: err.to_string(),
    })
}

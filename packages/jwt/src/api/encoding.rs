//! Base64url codec (RFC 7515 §2): URL-safe alphabet, no padding.

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

#[inline]
fn is_base64url_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Encode bytes as unpadded base64url
#[inline]
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url
///
/// The engine rejects impossible lengths and non-canonical trailing bits, so
/// two distinct strings never decode to the same bytes.
///
/// # Errors
/// Returns [`JwtError::InvalidEncoding`] for characters outside
/// `[A-Za-z0-9-_]` or malformed base64.
pub fn decode(input: &str) -> JwtResult<Vec<u8>> {
    if !input.bytes().all(is_base64url_byte) {
        return Err(JwtError::invalid_encoding(
            "input contains characters outside the base64url alphabet",
        ));
    }

    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| JwtError::invalid_encoding("input is not valid base64url"))
}

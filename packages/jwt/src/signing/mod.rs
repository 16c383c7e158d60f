//! Signing primitives, selected once per call from the closed [`Algorithm`] set.

mod hmac;
mod rsa;

use crate::{error::JwtResult, types::Algorithm};
use self::hmac::{HmacSha256, HmacSha384, HmacSha512};

/// Sign `message` with the primitive behind `algorithm`.
///
/// `key` is the HMAC secret for HS* and the PKCS#8 PEM private key for RS256.
pub(crate) fn sign_message(algorithm: Algorithm, message: &[u8], key: &[u8]) -> JwtResult<Vec<u8>> {
    match algorithm {
        Algorithm::Hs256 => hmac::sign::<HmacSha256>(message, key),
        Algorithm::Hs384 => hmac::sign::<HmacSha384>(message, key),
        Algorithm::Hs512 => hmac::sign::<HmacSha512>(message, key),
        Algorithm::Rs256 => rsa::sign_rs256(message, key),
    }
}

/// Check `signature` over `message` with the primitive behind `algorithm`.
///
/// `key` is the HMAC secret for HS* and the SPKI PEM public key for RS256.
pub(crate) fn verify_message(
    algorithm: Algorithm,
    message: &[u8],
    signature: &[u8],
    key: &[u8],
) -> JwtResult<bool> {
    match algorithm {
        Algorithm::Hs256 => hmac::verify::<HmacSha256>(message, signature, key),
        Algorithm::Hs384 => hmac::verify::<HmacSha384>(message, signature, key),
        Algorithm::Hs512 => hmac::verify::<HmacSha512>(message, signature, key),
        Algorithm::Rs256 => rsa::verify_rs256(message, signature, key),
    }
}

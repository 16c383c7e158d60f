//! HMAC-SHA2 signatures (HS256, HS384, HS512)

use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

pub(crate) type HmacSha256 = Hmac<Sha256>;
pub(crate) type HmacSha384 = Hmac<Sha384>;
pub(crate) type HmacSha512 = Hmac<Sha512>;

/// Compute the MAC of `message` under `secret`
#[inline]
pub(crate) fn sign<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::missing_key("secret cannot be used as an HMAC key"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recompute the MAC and compare in constant time
#[inline]
pub(crate) fn verify<M: Mac + KeyInit>(
    message: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> JwtResult<bool> {
    let expected = sign::<M>(message, secret)?;
    Ok(expected.as_slice().ct_eq(signature).into())
}

//! Token signing

use super::{
    encoding,
    keys::{PemKind, validate_hmac_secret, validate_pem},
};
use crate::{
    claims::Claims,
    config::SignOptions,
    error::{JwtError, JwtResult},
    signing::sign_message,
    traits::{Clock, SystemClock},
    types::{Algorithm, Header, JwtToken},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sign `claims` using the wall clock for `iat`
///
/// # Errors
/// See [`sign_with_clock`].
pub fn sign<C: Serialize + ?Sized>(claims: &C, options: &SignOptions) -> JwtResult<JwtToken> {
    sign_with_clock(claims, options, &SystemClock)
}

/// Sign `claims`, reading the current time from `clock`
///
/// The caller's claims are copied; `iat` is always set, and `exp`, `nbf`,
/// `iss`, `aud` and `jti` are set when the matching option is present.
///
/// # Errors
/// - [`JwtError::MissingKey`] if the secret is absent or shorter than 32
///   bytes, or the private key is absent, not a `PRIVATE KEY` PEM block, or
///   not a usable RSA key
/// - [`JwtError::InvalidClaims`] if `claims` is not a JSON object with
///   correctly typed registered claims, or a duration option does not parse
pub fn sign_with_clock<C: Serialize + ?Sized>(
    claims: &C,
    options: &SignOptions,
    clock: &dyn Clock,
) -> JwtResult<JwtToken> {
    let algorithm = options.algorithm;
    let key = signing_key(algorithm, options)?;

    let mut payload = copy_claims(claims)?;
    stamp_standard_claims(&mut payload, options, clock.now())
        .map_err(JwtError::into_sign_failure)?;

    let header = Header::with_fields(algorithm, &options.header);
    let header_json = serde_json::to_vec(&header)
        .map_err(|_| JwtError::invalid_claims("header could not be serialized"))?;
    let payload_json = serde_json::to_vec(&payload)
        .map_err(|_| JwtError::invalid_claims("claims could not be serialized"))?;

    let signing_input = format!(
        "{}.{}",
        encoding::encode(&header_json),
        encoding::encode(&payload_json)
    );
    let signature = sign_message(algorithm, signing_input.as_bytes(), key)?;

    tracing::debug!(
        alg = %algorithm,
        exp = ?payload.exp,
        custom_claims = payload.extra.len(),
        "signed token"
    );

    Ok(JwtToken(format!(
        "{signing_input}.{}",
        encoding::encode(&signature)
    )))
}

fn signing_key(algorithm: Algorithm, options: &SignOptions) -> JwtResult<&[u8]> {
    if algorithm.is_symmetric() {
        return validate_hmac_secret(options.secret.as_ref()).map(|secret| secret.as_bytes());
    }

    let private_key = options
        .private_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            JwtError::MissingKey(format!("private key is required for {algorithm} signing"))
        })?;
    validate_pem(private_key.as_bytes(), PemKind::Private)?;
    Ok(private_key.as_bytes())
}

fn copy_claims<C: Serialize + ?Sized>(claims: &C) -> JwtResult<Claims> {
    let value = serde_json::to_value(claims)
        .map_err(|_| JwtError::invalid_claims("claims could not be serialized"))?;

    if !value.is_object() {
        return Err(JwtError::invalid_claims("claims must be a JSON object"));
    }

    Claims::deserialize(value)
        .map_err(|_| JwtError::invalid_claims("registered claims have the wrong type"))
}

fn stamp_standard_claims(payload: &mut Claims, options: &SignOptions, now: i64) -> JwtResult<()> {
    payload.iat = Some(now);

    if let Some(span) = &options.expires_in {
        payload.exp = Some(offset(now, span.to_seconds()?)?);
    }

    if let Some(span) = &options.not_before {
        payload.nbf = Some(offset(now, span.to_seconds()?)?);
    }

    if let Some(issuer) = &options.issuer {
        payload.iss = Some(issuer.clone());
    }

    if let Some(audience) = &options.audience {
        payload.aud = Some(audience.clone());
    }

    if let Some(jti) = &options.jwt_id {
        payload.jti = Some(jti.clone());
    }

    Ok(())
}

fn offset(now: i64, seconds: i64) -> JwtResult<i64> {
    now.checked_add(seconds)
        .ok_or_else(|| JwtError::invalid_duration("duration overflows the timestamp range"))
}

/// Sign an untyped JSON value; anything but an object is rejected
///
/// # Errors
/// As [`sign`].
pub fn sign_value(claims: &Value, options: &SignOptions) -> JwtResult<JwtToken> {
    sign(claims, options)
}

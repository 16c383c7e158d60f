//! Temporal and identity claim checks, run after the signature is trusted.

use crate::{
    claims::{Audience, Claims},
    config::VerifyOptions,
    error::{JwtError, JwtResult},
};
use chrono::DateTime;

fn rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map_or_else(|| timestamp.to_string(), |time| time.to_rfc3339())
}

/// Check `exp`, `nbf` and `iat` against `now`, allowing `tolerance` seconds of skew
///
/// # Errors
/// [`JwtError::TokenExpired`] for `now - tolerance > exp`;
/// [`JwtError::ClaimValidation`] for `now + tolerance < nbf` or `now + tolerance < iat`.
pub fn validate_time_claims(claims: &Claims, now: i64, tolerance: u64) -> JwtResult<()> {
    let tolerance = i64::try_from(tolerance).unwrap_or(i64::MAX);
    let earliest = now.saturating_sub(tolerance);
    let latest = now.saturating_add(tolerance);

    if let Some(exp) = claims.exp
        && earliest > exp
    {
        return Err(JwtError::TokenExpired(format!("token expired at {}", rfc3339(exp))));
    }

    if let Some(nbf) = claims.nbf
        && latest < nbf
    {
        return Err(JwtError::ClaimValidation(format!(
            "token not valid before {}",
            rfc3339(nbf)
        )));
    }

    if let Some(iat) = claims.iat
        && latest < iat
    {
        return Err(JwtError::ClaimValidation(format!(
            "token issued in the future at {}",
            rfc3339(iat)
        )));
    }

    Ok(())
}

/// Check `iss` equals `expected` exactly
///
/// # Errors
/// [`JwtError::ClaimValidation`] when the issuer is absent or different.
pub fn validate_issuer(claims: &Claims, expected: &str) -> JwtResult<()> {
    match claims.iss.as_deref() {
        Some(iss) if iss == expected => Ok(()),
        Some(_) => Err(JwtError::claim_validation("issuer does not match")),
        None => Err(JwtError::claim_validation("token issuer is required")),
    }
}

/// Check the token's `aud` shares at least one member with `expected`
///
/// # Errors
/// [`JwtError::ClaimValidation`] when `aud` is absent or disjoint.
pub fn validate_audience(claims: &Claims, expected: &Audience) -> JwtResult<()> {
    let aud = claims
        .aud
        .as_ref()
        .ok_or_else(|| JwtError::claim_validation("token audience is required"))?;

    if aud.contains_any(expected) {
        Ok(())
    } else {
        Err(JwtError::claim_validation("audience does not match"))
    }
}

/// Temporal claims first, then issuer, then audience
pub(crate) fn validate_claims(claims: &Claims, options: &VerifyOptions, now: i64) -> JwtResult<()> {
    validate_time_claims(claims, now, options.clock_tolerance_secs)?;

    if let Some(issuer) = options.issuer.as_deref() {
        validate_issuer(claims, issuer)?;
    }

    if let Some(audience) = options.audience.as_ref() {
        validate_audience(claims, audience)?;
    }

    Ok(())
}

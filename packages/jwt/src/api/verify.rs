//! Token verification
//!
//! Verification is a fixed sequence of stages and the first failing stage
//! decides the error. A token that is both expired and badly signed is
//! therefore reported as a signature failure.

use super::{
    encoding,
    keys::{PemKind, validate_pem},
    validation::validate_claims,
};
use crate::{
    claims::Claims,
    config::VerifyOptions,
    error::{JwtError, JwtResult},
    signing::verify_message,
    traits::{Clock, SystemClock},
    types::Algorithm,
};
use serde_json::{Map, Value};

/// Verify `token` against the wall clock and return its claims
///
/// # Errors
/// See [`verify_with_clock`].
pub fn verify(token: &str, options: &VerifyOptions) -> JwtResult<Claims> {
    verify_with_clock(token, options, &SystemClock)
}

/// Verify `token`, reading the current time from `clock`
///
/// # Errors
/// In stage order:
/// 1. [`JwtError::MissingKey`]: no secret (HS*), or no `PUBLIC KEY` PEM block (RS256)
/// 2. [`JwtError::MalformedToken`]: not exactly three segments
/// 3. [`JwtError::MalformedToken`]: header is not base64url JSON object
/// 4. [`JwtError::InvalidSignature`]: header `alg` differs from the configured algorithm
/// 5. [`JwtError::MalformedToken`]: payload is not a base64url JSON claim set
/// 6. [`JwtError::MalformedToken`] for an undecodable signature,
///    [`JwtError::InvalidSignature`] for a mismatch
/// 7. [`JwtError::TokenExpired`] / [`JwtError::ClaimValidation`]: `exp`, `nbf`, `iat`
/// 8. [`JwtError::ClaimValidation`]: issuer
/// 9. [`JwtError::ClaimValidation`]: audience
pub fn verify_with_clock(
    token: &str,
    options: &VerifyOptions,
    clock: &dyn Clock,
) -> JwtResult<Claims> {
    let algorithm = options.algorithm;

    let result = run_stages(token, options, algorithm, clock);
    match &result {
        Ok(claims) => tracing::debug!(
            alg = %algorithm,
            custom_claims = claims.extra.len(),
            "verified token"
        ),
        Err(err) => tracing::debug!(
            alg = %algorithm,
            kind = ?err.kind(),
            reason = err.message(),
            "rejected token"
        ),
    }
    result
}

fn run_stages(
    token: &str,
    options: &VerifyOptions,
    algorithm: Algorithm,
    clock: &dyn Clock,
) -> JwtResult<Claims> {
    let key = verification_key(algorithm, options)?;

    let [header_b64, payload_b64, signature_b64] = split_segments(token)?;

    let header = decode_object(header_b64).map_err(|err| in_segment("header", err))?;
    check_algorithm(&header, algorithm)?;

    let claims = decode_claims(payload_b64)?;

    let signature = encoding::decode(signature_b64)
        .map_err(|_| JwtError::malformed_token("invalid signature encoding"))?;
    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
    if !verify_message(algorithm, signing_input.as_bytes(), &signature, key)? {
        return Err(JwtError::invalid_signature("signature does not match"));
    }

    validate_claims(&claims, options, clock.now())?;

    Ok(claims)
}

fn verification_key(algorithm: Algorithm, options: &VerifyOptions) -> JwtResult<&[u8]> {
    if algorithm.is_symmetric() {
        return options
            .secret
            .as_ref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| secret.as_bytes())
            .ok_or_else(|| {
                JwtError::MissingKey(format!("secret is required for {algorithm} verification"))
            });
    }

    let public_key = options
        .public_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            JwtError::MissingKey(format!("public key is required for {algorithm} verification"))
        })?;
    validate_pem(public_key.as_bytes(), PemKind::Public)?;
    Ok(public_key.as_bytes())
}

fn split_segments(token: &str) -> JwtResult<[&str; 3]> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok([header, payload, signature]),
        _ => Err(JwtError::MalformedToken(format!(
            "expected 3 segments, found {}",
            token.split('.').count()
        ))),
    }
}

fn decode_object(segment: &str) -> JwtResult<Map<String, Value>> {
    let bytes = encoding::decode(segment)?;
    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(JwtError::malformed_token("segment is not a JSON object")),
    }
}

fn check_algorithm(header: &Map<String, Value>, expected: Algorithm) -> JwtResult<()> {
    match header.get("alg").and_then(Value::as_str) {
        Some(alg) if alg == expected.as_str() => Ok(()),
        Some(alg) => Err(JwtError::InvalidSignature(format!(
            "token algorithm mismatch: expected {expected}, got {}",
            printable_alg(alg)
        ))),
        None => Err(JwtError::InvalidSignature(format!(
            "token algorithm mismatch: expected {expected}, got none"
        ))),
    }
}

/// Header values are attacker-controlled; keep them short and printable.
fn printable_alg(alg: &str) -> String {
    let cleaned: String = alg
        .chars()
        .filter(|c| c.is_ascii_graphic())
        .take(16)
        .collect();
    if cleaned.is_empty() {
        "an empty value".to_string()
    } else {
        cleaned
    }
}

fn decode_claims(segment: &str) -> JwtResult<Claims> {
    let payload = decode_object(segment).map_err(|err| in_segment("payload", err))?;

    serde_json::from_value(Value::Object(payload)).map_err(|_| {
        JwtError::malformed_token("invalid token payload: registered claims have the wrong type")
    })
}

fn in_segment(segment: &str, err: JwtError) -> JwtError {
    match err.into_verify_failure() {
        JwtError::MalformedToken(msg) => {
            JwtError::MalformedToken(format!("invalid token {segment}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::sign::sign_with_clock, config::SignOptions, error::ErrorKind, traits::FixedClock};
    use serde_json::json;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";
    const NOW: i64 = 1_700_000_000;

    fn issue(claims: Value, options: &SignOptions) -> String {
        sign_with_clock(&claims, options, &FixedClock(NOW)).unwrap().0
    }

    fn forge(header: Value, payload: Value) -> String {
        let signing_input = format!(
            "{}.{}",
            encoding::encode(header.to_string()),
            encoding::encode(payload.to_string())
        );
        let signature =
            crate::signing::sign_message(Algorithm::Hs256, signing_input.as_bytes(), SECRET.as_bytes())
                .unwrap();
        format!("{signing_input}.{}", encoding::encode(signature))
    }

    fn kind_at(token: &str, options: &VerifyOptions, now: i64) -> Option<ErrorKind> {
        verify_with_clock(token, options, &FixedClock(now))
            .err()
            .map(|err| err.kind())
    }

    #[test]
    fn round_trip_returns_injected_claims() {
        let token = issue(json!({"sub": "u1"}), &SignOptions::hs256(SECRET).expires_in("1h"));
        let claims = verify_with_clock(&token, &VerifyOptions::hs256(SECRET), &FixedClock(NOW)).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("u1"));
        assert_eq!(claims.iat, Some(NOW));
        assert_eq!(claims.exp, Some(NOW + 3600));
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn key_presence_is_checked_before_parsing() {
        let options = VerifyOptions::default();
        assert_eq!(kind_at("garbage", &options, NOW), Some(ErrorKind::MissingKey));

        let options = VerifyOptions::rs256("not a pem");
        assert_eq!(kind_at("garbage", &options, NOW), Some(ErrorKind::MissingKey));

        let mut options = VerifyOptions::rs256("");
        options.secret = Some(SECRET.into());
        assert_eq!(kind_at("garbage", &options, NOW), Some(ErrorKind::MissingKey));
    }

    #[test]
    fn segment_count_must_be_three() {
        let options = VerifyOptions::hs256(SECRET);
        for token in ["a.b", "", "abc", "a.b.c.d", "...."] {
            assert_eq!(
                kind_at(token, &options, NOW),
                Some(ErrorKind::MalformedToken),
                "{token:?}"
            );
        }
        let err = verify_with_clock("a.b", &options, &FixedClock(NOW)).unwrap_err();
        assert_eq!(err.message(), "expected 3 segments, found 2");
    }

    #[test]
    fn header_must_be_base64url_json_object() {
        let options = VerifyOptions::hs256(SECRET);
        let payload = encoding::encode(r#"{"sub":"u1"}"#);
        for header in [
            "!!!".to_string(),
            encoding::encode("not json"),
            encoding::encode("[1,2]"),
            encoding::encode([0xff, 0xfe]),
        ] {
            let token = format!("{header}.{payload}.sig");
            assert_eq!(kind_at(&token, &options, NOW), Some(ErrorKind::MalformedToken));
        }
    }

    #[test]
    fn algorithm_must_match_configuration() {
        let options = VerifyOptions::hs256(SECRET);
        for header in [
            json!({"alg": "none", "typ": "JWT"}),
            json!({"alg": "HS512", "typ": "JWT"}),
            json!({"alg": "RS256", "typ": "JWT"}),
            json!({"typ": "JWT"}),
            json!({"alg": 256}),
        ] {
            let token = forge(header.clone(), json!({"sub": "u1"}));
            assert_eq!(
                kind_at(&token, &options, NOW),
                Some(ErrorKind::InvalidSignature),
                "{header}"
            );
        }
    }

    #[test]
    fn unsigned_tokens_are_always_rejected() {
        let header = encoding::encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = encoding::encode(r#"{"sub":"admin"}"#);
        let token = format!("{header}.{payload}.");

        for options in [
            VerifyOptions::hs256(SECRET),
            VerifyOptions::hmac(Algorithm::Hs384, SECRET),
            VerifyOptions::hmac(Algorithm::Hs512, SECRET),
        ] {
            assert_eq!(kind_at(&token, &options, NOW), Some(ErrorKind::InvalidSignature));
        }
    }

    #[test]
    fn algorithm_is_checked_before_payload() {
        let header = encoding::encode(r#"{"alg":"none"}"#);
        let token = format!("{header}.!!!.sig");
        assert_eq!(
            kind_at(&token, &VerifyOptions::hs256(SECRET), NOW),
            Some(ErrorKind::InvalidSignature)
        );
    }

    #[test]
    fn payload_must_be_a_claim_set() {
        let options = VerifyOptions::hs256(SECRET);
        for payload in [json!("str"), json!([1]), json!({"exp": "soon"}), json!({"aud": 5})] {
            let token = forge(json!({"alg": "HS256", "typ": "JWT"}), payload.clone());
            assert_eq!(
                kind_at(&token, &options, NOW),
                Some(ErrorKind::MalformedToken),
                "{payload}"
            );
        }
    }

    #[test]
    fn signature_must_decode_then_match() {
        let options = VerifyOptions::hs256(SECRET);
        let good = issue(json!({"sub": "u1"}), &SignOptions::hs256(SECRET));
        let (signing_input, _) = good.rsplit_once('.').unwrap();

        let bad_encoding = format!("{signing_input}.a+b/");
        assert_eq!(kind_at(&bad_encoding, &options, NOW), Some(ErrorKind::MalformedToken));

        let empty = format!("{signing_input}.");
        assert_eq!(kind_at(&empty, &options, NOW), Some(ErrorKind::InvalidSignature));

        let other = encoding::encode([0u8; 32]);
        let wrong = format!("{signing_input}.{other}");
        assert_eq!(kind_at(&wrong, &options, NOW), Some(ErrorKind::InvalidSignature));
    }

    #[test]
    fn wrong_secret_is_a_signature_failure() {
        let token = issue(json!({"sub": "u1"}), &SignOptions::hs256(SECRET));
        let other = VerifyOptions::hs256("fedcba9876543210fedcba9876543210");
        assert_eq!(kind_at(&token, &other, NOW), Some(ErrorKind::InvalidSignature));
    }

    #[test]
    fn signature_failure_wins_over_expiry() {
        let token = issue(json!({}), &SignOptions::hs256(SECRET).expires_in(-3600));
        let other = VerifyOptions::hs256("fedcba9876543210fedcba9876543210");
        assert_eq!(kind_at(&token, &other, NOW), Some(ErrorKind::InvalidSignature));
        assert_eq!(
            kind_at(&token, &VerifyOptions::hs256(SECRET), NOW),
            Some(ErrorKind::TokenExpired)
        );
    }

    #[test]
    fn expiry_boundary() {
        let token = issue(json!({}), &SignOptions::hs256(SECRET).expires_in(60));
        let options = VerifyOptions::hs256(SECRET);
        let exp = NOW + 60;

        // exp = now - tol
        assert_eq!(kind_at(&token, &options, exp + 5), None);
        // exp = now - tol - 1
        assert_eq!(kind_at(&token, &options, exp + 6), Some(ErrorKind::TokenExpired));
        assert_eq!(
            kind_at(&token, &options.clone().clock_tolerance(0), exp + 1),
            Some(ErrorKind::TokenExpired)
        );
    }

    #[test]
    fn not_before_and_future_issue_time() {
        let options = VerifyOptions::hs256(SECRET);

        let delayed = issue(json!({}), &SignOptions::hs256(SECRET).not_before("1m"));
        assert_eq!(kind_at(&delayed, &options, NOW), Some(ErrorKind::ClaimValidation));
        assert_eq!(kind_at(&delayed, &options, NOW + 55), None);

        let issued = issue(json!({}), &SignOptions::hs256(SECRET));
        assert_eq!(kind_at(&issued, &options, NOW - 6), Some(ErrorKind::ClaimValidation));
        assert_eq!(kind_at(&issued, &options, NOW - 5), None);
    }

    #[test]
    fn issuer_and_audience() {
        let token = issue(
            json!({}),
            &SignOptions::hs256(SECRET).issuer("auth").audience(["a", "b"]),
        );

        let options = VerifyOptions::hs256(SECRET).issuer("auth").audience("b");
        assert_eq!(kind_at(&token, &options, NOW), None);

        let options = VerifyOptions::hs256(SECRET).issuer("other");
        assert_eq!(kind_at(&token, &options, NOW), Some(ErrorKind::ClaimValidation));

        let options = VerifyOptions::hs256(SECRET).audience("c");
        assert_eq!(kind_at(&token, &options, NOW), Some(ErrorKind::ClaimValidation));

        let no_aud = issue(json!({}), &SignOptions::hs256(SECRET));
        let options = VerifyOptions::hs256(SECRET).audience("a");
        assert_eq!(kind_at(&no_aud, &options, NOW), Some(ErrorKind::ClaimValidation));
    }

    #[test]
    fn temporal_checks_precede_identity_checks() {
        let token = issue(json!({}), &SignOptions::hs256(SECRET).expires_in(-60).issuer("x"));
        let options = VerifyOptions::hs256(SECRET).issuer("y");
        assert_eq!(kind_at(&token, &options, NOW), Some(ErrorKind::TokenExpired));
    }

    #[test]
    fn mismatch_message_sanitizes_header_alg() {
        let token = forge(json!({"alg": "x\n\u{7}yz-very-long-algorithm-name"}), json!({}));
        let err = verify_with_clock(&token, &VerifyOptions::hs256(SECRET), &FixedClock(NOW))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "token algorithm mismatch: expected HS256, got xyz-very-long-al"
        );
    }
}

//! JWT error types
//!
//! Every message carried by a [`JwtError`] is short and safe to hand back to a
//! client: no key bytes, no secrets, no raw token contents.

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Discriminant of a [`JwtError`], for adapters that map failures onto
/// transport responses without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required key absent, too short, or not a usable PEM block
    MissingKey,
    /// Wrong segment count, bad base64url, or bad JSON
    MalformedToken,
    /// Algorithm mismatch or failed signature check
    InvalidSignature,
    /// `exp` is in the past beyond the clock tolerance
    TokenExpired,
    /// `nbf`, `iat`, issuer or audience check failed
    ClaimValidation,
    /// Claims could not be signed
    InvalidClaims,
    /// Algorithm name outside the allow-list
    UnsupportedAlgorithm,
    /// Base64url codec failure
    InvalidEncoding,
    /// Duration parser failure
    InvalidDuration,
}

/// JWT error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Required secret, private key or public key is missing or unusable
    #[error("Missing key: {0}")]
    MissingKey(String),
    /// Token could not be decoded
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    /// Token signature does not verify
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    /// Token has expired
    #[error("Token expired: {0}")]
    TokenExpired(String),
    /// A temporal or identity claim was rejected
    #[error("Claim validation failed: {0}")]
    ClaimValidation(String),
    /// Claims handed to the signer are not a valid claim set
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),
    /// Unsupported algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Input is not valid base64url
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// Input is not a valid relative-time expression
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}

impl JwtError {
    /// Kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            JwtError::MissingKey(_) => ErrorKind::MissingKey,
            JwtError::MalformedToken(_) => ErrorKind::MalformedToken,
            JwtError::InvalidSignature(_) => ErrorKind::InvalidSignature,
            JwtError::TokenExpired(_) => ErrorKind::TokenExpired,
            JwtError::ClaimValidation(_) => ErrorKind::ClaimValidation,
            JwtError::InvalidClaims(_) => ErrorKind::InvalidClaims,
            JwtError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            JwtError::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            JwtError::InvalidDuration(_) => ErrorKind::InvalidDuration,
        }
    }

    /// Message without the kind prefix
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            JwtError::MissingKey(msg)
            | JwtError::MalformedToken(msg)
            | JwtError::InvalidSignature(msg)
            | JwtError::TokenExpired(msg)
            | JwtError::ClaimValidation(msg)
            | JwtError::InvalidClaims(msg)
            | JwtError::UnsupportedAlgorithm(msg)
            | JwtError::InvalidEncoding(msg)
            | JwtError::InvalidDuration(msg) => msg,
        }
    }

    /// Create a missing key error
    #[inline]
    #[must_use]
    pub fn missing_key(msg: &str) -> Self {
        JwtError::MissingKey(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed_token(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create an invalid signature error
    #[inline]
    #[must_use]
    pub fn invalid_signature(msg: &str) -> Self {
        JwtError::InvalidSignature(msg.to_string())
    }

    /// Create a token expired error
    #[inline]
    #[must_use]
    pub fn token_expired(msg: &str) -> Self {
        JwtError::TokenExpired(msg.to_string())
    }

    /// Create a claim validation error
    #[inline]
    #[must_use]
    pub fn claim_validation(msg: &str) -> Self {
        JwtError::ClaimValidation(msg.to_string())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: &str) -> Self {
        JwtError::InvalidClaims(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid encoding error
    #[inline]
    #[must_use]
    pub fn invalid_encoding(msg: &str) -> Self {
        JwtError::InvalidEncoding(msg.to_string())
    }

    /// Create an invalid duration error
    #[inline]
    #[must_use]
    pub fn invalid_duration(msg: &str) -> Self {
        JwtError::InvalidDuration(msg.to_string())
    }

    /// Re-tag a leaf utility failure raised while signing
    pub(crate) fn into_sign_failure(self) -> Self {
        match self {
            JwtError::InvalidDuration(msg) | JwtError::InvalidEncoding(msg) => {
                JwtError::InvalidClaims(msg)
            }
            other => other,
        }
    }

    /// Re-tag a leaf utility failure raised while verifying
    pub(crate) fn into_verify_failure(self) -> Self {
        match self {
            JwtError::InvalidEncoding(msg) | JwtError::InvalidDuration(msg) => {
                JwtError::MalformedToken(msg)
            }
            other => other,
        }
    }
}

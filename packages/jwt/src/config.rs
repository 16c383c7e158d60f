//! Per-call signing and verification options.
//!
//! Both types deserialize from service configuration (JSON, TOML, ...) and
//! also expose builder methods for programmatic use.

use crate::{
    api::duration::TimeSpan,
    claims::Audience,
    types::{Algorithm, KeyMaterial},
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default clock tolerance applied to `exp`, `nbf` and `iat`
pub const DEFAULT_CLOCK_TOLERANCE_SECS: u64 = 5;

fn default_clock_tolerance() -> u64 {
    DEFAULT_CLOCK_TOLERANCE_SECS
}

/// Options for [`sign`](crate::sign)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignOptions {
    /// Signing algorithm, `HS256` when omitted
    pub algorithm: Algorithm,
    /// HMAC secret (HS256/HS384/HS512)
    pub secret: Option<KeyMaterial>,
    /// PKCS#8 PEM private key (RS256)
    pub private_key: Option<KeyMaterial>,
    /// Lifetime; sets `exp = iat + expires_in`
    pub expires_in: Option<TimeSpan>,
    /// Activation delay; sets `nbf = iat + not_before`
    pub not_before: Option<TimeSpan>,
    /// Value for `iss`
    pub issuer: Option<String>,
    /// Value for `aud`
    pub audience: Option<Audience>,
    /// Value for `jti`
    #[serde(alias = "jwtid")]
    pub jwt_id: Option<String>,
    /// Extra header fields; `alg` and `typ` are ignored
    pub header: BTreeMap<String, Value>,
}

impl SignOptions {
    /// HMAC-SHA256 options with the given secret
    #[must_use]
    pub fn hs256(secret: impl Into<KeyMaterial>) -> Self {
        Self::hmac(Algorithm::Hs256, secret)
    }

    /// HMAC options for any HS* algorithm
    #[must_use]
    pub fn hmac(algorithm: Algorithm, secret: impl Into<KeyMaterial>) -> Self {
        Self {
            algorithm,
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// RS256 options with a PKCS#8 PEM private key
    #[must_use]
    pub fn rs256(private_key_pem: impl Into<KeyMaterial>) -> Self {
        Self {
            algorithm: Algorithm::Rs256,
            private_key: Some(private_key_pem.into()),
            ..Self::default()
        }
    }

    /// Set the token lifetime
    #[must_use]
    pub fn expires_in(mut self, span: impl Into<TimeSpan>) -> Self {
        self.expires_in = Some(span.into());
        self
    }

    /// Delay activation of the token
    #[must_use]
    pub fn not_before(mut self, span: impl Into<TimeSpan>) -> Self {
        self.not_before = Some(span.into());
        self
    }

    /// Set the issuer
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the audience
    #[must_use]
    pub fn audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the token ID
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jwt_id = Some(jti.into());
        self
    }

    /// Add a header field
    #[must_use]
    pub fn header_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }
}

/// Options for [`verify`](crate::verify)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyOptions {
    /// Expected algorithm, `HS256` when omitted
    pub algorithm: Algorithm,
    /// HMAC secret (HS256/HS384/HS512)
    pub secret: Option<KeyMaterial>,
    /// SPKI PEM public key (RS256)
    pub public_key: Option<KeyMaterial>,
    /// Required `iss`
    pub issuer: Option<String>,
    /// Accepted audiences; the token must name at least one
    pub audience: Option<Audience>,
    /// Leeway in seconds for temporal claims
    #[serde(default = "default_clock_tolerance", alias = "clockToleranceSec")]
    pub clock_tolerance_secs: u64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            secret: None,
            public_key: None,
            issuer: None,
            audience: None,
            clock_tolerance_secs: default_clock_tolerance(),
        }
    }
}

impl VerifyOptions {
    /// HMAC-SHA256 options with the given secret
    #[must_use]
    pub fn hs256(secret: impl Into<KeyMaterial>) -> Self {
        Self::hmac(Algorithm::Hs256, secret)
    }

    /// HMAC options for any HS* algorithm
    #[must_use]
    pub fn hmac(algorithm: Algorithm, secret: impl Into<KeyMaterial>) -> Self {
        Self {
            algorithm,
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// RS256 options with an SPKI PEM public key
    #[must_use]
    pub fn rs256(public_key_pem: impl Into<KeyMaterial>) -> Self {
        Self {
            algorithm: Algorithm::Rs256,
            public_key: Some(public_key_pem.into()),
            ..Self::default()
        }
    }

    /// Require this issuer
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Accept these audiences
    #[must_use]
    pub fn audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the clock tolerance in seconds
    #[must_use]
    pub fn clock_tolerance(mut self, secs: u64) -> Self {
        self.clock_tolerance_secs = secs;
        self
    }
}

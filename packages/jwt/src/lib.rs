//! Compact JSON Web Token signing and verification
//!
//! Tokens use the JWS compact serialization with HS256, HS384, HS512 or
//! RS256. Verification pins the algorithm from [`VerifyOptions`], never
//! from the token header, and reports the first failing check as a
//! [`JwtError`]:
//!
//! ```
//! use ysd_jwt::{Claims, SignOptions, VerifyOptions, sign, verify};
//!
//! let secret = "0123456789abcdef0123456789abcdef";
//! let token = sign(
//!     &Claims::new().subject("user-1"),
//!     &SignOptions::hs256(secret).expires_in("1h"),
//! )?;
//! let claims = verify(token.as_str(), &VerifyOptions::hs256(secret))?;
//! assert_eq!(claims.sub.as_deref(), Some("user-1"));
//! # Ok::<(), ysd_jwt::JwtError>(())
//! ```

pub mod api;
pub mod claims;
pub mod config;
mod error;
mod signing;
pub mod traits;
mod types;

pub use api::{
    MIN_HMAC_SECRET_LEN, PemKind, TimeSpan, bearer_token, parse_duration, parse_duration_value,
    sign, sign_value, sign_with_clock, validate_pem, verify, verify_with_clock,
};
pub use claims::{Audience, Claims};
pub use config::{DEFAULT_CLOCK_TOLERANCE_SECS, SignOptions, VerifyOptions};
pub use error::{ErrorKind, JwtError, JwtResult};
pub use traits::{Clock, FixedClock, SystemClock};
pub use types::{Algorithm, Header, JwtToken, KeyMaterial};

//! Token operations and the utilities they are built from
//!
//! [`sign`](sign::sign) and [`verify`](verify::verify) are the entry points;
//! the remaining modules are exposed for callers that need a single step,
//! such as validating a key at startup or parsing a configured lifetime.

pub mod bearer;
pub mod duration;
pub mod encoding;
pub mod keys;
pub mod sign;
pub mod validation;
pub mod verify;

pub use bearer::bearer_token;
pub use duration::{TimeSpan, parse_duration, parse_duration_value};
pub use keys::{MIN_HMAC_SECRET_LEN, PemKind, validate_pem};
pub use sign::{sign, sign_value, sign_with_clock};
pub use validation::{validate_audience, validate_issuer, validate_time_claims};
pub use verify::{verify, verify_with_clock};

//! Extraction of bearer credentials from an `Authorization` header value

const BEARER_PREFIX: &str = "Bearer ";

/// Return the token carried by an `Authorization: Bearer <token>` value
///
/// The scheme is matched case-sensitively. `None` when the prefix is absent
/// or nothing follows it.
#[must_use]
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

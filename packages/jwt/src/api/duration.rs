//! Relative-time expressions for `expiresIn` / `notBefore`.
//!
//! An integer is a second count taken as-is (zero and negative included).
//! A string is `<digits><unit>` with unit `s`, `m`, `h` or `d`.

use crate::error::{JwtError, JwtResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static DURATION_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^([0-9]+)([smhd])$").ok());

/// A relative time: seconds, or an expression such as `"30s"`, `"5m"`, `"2h"`, `"7d"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSpan {
    /// Raw second count
    Seconds(i64),
    /// Unit-suffixed expression
    Expression(String),
}

impl TimeSpan {
    /// Resolve to a second count
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidDuration`] when the expression does not parse.
    pub fn to_seconds(&self) -> JwtResult<i64> {
        parse_duration(self)
    }
}

impl From<i64> for TimeSpan {
    fn from(value: i64) -> Self {
        TimeSpan::Seconds(value)
    }
}

impl From<&str> for TimeSpan {
    fn from(value: &str) -> Self {
        TimeSpan::Expression(value.to_string())
    }
}

impl From<String> for TimeSpan {
    fn from(value: String) -> Self {
        TimeSpan::Expression(value)
    }
}

fn unit_multiplier(unit: &str) -> Option<i64> {
    match unit {
        "s" => Some(1),
        "m" => Some(60),
        "h" => Some(3_600),
        "d" => Some(86_400),
        _ => None,
    }
}

/// Convert a [`TimeSpan`] into seconds
///
/// # Errors
/// Returns [`JwtError::InvalidDuration`] if the expression does not match
/// `^[0-9]+[smhd]$` or overflows.
pub fn parse_duration(span: &TimeSpan) -> JwtResult<i64> {
    match span {
        TimeSpan::Seconds(seconds) => Ok(*seconds),
        TimeSpan::Expression(expr) => parse_expression(expr),
    }
}

/// Convert an untyped JSON value into seconds
///
/// # Errors
/// Returns [`JwtError::InvalidDuration`] for anything but an integer or a
/// valid expression string.
pub fn parse_duration_value(value: &Value) -> JwtResult<i64> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| {
            JwtError::invalid_duration("duration must be a whole number of seconds")
        }),
        Value::String(expr) => parse_expression(expr),
        _ => Err(JwtError::invalid_duration(
            "duration must be a number of seconds or a string like \"1h\"",
        )),
    }
}

fn parse_expression(expr: &str) -> JwtResult<i64> {
    let pattern = DURATION_PATTERN
        .as_ref()
        .ok_or_else(|| JwtError::invalid_duration("duration pattern unavailable"))?;

    let captures = pattern.captures(expr).ok_or_else(|| {
        JwtError::invalid_duration("use a number of seconds or a string like \"60s\", \"30m\", \"1h\", \"7d\"")
    })?;

    let amount: i64 = captures[1]
        .parse()
        .map_err(|_| JwtError::invalid_duration("duration amount is too large"))?;
    let multiplier = unit_multiplier(&captures[2])
        .ok_or_else(|| JwtError::invalid_duration("unknown duration unit"))?;

    amount
        .checked_mul(multiplier)
        .ok_or_else(|| JwtError::invalid_duration("duration amount is too large"))
}

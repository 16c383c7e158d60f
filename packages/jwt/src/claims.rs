//! JWT claim set: typed registered claims plus an open extension map.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::BTreeMap;

/// Audience claim, either a single recipient or a set of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single recipient
    One(String),
    /// Several recipients
    Many(Vec<String>),
}

impl Audience {
    /// Iterate the recipients; a single audience is a singleton set
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Audience::One(aud) => std::slice::from_ref(aud),
            Audience::Many(auds) => auds.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Whether the two audience sets share at least one member
    #[must_use]
    pub fn contains_any(&self, other: &Audience) -> bool {
        self.iter().any(|aud| other.iter().any(|candidate| candidate == aud))
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Audience::One(value.to_string())
    }
}

impl From<String> for Audience {
    fn from(value: String) -> Self {
        Audience::One(value)
    }
}

impl From<Vec<String>> for Audience {
    fn from(value: Vec<String>) -> Self {
        Audience::Many(value)
    }
}

impl From<&[&str]> for Audience {
    fn from(value: &[&str]) -> Self {
        Audience::Many(value.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Audience {
    fn from(value: [&str; N]) -> Self {
        Audience::Many(value.iter().map(ToString::to_string).collect())
    }
}

/// JWT claims structure
///
/// Registered claims are typed; everything else lands in `extra`, which is
/// serialized flat into the payload object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiration time (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not before (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Issued at (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// JWT ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Custom claims
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Claims {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Add a custom claim
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Raw value of a custom claim
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Custom claim decoded into `T`; `None` when absent or of another shape
    #[must_use]
    pub fn custom<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.extra
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }
}

//! JWT claims set with the registered names typed.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Seconds since the epoch, fractions allowed (RFC 7519 `NumericDate`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct NumericTime(pub f64);

impl NumericTime {
    /// Whole-second time of `t`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_datetime<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self(t.timestamp() as f64)
    }

    /// Current time, truncated to whole seconds
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Convert back to a timestamp; `None` when out of range or not finite.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let secs = self.0.floor();
        let nanos = ((self.0 - secs) * 1e9) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }
}

impl Serialize for NumericTime {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // integral values go out as JSON integers
        if self.0.fract() == 0.0 && self.0.abs() < 9.0e15 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// Audience: a single string or an array of strings on the wire
mod audience {
    use super::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub(super) fn serialize<S: Serializer>(aud: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        match aud {
            [one] => serializer.serialize_str(one),
            many => serializer.collect_seq(many),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        })
    }
}

/// Claims set of a token.
///
/// The registered claim names are typed fields; everything else lands in
/// [`Claims::extra`]. [`Claims::key_id`] is not part of the payload: on
/// verification it holds the header's `kid`, on issuing it becomes the
/// header's `kid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "audience")]
    pub aud: Vec<String>,
    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<NumericTime>,
    /// Not before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<NumericTime>,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<NumericTime>,
    /// JWT ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Claims without a registered name
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Key identifier from (or for) the header
    #[serde(skip)]
    pub key_id: Option<String>,
}

impl Claims {
    /// Empty claims set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the expiration time.
    #[must_use]
    pub fn expires_at<Tz: TimeZone>(mut self, t: &DateTime<Tz>) -> Self {
        self.exp = Some(NumericTime::from_datetime(t));
        self
    }

    /// Set the not-before time.
    #[must_use]
    pub fn not_before<Tz: TimeZone>(mut self, t: &DateTime<Tz>) -> Self {
        self.nbf = Some(NumericTime::from_datetime(t));
        self
    }

    /// Set the issued-at time to now.
    #[must_use]
    pub fn issued_now(mut self) -> Self {
        self.iat = Some(NumericTime::now());
        self
    }

    /// Add a claim without a registered name.
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Set the key identifier for the header `kid`.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// String value of a claim, registered or not.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        match name {
            "iss" => self.iss.as_deref(),
            "sub" => self.sub.as_deref(),
            "jti" => self.jti.as_deref(),
            "aud" => match self.aud.as_slice() {
                [one] => Some(one.as_str()),
                _ => None,
            },
            _ => self.extra.get(name).and_then(Value::as_str),
        }
    }

    /// Numeric value of a claim, registered or not.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match name {
            "exp" => self.exp.map(|t| t.0),
            "nbf" => self.nbf.map(|t| t.0),
            "iat" => self.iat.map(|t| t.0),
            _ => self.extra.get(name).and_then(Value::as_f64),
        }
    }
}

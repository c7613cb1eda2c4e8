//! Internal implementation of card identifiers.

use crate::{UuidError, UuidResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Prefix shared by every generated card identifier.
const CARD_ID_PREFIX: &str = "card-";

/// A UUID rendered in simple form (32 lowercase hex characters, no hyphens).
///
/// Used as the random component of generated [`CardId`]s.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UuidService(Uuid);

impl Default for UuidService {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidService {
    /// Generates a new random (version 4) UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is 32 lowercase hex characters.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for UuidService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Opaque identifier of a single card.
///
/// A `CardId` is guaranteed to contain at least one non-whitespace character. Beyond that it is
/// opaque: callers must only compare identifiers for equality.
///
/// # Construction
/// - [`CardId::generate`] allocates a fresh identifier.
/// - [`CardId::parse`] wraps an externally supplied identifier, rejecting blank input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    /// Generates a new identifier of the form `card-<timestamp>-<uuid>`.
    ///
    /// The timestamp is the current UTC time with millisecond precision; the UUID is random.
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Generates a new identifier using the given creation time.
    pub fn generate_at(timestamp: DateTime<Utc>) -> Self {
        Self(format!(
            "{CARD_ID_PREFIX}{}-{}",
            timestamp.format("%Y%m%dT%H%M%S%.3fZ"),
            UuidService::new()
        ))
    }

    /// Wraps an externally supplied identifier.
    ///
    /// The input is kept verbatim (no trimming, no case folding).
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is empty or whitespace only.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.trim().is_empty() {
            return Err(UuidError::InvalidInput(
                "card id cannot be empty".into(),
            ));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns true if this identifier has the generated `card-<timestamp>-<uuid>` shape.
    pub fn is_generated(&self) -> bool {
        let Some(rest) = self.0.strip_prefix(CARD_ID_PREFIX) else {
            return false;
        };
        let Some((ts, uuid)) = rest.split_once('-') else {
            return false;
        };
        let Some(ts) = ts.strip_suffix('Z') else {
            return false;
        };
        chrono::NaiveDateTime::parse_from_str(ts, "%Y%m%dT%H%M%S%.3f").is_ok()
            && UuidService::is_canonical(uuid)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CardId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CardId::parse(&s).map_err(serde::de::Error::custom)
    }
}

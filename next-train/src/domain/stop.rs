//! Stop identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A stop identifier as issued by the stop store and understood by the feed.
///
/// Ids are opaque, but always non-empty printable ASCII without whitespace,
/// since they are interpolated into feed URLs.
///
/// # Examples
///
/// ```
/// use next_train::domain::StopId;
///
/// let id = StopId::parse("70250").unwrap();
/// assert_eq!(id.as_str(), "70250");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StopId::parse(" 70061 ").unwrap().as_str(), "70061");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("70 250").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidStopId {
                reason: "must be printable ASCII without whitespace",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopId::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop as known to the stop store: its id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopRef {
    pub id: StopId,
    pub name: String,
}

impl StopRef {
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Latitude/longitude of a stop, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any printable ASCII token parses and round-trips
        #[test]
        fn token_roundtrip(s in "[!-~]{1,20}") {
            let id = StopId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Inner whitespace is always rejected
        #[test]
        fn inner_space_rejected(a in "[A-Za-z0-9]{1,5}", b in "[A-Za-z0-9]{1,5}") {
            let s = format!("{} {}", a, b);
            prop_assert!(StopId::parse(&s).is_err());
        }
    }
}

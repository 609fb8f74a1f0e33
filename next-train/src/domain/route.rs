//! Route, direction and stop-order types scanned from the feed.

use std::fmt;

use serde::Serialize;

/// An opaque route identifier as reported by the feed (e.g. `"Orange"`, `"810_"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteRef {
    pub id: String,
}

impl RouteRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// One of the two travel orientations of a route (`"0"` or `"1"` in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DirectionCode(String);

impl DirectionCode {
    /// Wrap a direction code, trimming surrounding whitespace.
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DirectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordinal position of a station within one direction's stop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopSequence(pub u32);

impl fmt::Display for StopSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stop within a direction, as listed by the stops-by-route feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionStop {
    pub sequence: StopSequence,
    pub parent_station_name: String,
}

/// The ordered stop list for one travel direction of one route.
///
/// Sequence numbers are unique within a direction and encode physical stop
/// order; stops are kept in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub code: DirectionCode,
    pub stops: Vec<DirectionStop>,
}

impl Direction {
    pub fn new(code: DirectionCode) -> Self {
        Self {
            code,
            stops: Vec::new(),
        }
    }
}

/// A scheduled call at a stop, from the schedule-by-route feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStop {
    pub sequence: StopSequence,
    /// Scheduled time as UNIX epoch seconds.
    pub epoch: i64,
}

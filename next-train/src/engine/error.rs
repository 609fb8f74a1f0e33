//! Engine error types.

use crate::domain::{DirectionCode, RouteRef, TimeError};
use crate::feed::FeedError;
use crate::stops::StoreError;

/// Errors from time projection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    /// Rolling forward by a zero or negative headway never terminates
    #[error("headway must be positive, got {minutes} minutes")]
    NonPositiveHeadway { minutes: i64 },

    /// Epoch or arithmetic result outside the representable range
    #[error("time out of range: {context}")]
    OutOfRange { context: String },
}

/// How a failed engine operation should be reported to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A stop, route, direction, stop order or hub is absent.
    NotFound,
    /// A collaborator failed: transport, feed contents or stop store.
    Unavailable,
    /// The request itself is refused.
    Invalid,
}

/// Error from an engine operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No stop with this name in the line's table
    #[error("no stop named {name:?} on the {line}")]
    StopNotFound { line: String, name: String },

    /// The two stops share no route
    #[error("no route serves both {boarding:?} and {destination:?}")]
    NoCommonRoute { boarding: String, destination: String },

    /// None of the common routes runs from boarding to destination
    #[error("no direction runs from {boarding:?} to {destination:?}")]
    NoDirection { boarding: String, destination: String },

    /// The station does not appear in the resolved direction
    #[error("{station:?} is not on route {route} direction {direction}")]
    StopOrderNotFound {
        route: RouteRef,
        direction: DirectionCode,
        station: String,
    },

    /// The line's hub station is missing from its table
    #[error("hub station {prefix:?} not found on the {line}")]
    HubNotFound { line: String, prefix: String },

    /// A hop journey was requested on a line without branches
    #[error("the {line} has no branches to transfer between")]
    NoBranches { line: String },

    /// Boarding and destination are the same stop
    #[error("boarding and destination are both {name:?}")]
    SameEndpoints { name: String },

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("invalid time: {0}")]
    Time(#[from] TimeError),
}

impl EngineError {
    /// Classify this error.
    pub fn outcome(&self) -> Outcome {
        match self {
            EngineError::StopNotFound { .. }
            | EngineError::NoCommonRoute { .. }
            | EngineError::NoDirection { .. }
            | EngineError::StopOrderNotFound { .. }
            | EngineError::HubNotFound { .. } => Outcome::NotFound,
            EngineError::Feed(_) | EngineError::Store(_) => Outcome::Unavailable,
            EngineError::NoBranches { .. }
            | EngineError::SameEndpoints { .. }
            | EngineError::Projection(_)
            | EngineError::Time(_) => Outcome::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes() {
        let not_found = EngineError::StopNotFound {
            line: "Orange Line".to_string(),
            name: "Nowhere".to_string(),
        };
        assert_eq!(not_found.outcome(), Outcome::NotFound);

        let unavailable = EngineError::from(FeedError::RateLimited);
        assert_eq!(unavailable.outcome(), Outcome::Unavailable);

        let drift = EngineError::from(FeedError::SchemaDrift {
            element: "stop",
            ordinal: 4,
            expected: "parent_station_name",
            found: None,
        });
        assert_eq!(drift.outcome(), Outcome::Unavailable);

        let invalid = EngineError::from(ProjectionError::NonPositiveHeadway { minutes: 0 });
        assert_eq!(invalid.outcome(), Outcome::Invalid);
    }

    #[test]
    fn messages_name_the_stop() {
        let err = EngineError::SameEndpoints {
            name: "Back Bay".to_string(),
        };
        assert_eq!(err.to_string(), "boarding and destination are both \"Back Bay\"");
    }
}

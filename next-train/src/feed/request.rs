//! Feed endpoints and the source abstraction the engine fetches through.

use crate::domain::{DirectionCode, RouteRef, StopId};

use super::error::FeedError;

/// One request against the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedRequest {
    RoutesByStop { stop: StopId },
    StopsByRoute { route: RouteRef },
    ScheduleByRoute { route: RouteRef, direction: DirectionCode },
    ServerTime,
}

impl FeedRequest {
    /// Endpoint path segment, appended to the base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FeedRequest::RoutesByStop { .. } => "routesbystop",
            FeedRequest::StopsByRoute { .. } => "stopsbyroute",
            FeedRequest::ScheduleByRoute { .. } => "schedulebyroute",
            FeedRequest::ServerTime => "servertime",
        }
    }

    /// Query parameters, excluding the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            FeedRequest::RoutesByStop { stop } => vec![("stop", stop.to_string())],
            FeedRequest::StopsByRoute { route } => vec![("route", route.id.clone())],
            FeedRequest::ScheduleByRoute { route, direction } => vec![
                ("route", route.id.clone()),
                ("direction", direction.to_string()),
            ],
            FeedRequest::ServerTime => Vec::new(),
        }
    }

    /// File stem used to store this request's response on disk,
    /// e.g. `schedulebyroute_Orange_1`.
    pub fn file_stem(&self) -> String {
        let mut stem = self.endpoint().to_string();
        for (_, value) in self.params() {
            stem.push('_');
            stem.push_str(&value);
        }
        stem
    }
}

/// Source of raw feed documents.
///
/// This abstraction allows the engine to be tested with canned XML.
// Only used as a generic bound; the engine awaits it on the calling task.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Fetch the raw XML body for `request`.
    async fn fetch(&self, request: &FeedRequest) -> Result<String, FeedError>;
}

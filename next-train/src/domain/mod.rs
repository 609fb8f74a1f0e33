//! Domain types for schedule resolution.
//!
//! These are request-scoped value types: stop identity from the stop store,
//! routes and directions from the feed, and the schedule tables the engine
//! produces. Validated types enforce their invariants at construction.

mod line;
mod route;
mod schedule;
mod stop;
mod time;

pub use line::{BranchRules, LineConfig, RouteSource};
pub use route::{Direction, DirectionCode, DirectionStop, RouteRef, ScheduledStop, StopSequence};
pub use schedule::{HopJourney, HopPlan, ScheduleLabel, ScheduleRow, ScheduleTable};
pub use stop::{Coordinates, InvalidStopId, StopId, StopRef};
pub use time::{LocalTime, TimeError, is_earlier};

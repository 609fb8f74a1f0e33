//! Schedule resolution and projection.
//!
//! Answers "when is the next train from here to there?" for one line:
//!
//! 1. Look up both stops' ids and the routes serving them
//! 2. Find a common route and the direction in which boarding comes first
//! 3. Pair the scheduled calls at both stops into observed trains
//! 4. Project the next two departures after now from the observed headway
//!
//! Lines whose branches share a trunk may need a change at a hub station,
//! handled by [`Engine::next_hop_trains`].

mod advisory;
mod clock;
mod config;
mod direction;
mod error;
mod lenient;
mod pipeline;
mod project;
mod routes;
mod schedule;


pub use advisory::{Advisory, Disruption, ServiceWindow, disruption_notice};
pub use clock::{OffsetStrategy, TimeProjector, frame_schedule, roll_forward_past};
pub use config::EngineConfig;
pub use direction::{resolve_direction, stop_order};
pub use error::{EngineError, Outcome, ProjectionError};
pub use lenient::Lenient;
pub use pipeline::Engine;
pub use project::{project_hop_train, project_next_train};
pub use routes::common_routes;
pub use schedule::assemble_schedule;

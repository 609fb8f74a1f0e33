//! Static stop metadata: ids, names, coordinates and line membership.
//!
//! Each line family keeps its stops in its own table. [`StopSnapshot`] holds
//! the tables in memory, loaded once from a JSON file at startup.

mod error;
mod snapshot;
mod store;

pub use error::StoreError;
pub use snapshot::StopSnapshot;
pub use store::{StopRecord, StopStore};

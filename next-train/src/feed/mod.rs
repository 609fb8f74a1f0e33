//! Realtime transit feed: transport and interpretation.
//!
//! This module fetches the feed's XML documents and translates them into
//! domain types. Key characteristics of the feed:
//! - Attributes are interpreted by **position**, not name; the mapping lives
//!   in one versioned table ([`FeedSchema`]) and is checked against the
//!   attribute names so that schema drift fails loudly
//! - Times are UNIX epoch seconds
//! - Four endpoint kinds: routes-by-stop, stops-by-route, schedule-by-route
//!   and server time

mod client;
mod error;
mod mock;
mod request;
mod scanner;
mod schema;

pub use client::{FeedClient, FeedConfig};
pub use error::FeedError;
pub use mock::MockFeed;
pub use request::{FeedRequest, FeedSource};
pub use scanner::{RawElement, scan, try_scan};
pub use schema::{FeedSchema, Field, V2};

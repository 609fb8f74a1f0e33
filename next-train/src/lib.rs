//! Next-train schedule resolution.
//!
//! Answers: "when is the next train from this stop to that one?" by reading
//! a realtime transit feed, matching it against static stop metadata and
//! projecting departures forward from the observed headway.

pub mod config;
pub mod domain;
pub mod engine;
pub mod feed;
pub mod stops;

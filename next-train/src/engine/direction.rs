//! Direction and stop-order resolution over a route's direction blocks.
//!
//! Both places appear once per direction. Walking the blocks in feed order,
//! the direction of travel is the first block in which the boarding place
//! is met before the destination.

use crate::domain::{Direction, DirectionCode, StopSequence};

/// Progress of the direction search.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DirectionState {
    /// No direction block seen yet.
    Searching,
    /// Inside a block; `forward` until the destination is met first.
    CandidateOpen { code: DirectionCode, forward: bool },
    Found(DirectionCode),
}

impl DirectionState {
    fn on_direction(self, code: &DirectionCode) -> Self {
        match self {
            DirectionState::Found(_) => self,
            _ => DirectionState::CandidateOpen {
                code: code.clone(),
                forward: true,
            },
        }
    }

    fn on_stop(self, name: &str, boarding: &str, destination: &str) -> Self {
        match self {
            DirectionState::CandidateOpen { code, forward }
                if name == boarding || name == destination =>
            {
                if name == boarding && forward {
                    DirectionState::Found(code)
                } else {
                    DirectionState::CandidateOpen {
                        code,
                        forward: false,
                    }
                }
            }
            other => other,
        }
    }

    fn is_found(&self) -> bool {
        matches!(self, DirectionState::Found(_))
    }
}

/// Direction code in which `boarding` comes before `destination`.
///
/// Names are compared exactly against the parent-station names.
pub fn resolve_direction(
    directions: &[Direction],
    boarding: &str,
    destination: &str,
) -> Option<DirectionCode> {
    let mut state = DirectionState::Searching;

    'blocks: for direction in directions {
        state = state.on_direction(&direction.code);
        for stop in &direction.stops {
            state = state.on_stop(&stop.parent_station_name, boarding, destination);
            if state.is_found() {
                break 'blocks;
            }
        }
    }

    match state {
        DirectionState::Found(code) => Some(code),
        _ => None,
    }
}

/// Sequence of the station named `parent_station_name` within the block
/// with code `direction`.
///
/// Names match case-insensitively after trimming; the first match wins.
pub fn stop_order(
    directions: &[Direction],
    direction: &DirectionCode,
    parent_station_name: &str,
) -> Option<StopSequence> {
    let wanted = parent_station_name.trim().to_lowercase();
    directions
        .iter()
        .filter(|d| &d.code == direction)
        .flat_map(|d| d.stops.iter())
        .find(|s| s.parent_station_name.trim().to_lowercase() == wanted)
        .map(|s| s.sequence)
}

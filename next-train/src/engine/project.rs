//! Projecting the next trains from an observed schedule.
//!
//! Travel time comes from the first observed train and the headway from the
//! last two; the projected table holds the next train after a bound and
//! the one a headway later.

use crate::domain::{LocalTime, ScheduleRow, ScheduleTable};

use super::clock::{TimeProjector, frame_schedule};
use super::error::ProjectionError;

/// Travel duration and headway, in minutes, if at least two trains are
/// observed.
fn observed_rhythm(table: &ScheduleTable) -> Option<(i64, i64, &ScheduleRow, &ScheduleRow)> {
    let [.., second_to_last, last] = table.trains.as_slice() else {
        return None;
    };
    let duration = table.travel_duration()?;
    let headway = last.departs_at.minutes_since(second_to_last.departs_at);
    Some((duration, headway, second_to_last, last))
}

/// The next train after now and the one after it.
///
/// With fewer than two observed trains the table is returned unchanged.
pub fn project_next_train(
    table: ScheduleTable,
    projector: &TimeProjector,
) -> Result<ScheduleTable, ProjectionError> {
    let Some((duration, headway, _, last)) = observed_rhythm(&table) else {
        return Ok(table);
    };

    let next = projector.roll_forward_until_future(last.departs_at, headway)?;
    frame_schedule(next, duration, headway, table.label)
}

/// The connecting train leaving the hub after `first_leg_arrival`.
///
/// Rolls forward from the second-to-last observed departure. With fewer than
/// two observed trains the connection cannot be projected and an empty
/// table is returned.
pub fn project_hop_train(
    table: ScheduleTable,
    first_leg_arrival: LocalTime,
    projector: &TimeProjector,
) -> Result<ScheduleTable, ProjectionError> {
    let Some((duration, headway, second_to_last, _)) = observed_rhythm(&table) else {
        return Ok(ScheduleTable::empty(table.label));
    };

    let next =
        projector.roll_forward_until_after(second_to_last.departs_at, first_leg_arrival, headway)?;
    frame_schedule(next, duration, headway, table.label)
}

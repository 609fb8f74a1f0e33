//! Assembling a schedule table from scheduled calls.

use crate::domain::{ScheduleLabel, ScheduleRow, ScheduleTable, ScheduledStop, StopSequence};

use super::clock::TimeProjector;
use super::error::ProjectionError;

/// Pair the calls at `boarding` and `destination` into trains.
///
/// Calls at either sequence are taken in feed order and paired two at a
/// time as (boarding, destination). The feed is expected to alternate the
/// two in train order; nothing is reordered. A trailing unpaired call is
/// dropped.
pub fn assemble_schedule(
    stops: &[ScheduledStop],
    boarding: StopSequence,
    destination: StopSequence,
    projector: &TimeProjector,
    label: ScheduleLabel,
) -> Result<ScheduleTable, ProjectionError> {
    let mut times = Vec::new();
    for stop in stops {
        if stop.sequence == boarding {
            times.push(projector.epoch_to_local(stop.epoch)?);
        }
        if stop.sequence == destination {
            times.push(projector.epoch_to_local(stop.epoch)?);
        }
    }

    let trains = times
        .chunks_exact(2)
        .map(|pair| ScheduleRow::new(pair[0], pair[1]))
        .collect();

    Ok(ScheduleTable::new(label, trains))
}

//! Epoch/local conversion and forward rollover of train times.

use std::str::FromStr;

use chrono::{DateTime, Duration, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{LocalTime, ScheduleLabel, ScheduleRow, ScheduleTable};

use super::error::ProjectionError;

/// Which UTC offset turns a feed epoch into a local wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OffsetStrategy {
    /// The zone's offset at the time of the call, applied to every epoch.
    ///
    /// Across a daylight-saving change this is off by the shift for epochs on
    /// the other side of it.
    #[default]
    CallTime,
    /// The zone's offset at each epoch's own instant.
    Instant,
}

impl FromStr for OffsetStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call-time" | "calltime" => Ok(Self::CallTime),
            "instant" => Ok(Self::Instant),
            other => Err(format!("unknown offset strategy: {other}")),
        }
    }
}

/// Converts feed epochs to local times and rolls schedules forward, relative
/// to a fixed "now".
#[derive(Debug, Clone, Copy)]
pub struct TimeProjector {
    now: DateTime<Utc>,
    timezone: Tz,
    strategy: OffsetStrategy,
}

impl TimeProjector {
    /// A projector whose "now" is the current system time.
    pub fn new(timezone: Tz, strategy: OffsetStrategy) -> Self {
        Self::at(Utc::now(), timezone, strategy)
    }

    /// A projector pinned to a given instant.
    pub fn at(now: DateTime<Utc>, timezone: Tz, strategy: OffsetStrategy) -> Self {
        Self {
            now,
            timezone,
            strategy,
        }
    }

    /// Local wall-clock "now", to the minute.
    pub fn now(&self) -> LocalTime {
        LocalTime::from_datetime(self.now.with_timezone(&self.timezone).naive_local())
    }

    /// "Now" as UNIX epoch seconds.
    pub fn now_epoch(&self) -> i64 {
        self.now.timestamp()
    }

    /// Convert feed epoch seconds to local time.
    pub fn epoch_to_local(&self, epoch: i64) -> Result<LocalTime, ProjectionError> {
        let instant = DateTime::from_timestamp(epoch, 0).ok_or_else(|| ProjectionError::OutOfRange {
            context: format!("epoch {epoch}"),
        })?;

        let local = match self.strategy {
            OffsetStrategy::CallTime => {
                let offset = self
                    .timezone
                    .offset_from_utc_datetime(&self.now.naive_utc())
                    .fix();
                instant.with_timezone(&offset).naive_local()
            }
            OffsetStrategy::Instant => instant.with_timezone(&self.timezone).naive_local(),
        };

        Ok(LocalTime::from_datetime(local))
    }

    /// Convert a local wall-clock time to epoch seconds, reading it as UTC.
    pub fn local_to_epoch(&self, time: LocalTime) -> i64 {
        time.to_datetime().and_utc().timestamp()
    }

    /// True if `time` is strictly after now.
    pub fn is_future(&self, time: LocalTime) -> bool {
        time > self.now()
    }

    /// Advance `start` by whole headways until it is strictly after now.
    pub fn roll_forward_until_future(
        &self,
        start: LocalTime,
        headway_minutes: i64,
    ) -> Result<LocalTime, ProjectionError> {
        roll_forward_past(start, self.now(), headway_minutes)
    }

    /// Advance `candidate` by whole headways until it is strictly after
    /// `reference`.
    pub fn roll_forward_until_after(
        &self,
        candidate: LocalTime,
        reference: LocalTime,
        headway_minutes: i64,
    ) -> Result<LocalTime, ProjectionError> {
        roll_forward_past(candidate, reference, headway_minutes)
    }
}

/// Smallest `start + k * headway` (k >= 0) strictly after `bound`.
pub fn roll_forward_past(
    start: LocalTime,
    bound: LocalTime,
    headway_minutes: i64,
) -> Result<LocalTime, ProjectionError> {
    if headway_minutes <= 0 {
        return Err(ProjectionError::NonPositiveHeadway {
            minutes: headway_minutes,
        });
    }

    if start > bound {
        return Ok(start);
    }

    let steps = bound.minutes_since(start) / headway_minutes + 1;
    add_minutes(start, steps * headway_minutes)
}

/// A two-train table: one leaving at `start`, the next one headway later.
pub fn frame_schedule(
    start: LocalTime,
    duration_minutes: i64,
    headway_minutes: i64,
    label: ScheduleLabel,
) -> Result<ScheduleTable, ProjectionError> {
    let second = add_minutes(start, headway_minutes)?;
    let rows = vec![
        ScheduleRow::new(start, add_minutes(start, duration_minutes)?),
        ScheduleRow::new(second, add_minutes(second, duration_minutes)?),
    ];
    Ok(ScheduleTable::new(label, rows))
}

fn add_minutes(time: LocalTime, minutes: i64) -> Result<LocalTime, ProjectionError> {
    Duration::try_minutes(minutes)
        .and_then(|d| time.checked_add(d))
        .ok_or_else(|| ProjectionError::OutOfRange {
            context: format!("{time:?} + {minutes} minutes"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn t(s: &str) -> LocalTime {
        LocalTime::parse_hhmm(s, date()).unwrap()
    }

    /// 2024-03-15 12:00 UTC, 08:00 in Boston (EDT, UTC-4).
    fn projector(strategy: OffsetStrategy) -> TimeProjector {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        TimeProjector::at(now, chrono_tz::America::New_York, strategy)
    }

    #[test]
    fn now_is_local() {
        let p = projector(OffsetStrategy::CallTime);
        assert_eq!(p.now(), t("08:00"));
        assert_eq!(p.now_epoch(), 1710504000);
    }

    #[test]
    fn epoch_to_local_uses_zone_offset() {
        let p = projector(OffsetStrategy::CallTime);
        // 2024-03-15 12:30 UTC
        assert_eq!(p.epoch_to_local(1710505800).unwrap(), t("08:30"));
    }

    #[test]
    fn offset_strategies_differ_across_dst_change() {
        // 2024-03-09 17:00 UTC is 12:00 EST (UTC-5), before the switch to EDT
        let epoch = Utc
            .with_ymd_and_hms(2024, 3, 9, 17, 0, 0)
            .unwrap()
            .timestamp();
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let call_time = projector(OffsetStrategy::CallTime).epoch_to_local(epoch).unwrap();
        let instant = projector(OffsetStrategy::Instant).epoch_to_local(epoch).unwrap();

        assert_eq!(call_time, LocalTime::parse_hhmm("13:00", day).unwrap());
        assert_eq!(instant, LocalTime::parse_hhmm("12:00", day).unwrap());
    }

    #[test]
    fn local_to_epoch_reads_wall_clock_as_utc() {
        let p = projector(OffsetStrategy::CallTime);
        assert_eq!(p.local_to_epoch(t("12:00")), 1710504000);
    }

    #[test]
    fn is_future_is_strict() {
        let p = projector(OffsetStrategy::CallTime);
        assert!(!p.is_future(t("07:59")));
        assert!(!p.is_future(t("08:00")));
        assert!(p.is_future(t("08:01")));
    }

    #[test]
    fn roll_forward_until_future() {
        let p = projector(OffsetStrategy::CallTime);
        assert_eq!(p.roll_forward_until_future(t("07:40"), 7).unwrap(), t("08:01"));
        assert_eq!(p.roll_forward_until_future(t("07:53"), 7).unwrap(), t("08:07"));
        assert_eq!(p.roll_forward_until_future(t("08:05"), 7).unwrap(), t("08:05"));
    }

    #[test]
    fn roll_forward_until_after_reference() {
        let p = projector(OffsetStrategy::CallTime);
        let next = p
            .roll_forward_until_after(t("08:10"), t("08:24"), 6)
            .unwrap();
        assert_eq!(next, t("08:28"));
    }

    #[test]
    fn rejects_non_positive_headway() {
        let p = projector(OffsetStrategy::CallTime);
        assert_eq!(
            p.roll_forward_until_future(t("07:00"), 0),
            Err(ProjectionError::NonPositiveHeadway { minutes: 0 })
        );
        assert!(p.roll_forward_until_after(t("07:00"), t("07:30"), -5).is_err());
    }

    #[test]
    fn rollover_crosses_midnight() {
        let late = LocalTime::parse_hhmm("23:55", date()).unwrap();
        let next = roll_forward_past(late, late, 10).unwrap();
        assert_eq!(next.to_string(), "00:05");
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn frame_schedule_has_two_trains() {
        let label = ScheduleLabel::new("Forest Hills", "Back Bay");
        let table = frame_schedule(t("08:02"), 12, 7, label).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.trains[0], ScheduleRow::new(t("08:02"), t("08:14")));
        assert_eq!(table.trains[1], ScheduleRow::new(t("08:09"), t("08:21")));
    }

    #[test]
    fn parse_offset_strategy() {
        assert_eq!("instant".parse(), Ok(OffsetStrategy::Instant));
        assert_eq!(" Call-Time ".parse(), Ok(OffsetStrategy::CallTime));
        assert!("later".parse::<OffsetStrategy>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn local(minutes: i64) -> LocalTime {
        let base = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        LocalTime::from_datetime(base + Duration::minutes(minutes))
    }

    proptest! {
        #[test]
        fn rollover_lands_after_bound_on_headway_grid(
            start in 0i64..2880,
            bound in 0i64..2880,
            headway in 1i64..120,
        ) {
            let start = local(start);
            let bound = local(bound);
            let t = roll_forward_past(start, bound, headway).unwrap();

            prop_assert!(t > bound);
            prop_assert!(t >= start);
            prop_assert_eq!(t.minutes_since(start) % headway, 0);
            // one headway earlier is not past the bound
            if t > start {
                let earlier = add_minutes(t, -headway).unwrap();
                prop_assert!(earlier <= bound);
            }
        }

        #[test]
        fn framed_second_train_keeps_duration(
            start in 0i64..1440,
            duration in 0i64..180,
            headway in 1i64..60,
        ) {
            let table = frame_schedule(local(start), duration, headway, ScheduleLabel::new("a", "b")).unwrap();
            prop_assert_eq!(table.row_count(), 3);
            prop_assert_eq!(table.trains[1].travel_minutes(), duration);
            prop_assert_eq!(table.trains[1].departs_at.minutes_since(table.trains[0].departs_at), headway);
        }
    }
}

//! Schedule tables: observed or projected trains between two places.

use serde::Serialize;

use super::{LocalTime, StopRef};

/// One observed or projected train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// When the train leaves the boarding place.
    pub departs_at: LocalTime,
    /// When the train reaches the destination place.
    pub arrives_at: LocalTime,
}

impl ScheduleRow {
    pub fn new(departs_at: LocalTime, arrives_at: LocalTime) -> Self {
        Self {
            departs_at,
            arrives_at,
        }
    }

    /// Travel time of this train in whole minutes.
    pub fn travel_minutes(&self) -> i64 {
        self.arrives_at.minutes_since(self.departs_at)
    }
}

/// The label row heading every schedule table.
///
/// Kept apart from the timing rows so it can never be read as a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleLabel {
    pub boarding: String,
    pub destination: String,
}

impl ScheduleLabel {
    pub fn new(boarding: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            boarding: boarding.into(),
            destination: destination.into(),
        }
    }

    /// Heading of the departure column: `"Arrives - <boarding> - By"`.
    pub fn departure_heading(&self) -> String {
        format!("Arrives - {} - By", self.boarding)
    }

    /// Heading of the arrival column: `"Reaches - <destination> - By"`.
    pub fn arrival_heading(&self) -> String {
        format!("Reaches - {} - By", self.destination)
    }
}

/// An ordered list of trains between two places, headed by a label row.
///
/// Row counts follow the label-first convention: a table with one train has
/// two rows, and inferring a headway needs at least three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTable {
    pub label: ScheduleLabel,
    pub trains: Vec<ScheduleRow>,
}

impl ScheduleTable {
    /// An empty table ("no prediction") for the given places.
    pub fn empty(label: ScheduleLabel) -> Self {
        Self {
            label,
            trains: Vec::new(),
        }
    }

    pub fn new(label: ScheduleLabel, trains: Vec<ScheduleRow>) -> Self {
        Self { label, trains }
    }

    /// Number of rows including the label row.
    pub fn row_count(&self) -> usize {
        self.trains.len() + 1
    }

    /// True if the table has no timing rows.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// The first train, if any.
    pub fn first_train(&self) -> Option<&ScheduleRow> {
        self.trains.first()
    }

    /// Departure of the first train from the boarding place.
    pub fn first_departure(&self) -> Option<LocalTime> {
        self.first_train().map(|row| row.departs_at)
    }

    /// Arrival of the first train at the destination ("reaches by").
    pub fn first_arrival(&self) -> Option<LocalTime> {
        self.first_train().map(|row| row.arrives_at)
    }

    /// Travel duration of the first train, in whole minutes.
    pub fn travel_duration(&self) -> Option<i64> {
        self.first_train().map(ScheduleRow::travel_minutes)
    }
}

impl Default for ScheduleTable {
    fn default() -> Self {
        Self::empty(ScheduleLabel::new("", ""))
    }
}

/// Resolution of a two-leg journey through a shared hub station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopPlan {
    pub hub_station: StopRef,
    /// When the first leg reaches the hub.
    pub first_leg_arrival: LocalTime,
    /// When the connecting train leaves the hub.
    pub second_leg_departure: LocalTime,
}

/// Both legs of a hop journey, plus the plan when the second leg is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopJourney {
    pub hub_station: StopRef,
    pub first_leg: ScheduleTable,
    /// Empty when the connecting leg could not be projected.
    pub second_leg: ScheduleTable,
}

impl HopJourney {
    /// The transfer plan, if both legs have a first train.
    pub fn plan(&self) -> Option<HopPlan> {
        Some(HopPlan {
            hub_station: self.hub_station.clone(),
            first_leg_arrival: self.first_leg.first_arrival()?,
            second_leg_departure: self.second_leg.first_departure()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;
    use chrono::NaiveDate;

    fn t(s: &str) -> LocalTime {
        LocalTime::parse_hhmm(s, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()).unwrap()
    }

    fn table(rows: &[(&str, &str)]) -> ScheduleTable {
        ScheduleTable::new(
            ScheduleLabel::new("Forest Hills", "Back Bay"),
            rows.iter().map(|(d, a)| ScheduleRow::new(t(d), t(a))).collect(),
        )
    }

    #[test]
    fn label_headings() {
        let label = ScheduleLabel::new("Forest Hills", "Back Bay");
        assert_eq!(label.departure_heading(), "Arrives - Forest Hills - By");
        assert_eq!(label.arrival_heading(), "Reaches - Back Bay - By");
    }

    #[test]
    fn row_count_includes_label() {
        assert_eq!(table(&[]).row_count(), 1);
        assert_eq!(table(&[("08:00", "08:12")]).row_count(), 2);
    }

    #[test]
    fn first_row_accessors() {
        let tbl = table(&[("08:00", "08:12"), ("08:07", "08:19")]);
        assert_eq!(tbl.first_departure(), Some(t("08:00")));
        assert_eq!(tbl.first_arrival(), Some(t("08:12")));
        assert_eq!(tbl.travel_duration(), Some(12));

        let empty = table(&[]);
        assert_eq!(empty.first_departure(), None);
        assert_eq!(empty.travel_duration(), None);
    }

    #[test]
    fn hop_plan_requires_both_legs() {
        let hub = StopRef::new(StopId::parse("70155").unwrap(), "Copley");
        let mut journey = HopJourney {
            hub_station: hub.clone(),
            first_leg: table(&[("08:00", "08:12")]),
            second_leg: table(&[("08:15", "08:30")]),
        };

        let plan = journey.plan().unwrap();
        assert_eq!(plan.hub_station, hub);
        assert_eq!(plan.first_leg_arrival, t("08:12"));
        assert_eq!(plan.second_leg_departure, t("08:15"));

        journey.second_leg = table(&[]);
        assert!(journey.plan().is_none());
    }
}

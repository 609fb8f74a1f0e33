//! The single translation table between feed attribute ordinals and meaning.
//!
//! Every ordinal the engine relies on is declared once in [`FeedSchema`],
//! together with the attribute name expected at that position. If the
//! upstream schema shifts, translation fails with
//! [`FeedError::SchemaDrift`] instead of silently reading the wrong field.

use crate::domain::{Direction, DirectionCode, DirectionStop, RouteRef, ScheduledStop, StopSequence};

use super::error::FeedError;
use super::scanner::{RawElement, try_scan};

/// One positional attribute: where it sits and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub ordinal: usize,
    pub name: &'static str,
}

impl Field {
    const fn new(ordinal: usize, name: &'static str) -> Self {
        Self { ordinal, name }
    }
}

/// A versioned mapping of feed ordinals per element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSchema {
    pub version: &'static str,
    /// `route`, routes-by-stop feed.
    pub route_id: Field,
    /// `direction`, stops-by-route feed.
    pub direction_code: Field,
    /// `stop`, stops-by-route feed.
    pub stop_order: Field,
    /// `stop`, stops-by-route feed.
    pub parent_station_name: Field,
    /// `stop`, schedule-by-route feed.
    pub schedule_sequence: Field,
    /// `stop`, schedule-by-route feed (epoch seconds).
    pub schedule_epoch: Field,
    /// Root element of the server-time feed (epoch seconds).
    pub server_time: Field,
}

/// Version 2 of the realtime developer API.
pub const V2: FeedSchema = FeedSchema {
    version: "v2",
    route_id: Field::new(0, "route_id"),
    direction_code: Field::new(0, "direction_id"),
    stop_order: Field::new(0, "stop_order"),
    parent_station_name: Field::new(4, "parent_station_name"),
    schedule_sequence: Field::new(0, "stop_sequence"),
    schedule_epoch: Field::new(3, "sch_arr_dt"),
    server_time: Field::new(2, "server_dt"),
};

impl Default for FeedSchema {
    fn default() -> Self {
        V2
    }
}

impl FeedSchema {
    /// Read `field` from `element`, checking the attribute name at its ordinal.
    fn read<'e>(
        &self,
        element: &'e RawElement,
        kind: &'static str,
        field: Field,
    ) -> Result<&'e str, FeedError> {
        match element.attribute(field.ordinal) {
            Some((name, value)) if name == field.name => Ok(value),
            other => Err(FeedError::SchemaDrift {
                element: kind,
                ordinal: field.ordinal,
                expected: field.name,
                found: other.map(|(name, _)| name.to_string()),
            }),
        }
    }

    fn read_sequence(
        &self,
        element: &RawElement,
        field: Field,
    ) -> Result<StopSequence, FeedError> {
        let raw = self.read(element, "stop", field)?;
        raw.parse()
            .map(StopSequence)
            .map_err(|_| FeedError::InvalidValue {
                element: "stop",
                field: field.name,
                value: raw.to_string(),
            })
    }

    fn read_epoch(
        &self,
        element: &RawElement,
        kind: &'static str,
        field: Field,
    ) -> Result<i64, FeedError> {
        let raw = self.read(element, kind, field)?;
        raw.parse().map_err(|_| FeedError::InvalidValue {
            element: kind,
            field: field.name,
            value: raw.to_string(),
        })
    }

    /// Route ids from a routes-by-stop document, in document order.
    pub fn routes(&self, xml: &str) -> Result<Vec<RouteRef>, FeedError> {
        try_scan(xml, &["route"])?
            .iter()
            .map(|e| self.read(e, "route", self.route_id).map(RouteRef::new))
            .collect()
    }

    /// Direction blocks from a stops-by-route document.
    ///
    /// Stops appearing before the first `direction` belong to no block and
    /// are dropped.
    pub fn directions(&self, xml: &str) -> Result<Vec<Direction>, FeedError> {
        let mut directions: Vec<Direction> = Vec::new();

        for element in try_scan(xml, &["direction", "stop"])? {
            if element.name == "direction" {
                let code = self.read(&element, "direction", self.direction_code)?;
                directions.push(Direction::new(DirectionCode::new(code)));
                continue;
            }

            let Some(current) = directions.last_mut() else {
                continue;
            };
            let sequence = self.read_sequence(&element, self.stop_order)?;
            let parent = self.read(&element, "stop", self.parent_station_name)?;
            current.stops.push(DirectionStop {
                sequence,
                parent_station_name: parent.to_string(),
            });
        }

        Ok(directions)
    }

    /// Scheduled calls from a schedule-by-route document, in document order.
    pub fn scheduled_stops(&self, xml: &str) -> Result<Vec<ScheduledStop>, FeedError> {
        try_scan(xml, &["stop"])?
            .iter()
            .map(|e| {
                Ok(ScheduledStop {
                    sequence: self.read_sequence(e, self.schedule_sequence)?,
                    epoch: self.read_epoch(e, "stop", self.schedule_epoch)?,
                })
            })
            .collect()
    }

    /// Epoch seconds from a server-time document (its first element).
    pub fn server_time(&self, xml: &str) -> Result<i64, FeedError> {
        let elements = try_scan(xml, &[])?;
        let root = elements.first().ok_or_else(|| FeedError::Xml {
            message: "empty server time document".to_string(),
        })?;
        self.read_epoch(root, "server_time", self.server_time)
    }
}

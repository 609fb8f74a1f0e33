//! The request pipeline: stop names in, projected schedules out.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{
    Coordinates, Direction, DirectionCode, HopJourney, LineConfig, RouteRef, RouteSource,
    ScheduleLabel, ScheduleTable, StopId, StopRef, StopSequence,
};
use crate::feed::{FeedRequest, FeedSchema, FeedSource};
use crate::stops::{StopRecord, StopStore};

use super::advisory::{Advisory, disruption_notice};
use super::clock::TimeProjector;
use super::config::EngineConfig;
use super::direction::{resolve_direction, stop_order};
use super::error::EngineError;
use super::project::{project_hop_train, project_next_train};
use super::routes::common_routes;
use super::schedule::assemble_schedule;

/// Resolves and projects trains for one request.
///
/// Holds no state beyond its collaborators and a fixed "now"; build one per
/// request.
pub struct Engine<'a, F: FeedSource, S: StopStore> {
    feed: &'a F,
    stops: &'a S,
    config: &'a EngineConfig,
    schema: FeedSchema,
    clock: TimeProjector,
}

impl<'a, F: FeedSource, S: StopStore> Engine<'a, F, S> {
    /// Create an engine whose "now" is the current time.
    pub fn new(feed: &'a F, stops: &'a S, config: &'a EngineConfig) -> Self {
        Self {
            feed,
            stops,
            config,
            schema: FeedSchema::default(),
            clock: TimeProjector::new(config.timezone, config.offset_strategy),
        }
    }

    /// Pin "now" to a given instant.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.clock = TimeProjector::at(now, self.config.timezone, self.config.offset_strategy);
        self
    }

    /// Read the feed with a different schema version.
    pub fn with_schema(mut self, schema: FeedSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn clock(&self) -> &TimeProjector {
        &self.clock
    }

    /// The feed server's clock, as epoch seconds.
    pub async fn feed_server_time(&self) -> Result<i64, EngineError> {
        let xml = self.feed.fetch(&FeedRequest::ServerTime).await?;
        Ok(self.schema.server_time(&xml)?)
    }

    // Stop metadata

    /// Id of the named stop on `line`.
    pub async fn stop_id(&self, line: &LineConfig, name: &str) -> Result<StopId, EngineError> {
        self.stops
            .find_id_by_name(&line.stop_table, name)
            .await?
            .ok_or_else(|| EngineError::StopNotFound {
                line: line.name.clone(),
                name: name.to_string(),
            })
    }

    /// True if `line` has a stop with exactly this name.
    pub async fn is_valid_stop(&self, line: &LineConfig, name: &str) -> Result<bool, EngineError> {
        Ok(self
            .stops
            .find_id_by_name(&line.stop_table, name)
            .await?
            .is_some())
    }

    /// Stop names on `line` containing `fragment`.
    pub async fn search_stops(
        &self,
        line: &LineConfig,
        fragment: &str,
    ) -> Result<Vec<String>, EngineError> {
        Ok(self
            .stops
            .search_by_partial_name(&line.stop_table, fragment)
            .await?)
    }

    pub async fn stop_coordinates(
        &self,
        line: &LineConfig,
        name: &str,
    ) -> Result<Coordinates, EngineError> {
        self.stops
            .coordinates_by_name(&line.stop_table, name)
            .await?
            .ok_or_else(|| EngineError::StopNotFound {
                line: line.name.clone(),
                name: name.to_string(),
            })
    }

    pub async fn all_stops(&self, line: &LineConfig) -> Result<Vec<StopRecord>, EngineError> {
        Ok(self.stops.all_stops(&line.stop_table).await?)
    }

    // Routes and directions

    /// Every route serving `stop`, from the line's route source.
    pub async fn routes_for_stop(
        &self,
        line: &LineConfig,
        stop: &StopId,
    ) -> Result<Vec<RouteRef>, EngineError> {
        let routes = match line.route_source {
            RouteSource::Feed => {
                let request = FeedRequest::RoutesByStop { stop: stop.clone() };
                let xml = self.feed.fetch(&request).await?;
                self.schema.routes(&xml)?
            }
            RouteSource::Store => {
                self.stops
                    .routes_by_stop_id(&line.stop_table, stop)
                    .await?
            }
        };
        debug!(stop = %stop, routes = routes.len(), "Routes for stop");
        Ok(routes)
    }

    /// Routes serving both stops, in boarding order.
    pub async fn common_routes(
        &self,
        line: &LineConfig,
        boarding: &StopId,
        destination: &StopId,
    ) -> Result<Vec<RouteRef>, EngineError> {
        let from = self.routes_for_stop(line, boarding).await?;
        let to = self.routes_for_stop(line, destination).await?;
        Ok(common_routes(&from, &to))
    }

    /// Direction blocks of a route.
    pub async fn directions(&self, route: &RouteRef) -> Result<Vec<Direction>, EngineError> {
        let request = FeedRequest::StopsByRoute {
            route: route.clone(),
        };
        let xml = self.feed.fetch(&request).await?;
        Ok(self.schema.directions(&xml)?)
    }

    /// Direction of `route` in which `boarding` precedes `destination`.
    pub async fn find_direction(
        &self,
        route: &RouteRef,
        boarding: &str,
        destination: &str,
    ) -> Result<DirectionCode, EngineError> {
        let directions = self.directions(route).await?;
        resolve_direction(&directions, boarding, destination).ok_or_else(|| {
            EngineError::NoDirection {
                boarding: boarding.to_string(),
                destination: destination.to_string(),
            }
        })
    }

    /// Sequence of a station within one direction of `route`.
    pub async fn stop_order(
        &self,
        route: &RouteRef,
        direction: &DirectionCode,
        parent_station_name: &str,
    ) -> Result<StopSequence, EngineError> {
        let directions = self.directions(route).await?;
        sequence_in(&directions, route, direction, parent_station_name)
    }

    // Schedules

    /// Observed trains on `route` between two stations, in feed order.
    pub async fn schedule(
        &self,
        route: &RouteRef,
        direction: &DirectionCode,
        boarding: &str,
        destination: &str,
    ) -> Result<ScheduleTable, EngineError> {
        let directions = self.directions(route).await?;
        self.schedule_in(&directions, route, direction, boarding, destination)
            .await
    }

    async fn schedule_in(
        &self,
        directions: &[Direction],
        route: &RouteRef,
        direction: &DirectionCode,
        boarding: &str,
        destination: &str,
    ) -> Result<ScheduleTable, EngineError> {
        let from = sequence_in(directions, route, direction, boarding)?;
        let to = sequence_in(directions, route, direction, destination)?;

        let request = FeedRequest::ScheduleByRoute {
            route: route.clone(),
            direction: direction.clone(),
        };
        let xml = self.feed.fetch(&request).await?;
        let calls = self.schema.scheduled_stops(&xml)?;

        let table = assemble_schedule(
            &calls,
            from,
            to,
            &self.clock,
            ScheduleLabel::new(boarding, destination),
        )?;
        debug!(
            route = %route,
            direction = %direction,
            from = %from,
            to = %to,
            trains = table.trains.len(),
            "Assembled schedule"
        );
        Ok(table)
    }

    /// Observed trains between two named stops on `line`.
    ///
    /// Tries the common routes in order and uses the first with a direction
    /// running from `boarding` to `destination`.
    pub async fn observed_trains(
        &self,
        line: &LineConfig,
        boarding: &str,
        destination: &str,
    ) -> Result<ScheduleTable, EngineError> {
        if boarding.trim() == destination.trim() {
            return Err(EngineError::SameEndpoints {
                name: boarding.trim().to_string(),
            });
        }

        let from = self.stop_id(line, boarding).await?;
        let to = self.stop_id(line, destination).await?;

        let routes = self.common_routes(line, &from, &to).await?;
        if routes.is_empty() {
            return Err(EngineError::NoCommonRoute {
                boarding: boarding.to_string(),
                destination: destination.to_string(),
            });
        }

        for route in &routes {
            let directions = self.directions(route).await?;
            let Some(direction) = resolve_direction(&directions, boarding, destination) else {
                debug!(route = %route, "No direction from boarding to destination");
                continue;
            };

            return self
                .schedule_in(&directions, route, &direction, boarding, destination)
                .await;
        }

        Err(EngineError::NoDirection {
            boarding: boarding.to_string(),
            destination: destination.to_string(),
        })
    }

    /// The next train from `boarding` to `destination` and the one after.
    pub async fn next_trains(
        &self,
        line: &LineConfig,
        boarding: &str,
        destination: &str,
    ) -> Result<ScheduleTable, EngineError> {
        let observed = self.observed_trains(line, boarding, destination).await?;
        let projected = project_next_train(observed, &self.clock)?;
        info!(
            line = %line.name,
            boarding,
            destination,
            next = ?projected.first_departure().map(|t| t.to_string()),
            "Projected next trains"
        );
        Ok(projected)
    }

    // Branch transfers

    /// The hub where riders between `boarding` and `destination` change
    /// branches.
    pub async fn hub_station(
        &self,
        line: &LineConfig,
        boarding: &StopId,
        destination: &StopId,
    ) -> Result<StopRef, EngineError> {
        let rules = line.branches.as_ref().ok_or_else(|| EngineError::NoBranches {
            line: line.name.clone(),
        })?;

        let from = self
            .stops
            .branch_label_by_id(&line.stop_table, boarding)
            .await?;
        let to = self
            .stops
            .branch_label_by_id(&line.stop_table, destination)
            .await?;
        let prefix = rules.hub_for(from.as_deref(), to.as_deref());

        self.stops
            .find_by_name_prefix(&line.stop_table, prefix)
            .await?
            .ok_or_else(|| EngineError::HubNotFound {
                line: line.name.clone(),
                prefix: prefix.to_string(),
            })
    }

    /// Both legs of a journey that changes branches at the line's hub.
    ///
    /// The first leg is projected as a normal journey to the hub. The second
    /// is the first connecting train leaving the hub after the first leg
    /// arrives; it is empty when the hub schedule shows fewer than two
    /// trains.
    ///
    /// A journey that starts or ends at the hub has no change to make. It is
    /// answered as a single leg: the second leg when boarding at the hub, the
    /// first leg when alighting there, with the other leg empty.
    pub async fn next_hop_trains(
        &self,
        line: &LineConfig,
        boarding: &str,
        destination: &str,
    ) -> Result<HopJourney, EngineError> {
        let from = self.stop_id(line, boarding).await?;
        let to = self.stop_id(line, destination).await?;
        let hub = self.hub_station(line, &from, &to).await?;
        debug!(line = %line.name, hub = %hub.name, "Resolved hub station");

        if hub.id == from || hub.id == to {
            debug!(line = %line.name, hub = %hub.name, "Journey starts or ends at the hub");
            let direct = self.next_trains(line, boarding, destination).await?;
            let (first_leg, second_leg) = if hub.id == from {
                (ScheduleTable::empty(ScheduleLabel::new(boarding, &hub.name)), direct)
            } else {
                (direct, ScheduleTable::empty(ScheduleLabel::new(&hub.name, destination)))
            };
            return Ok(HopJourney {
                hub_station: hub,
                first_leg,
                second_leg,
            });
        }

        let first_leg = self.next_trains(line, boarding, &hub.name).await?;
        let observed = self.observed_trains(line, &hub.name, destination).await?;

        let second_leg = match first_leg.first_arrival() {
            Some(reach) => project_hop_train(observed, reach, &self.clock)?,
            None => ScheduleTable::empty(observed.label),
        };

        Ok(HopJourney {
            hub_station: hub,
            first_leg,
            second_leg,
        })
    }

    // Advisories

    /// True if now falls in the nightly shutdown.
    pub fn is_overnight_shutdown(&self) -> bool {
        self.config
            .service_window
            .contains(self.clock.now().time())
    }

    /// The disruption notice for a journey, if an endpoint is affected.
    pub fn disruption_notice(&self, boarding: &str, destination: &str) -> Option<&str> {
        disruption_notice(&self.config.disruptions, boarding, destination)
    }

    pub fn advisories(&self, boarding: &str, destination: &str) -> Advisory {
        Advisory {
            overnight_shutdown: self.is_overnight_shutdown(),
            disruption: self
                .disruption_notice(boarding, destination)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn sequence_in(
    directions: &[Direction],
    route: &RouteRef,
    direction: &DirectionCode,
    station: &str,
) -> Result<StopSequence, EngineError> {
    stop_order(directions, direction, station).ok_or_else(|| EngineError::StopOrderNotFound {
        route: route.clone(),
        direction: direction.clone(),
        station: station.to_string(),
    })
}

//! Upcoming-trip matching over a decoded trip-update feed.
//!
//! A trip qualifies when it stops at the departure station with a departure
//! time inside `[now, now + lookahead]` and the same trip also lists the
//! destination station. Results are ordered by the numeric departure time;
//! the formatted string is for display only.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::format_departure;
use crate::config::{BriefingConfig, DEFAULT_LOOKAHEAD_SECS, StationPair};
use crate::error::ConfigError;
use crate::gtfs_rt::FeedMessage;
use crate::gtfs_rt::trip_update::StopTimeUpdate;

/// How the destination must relate to the departure stop within a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The destination appears anywhere else in the trip's stop list,
    /// including before the departure stop.
    #[default]
    AnywhereInTrip,
    /// The destination appears later in the stop list than the departure stop.
    DestinationAfter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedTrip {
    pub route_id: String,
    /// Unix epoch seconds.
    pub departure_time: i64,
    pub departure_time_formatted: String,
    pub destination_station: String,
}

#[derive(Debug, Clone)]
pub struct TripMatcher {
    tz: Tz,
    lookahead_secs: i64,
    mode: MatchMode,
}

impl TripMatcher {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            lookahead_secs: DEFAULT_LOOKAHEAD_SECS,
            mode: MatchMode::default(),
        }
    }

    pub fn from_config(config: &BriefingConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.tz()?)
            .with_lookahead_secs(config.lookahead_secs)
            .with_mode(config.match_mode))
    }

    pub fn with_lookahead_secs(mut self, lookahead_secs: i64) -> Self {
        self.lookahead_secs = lookahead_secs;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Lists the trips leaving `departure` within the lookahead window that
    /// also serve `destination`, earliest first.
    ///
    /// A trip listing the departure station twice yields two entries.
    pub fn find_upcoming_trips<Z: TimeZone>(
        &self,
        feed: &FeedMessage,
        departure: &str,
        destination: &str,
        now: &DateTime<Z>,
    ) -> Vec<MatchedTrip> {
        let window_start = now.timestamp();
        let window_end = window_start.saturating_add(self.lookahead_secs);

        let mut trips = Vec::new();

        for entity in &feed.entity {
            let Some(trip_update) = &entity.trip_update else {
                continue;
            };
            let stops = &trip_update.stop_time_update;

            for (idx, stop) in stops.iter().enumerate() {
                if stop.stop_id.as_deref() != Some(departure) {
                    continue;
                }

                let Some(departs_at) = stop.departure.as_ref().and_then(|d| d.time) else {
                    debug!(entity_id = %entity.id, stop_id = departure, "Stop has no departure time, skipping");
                    continue;
                };

                if departs_at < window_start || departs_at > window_end {
                    continue;
                }

                if !self.serves_destination(stops, idx, destination) {
                    continue;
                }

                let Some(formatted) = format_departure(departs_at, self.tz) else {
                    warn!(entity_id = %entity.id, departs_at, "Departure time out of range, skipping");
                    continue;
                };

                trips.push(MatchedTrip {
                    route_id: trip_update.trip.route_id.clone().unwrap_or_default(),
                    departure_time: departs_at,
                    departure_time_formatted: formatted,
                    destination_station: destination.to_string(),
                });
            }
        }

        // stable, so equal times keep feed order
        trips.sort_by_key(|t| t.departure_time);

        debug!(
            departure,
            destination,
            window_start,
            window_end,
            matched = trips.len(),
            "Trip matching complete"
        );
        trips
    }

    /// Runs [`find_upcoming_trips`](Self::find_upcoming_trips) for each pair.
    pub fn itineraries<'a, Z: TimeZone>(
        &self,
        feed: &FeedMessage,
        pairs: &'a [StationPair],
        now: &DateTime<Z>,
    ) -> Vec<(&'a StationPair, Vec<MatchedTrip>)> {
        pairs
            .iter()
            .map(|pair| {
                let trips = self.find_upcoming_trips(feed, &pair.departure, &pair.destination, now);
                (pair, trips)
            })
            .collect()
    }

    fn serves_destination(&self, stops: &[StopTimeUpdate], from: usize, destination: &str) -> bool {
        let is_destination = |(idx, stop): &(usize, &StopTimeUpdate)| {
            *idx != from && stop.stop_id.as_deref() == Some(destination)
        };

        match self.mode {
            MatchMode::AnywhereInTrip => stops.iter().enumerate().any(|s| is_destination(&s)),
            MatchMode::DestinationAfter => stops
                .iter()
                .enumerate()
                .skip(from + 1)
                .any(|s| is_destination(&s)),
        }
    }
}

//! The daily briefing: transit itineraries and alerts plus the weather,
//! quote and packing-list sections around them.
//!
//! [`Briefing::gather`] fans the independent lookups out concurrently and
//! joins them before anything is rendered. Each section degrades on its own;
//! only a bad configuration fails the whole briefing.

pub mod packing;
pub mod quote;
pub mod weather;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::alerts::alerts_or_unavailable;
use crate::clock::{next_workday, now_in};
use crate::config::{BriefingConfig, Location, Podcast, StationPair};
use crate::error::{ConfigError, FeedError};
use crate::fetch::{FeedFetcher, HttpClient};
use crate::matcher::{MatchedTrip, TripMatcher};

use quote::QuoteClient;
use weather::{Conditions, Forecast, WeatherClient};

pub use packing::packing_list;

#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub location: Location,
    pub current: Option<Conditions>,
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone)]
pub struct Itinerary {
    pub pair: StationPair,
    pub trips: Vec<MatchedTrip>,
}

#[derive(Debug)]
pub struct Briefing {
    pub generated_at: DateTime<Tz>,
    pub workday: NaiveDate,
    pub quote: String,
    /// Empty when no weather API key is configured.
    pub weather: Vec<WeatherReport>,
    pub packing: Vec<String>,
    /// `Err` when the trip-update feed could not be fetched or decoded.
    pub itineraries: Result<Vec<Itinerary>, FeedError>,
    pub alerts: Vec<String>,
    pub podcasts: Vec<Podcast>,
}

impl Briefing {
    pub async fn gather<C: HttpClient + Clone>(
        config: &BriefingConfig,
        client: C,
    ) -> Result<Self, ConfigError> {
        let now = now_in(config.tz()?);
        Self::gather_at(config, client, now).await
    }

    /// [`gather`](Self::gather) with an explicit "now", which fixes both the
    /// lookahead window and the forecast workday.
    #[tracing::instrument(skip_all, fields(now = %now))]
    pub async fn gather_at<C: HttpClient + Clone>(
        config: &BriefingConfig,
        client: C,
        now: DateTime<Tz>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let tz = config.tz()?;
        let matcher = TripMatcher::from_config(config)?;
        let now = now.with_timezone(&tz);
        let workday = next_workday(&now);

        let fetcher = FeedFetcher::new(client.clone(), &config.feeds);
        let quotes = QuoteClient::new(client.clone(), &config.quote_url);

        let api_key = config
            .weather
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok());
        let weather_client = api_key
            .map(|key| WeatherClient::new(client, &config.weather.base_url, &key, tz));
        if weather_client.is_none() {
            warn!("No OpenWeatherMap API key configured, skipping weather");
        }

        let weather_reports = async {
            let Some(weather) = &weather_client else {
                return Vec::new();
            };
            let (home, office) = tokio::join!(
                weather_report(weather, &config.weather.home, workday),
                weather_report(weather, &config.weather.office, workday),
            );
            vec![home, office]
        };

        let (trip_feed, alert_feed, quote, weather) = tokio::join!(
            fetcher.fetch_trip_updates(),
            fetcher.fetch_alerts(),
            quotes.fetch_or_fallback(),
            weather_reports,
        );

        let itineraries = trip_feed.map(|feed| {
            matcher
                .itineraries(&feed, &config.station_pairs, &now)
                .into_iter()
                .map(|(pair, trips)| Itinerary {
                    pair: pair.clone(),
                    trips,
                })
                .collect::<Vec<_>>()
        });
        if let Err(e) = &itineraries {
            warn!(error = %e, "Trip-update feed unavailable");
        }

        let alerts = alerts_or_unavailable(&alert_feed, config.alert_keyword.as_deref());

        let office_forecast = weather
            .iter()
            .find(|r| r.location.zip == config.weather.office.zip)
            .and_then(|r| r.forecast.as_ref())
            .map(|f| &f.conditions);
        let packing = packing_list(office_forecast);

        info!(
            workday = %workday,
            alerts = alerts.len(),
            transit_ok = itineraries.is_ok(),
            "Briefing gathered"
        );

        Ok(Self {
            generated_at: now,
            workday,
            quote,
            weather,
            packing,
            itineraries,
            alerts,
            podcasts: config.podcasts.clone(),
        })
    }
}

async fn weather_report<C: HttpClient>(
    client: &WeatherClient<C>,
    location: &Location,
    workday: NaiveDate,
) -> WeatherReport {
    let (current, forecast) = tokio::join!(
        client.current(&location.zip),
        client.forecast_for(&location.zip, workday),
    );

    WeatherReport {
        location: location.clone(),
        current: current
            .inspect_err(|e| warn!(zip = %location.zip, error = %e, "Current weather unavailable"))
            .ok(),
        forecast: forecast
            .inspect_err(|e| warn!(zip = %location.zip, error = %e, "Forecast unavailable"))
            .ok()
            .flatten(),
    }
}

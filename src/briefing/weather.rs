//! OpenWeatherMap current conditions and workday forecast.

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::local_time;
use crate::error::FeedError;
use crate::fetch::auth::UrlParam;
use crate::fetch::{HttpClient, fetch_json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    /// Degrees Fahrenheit.
    pub temp: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub date: NaiveDate,
    pub conditions: Conditions,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Description {
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: Main,
    #[serde(default)]
    weather: Vec<Description>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    /// Unix epoch seconds.
    dt: i64,
    main: Main,
    #[serde(default)]
    weather: Vec<Description>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

fn conditions(main: &Main, weather: &[Description]) -> Conditions {
    Conditions {
        temp: main.temp,
        condition: weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
    }
}

/// Imperial-unit lookups by US ZIP code, keyed with the `appid` parameter.
pub struct WeatherClient<C> {
    client: UrlParam<C>,
    base_url: String,
    tz: Tz,
}

impl<C: HttpClient> WeatherClient<C> {
    pub fn new(client: C, base_url: &str, api_key: &str, tz: Tz) -> Self {
        Self {
            client: UrlParam::new(client, "appid", api_key),
            base_url: base_url.trim_end_matches('/').to_string(),
            tz,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn current(&self, zip: &str) -> Result<Conditions, FeedError> {
        let url = format!("{}/weather?zip={zip},us&units=imperial", self.base_url);
        let resp: CurrentResponse = fetch_json(&self.client, &url).await?;
        Ok(conditions(&resp.main, &resp.weather))
    }

    /// Forecast entry closest to local noon on `day`, if the forecast reaches it.
    #[tracing::instrument(skip(self))]
    pub async fn forecast_for(&self, zip: &str, day: NaiveDate) -> Result<Option<Forecast>, FeedError> {
        let url = format!("{}/forecast?zip={zip},us&units=imperial", self.base_url);
        let resp: ForecastResponse = fetch_json(&self.client, &url).await?;
        Ok(closest_to_noon(&resp.list, day, self.tz))
    }
}

/// Picks the entry on `day` (local time) whose hour is nearest 12:00; the
/// earliest entry wins ties.
pub fn closest_to_noon(entries: &[ForecastEntry], day: NaiveDate, tz: Tz) -> Option<Forecast> {
    entries
        .iter()
        .filter_map(|entry| local_time(entry.dt, tz).map(|local| (entry, local)))
        .filter(|(_, local)| local.date_naive() == day)
        .min_by_key(|(_, local)| (local.hour() as i32 - 12).abs())
        .map(|(entry, local)| Forecast {
            date: local.date_naive(),
            conditions: conditions(&entry.main, &entry.weather),
        })
}

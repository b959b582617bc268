//! Runtime configuration.
//!
//! Every knob has a built-in default matching the BART commute, so the
//! binary runs without a file. A JSON file can override any subset:
//!
//! ```json
//! {
//!   "timezone": "America/Los_Angeles",
//!   "lookahead_secs": 3600,
//!   "match_mode": "destination_after",
//!   "station_pairs": [{ "departure": "DALY", "destination": "12TH" }]
//! }
//! ```

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::matcher::MatchMode;

pub const DEFAULT_LOOKAHEAD_SECS: i64 = 3600;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    pub feeds: FeedEndpoints,
    /// IANA timezone used for "now", the lookahead window and display.
    pub timezone: String,
    pub lookahead_secs: i64,
    pub match_mode: MatchMode,
    pub station_pairs: Vec<StationPair>,
    /// Only keep alerts whose description mentions this text (case-insensitive).
    pub alert_keyword: Option<String>,
    pub weather: WeatherConfig,
    pub quote_url: String,
    pub podcasts: Vec<Podcast>,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            feeds: FeedEndpoints::default(),
            timezone: "America/Los_Angeles".to_string(),
            lookahead_secs: DEFAULT_LOOKAHEAD_SECS,
            match_mode: MatchMode::default(),
            station_pairs: vec![
                StationPair::new("DALY", "12TH", "Daly City to 12th St Oakland"),
                StationPair::new("12TH", "MLPT", "12th St Oakland toward Milpitas"),
                StationPair::new("12TH", "DALY", "12th St Oakland to Daly City"),
            ],
            alert_keyword: None,
            weather: WeatherConfig::default(),
            quote_url: "https://zenquotes.io/api/random".to_string(),
            podcasts: vec![
                Podcast::new(
                    "The Best One Yet (TBOY)",
                    "https://open.spotify.com/show/5RllMBgvDnTau8nnsCUdse",
                ),
                Podcast::new(
                    "Morning Brew Daily",
                    "https://open.spotify.com/show/7nc7OQdPTekErtFSRxOBKh",
                ),
                Podcast::new(
                    "NPR Life Kit",
                    "https://open.spotify.com/show/5J0xAfsLX7bEYzGxOin4Sd",
                ),
            ],
        }
    }
}

impl BriefingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `--strict-direction`: require the destination after the departure stop.
    /// `false` leaves the configured mode untouched.
    pub fn with_strict_direction(mut self, strict: bool) -> Self {
        if strict {
            self.match_mode = MatchMode::DestinationAfter;
        }
        self
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;

        if self.lookahead_secs < 0 {
            return Err(ConfigError::Invalid(format!(
                "lookahead_secs must not be negative (got {})",
                self.lookahead_secs
            )));
        }

        if let Some(pair) = self
            .station_pairs
            .iter()
            .find(|p| p.departure.is_empty() || p.destination.is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "station pair {pair:?} has an empty station code"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedEndpoints {
    pub trip_updates_url: String,
    pub alerts_url: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            trip_updates_url: "https://api.bart.gov/gtfsrt/tripupdate.aspx".to_string(),
            alerts_url: "https://api.bart.gov/gtfsrt/alerts.aspx".to_string(),
        }
    }
}

/// One origin/destination query against the trip-update feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationPair {
    pub departure: String,
    pub destination: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl StationPair {
    pub fn new(departure: &str, destination: &str, label: &str) -> Self {
        Self {
            departure: departure.to_string(),
            destination: destination.to_string(),
            label: Some(label.to_string()),
        }
    }

    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{} to {}", self.departure, self.destination))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// Falls back to `OPENWEATHER_API_KEY` when absent.
    pub api_key: Option<String>,
    pub home: Location,
    pub office: Location,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: None,
            home: Location {
                label: "Home (Mountain View)".to_string(),
                zip: "94040".to_string(),
            },
            office: Location {
                label: "Office (Oakland)".to_string(),
                zip: "94612".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Podcast {
    pub title: String,
    pub url: String,
}

impl Podcast {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub label: String,
    pub zip: String,
}

//! Output formatting for matched trips and the assembled briefing.
//!
//! Supports pretty-printing, JSON, CSV append and the plain-text page.

use anyhow::Result;
use std::fmt::{self, Write as _};
use tracing::{debug, info};

use crate::briefing::{Briefing, WeatherReport};
use crate::clock::format_day;
use crate::matcher::MatchedTrip;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

pub const NO_TRAINS: &str = "No trains available in this time window.";
pub const TRANSIT_UNAVAILABLE: &str = "Real-time departures unavailable.";

/// Renders e.g. `Monday, March 3 2025 6:00 AM PST`.
const GENERATED_FORMAT: &str = "%A, %B %-d %Y %-I:%M %p %Z";

/// Logs trips using Rust's debug pretty-print format.
pub fn print_pretty(trips: &[MatchedTrip]) {
    debug!("{:#?}", trips);
}

/// Logs trips as pretty-printed JSON.
pub fn print_json(trips: &[MatchedTrip]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(trips)?);
    Ok(())
}

/// Appends one CSV row per trip, writing the header only for a new file.
pub fn append_trips(path: &str, trips: &[MatchedTrip]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = trips.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for trip in trips {
        writer.serialize(trip)?;
    }
    writer.flush()?;

    Ok(())
}

/// One display line per trip, or a single placeholder line.
pub fn trip_lines(trips: &[MatchedTrip]) -> Vec<String> {
    if trips.is_empty() {
        return vec![NO_TRAINS.to_string()];
    }

    trips
        .iter()
        .map(|t| {
            format!(
                "Train on {} to {} departing {}",
                t.route_id, t.destination_station, t.departure_time_formatted
            )
        })
        .collect()
}

/// Renders the whole briefing as a plain-text page.
pub fn render_briefing(briefing: &Briefing) -> Result<String, fmt::Error> {
    let mut page = String::new();
    write_briefing(&mut page, briefing)?;
    Ok(page)
}

pub fn write_briefing<W: fmt::Write>(out: &mut W, briefing: &Briefing) -> fmt::Result {
    let workday = format_day(briefing.workday);

    writeln!(
        out,
        "Generated {}\n",
        briefing.generated_at.format(GENERATED_FORMAT)
    )?;

    writeln!(out, "== Daily Motivation ==")?;
    writeln!(out, "{}\n", briefing.quote)?;

    writeln!(out, "== Weather for {workday} ==")?;
    if briefing.weather.is_empty() {
        writeln!(out, "Weather unavailable.")?;
    }
    for report in &briefing.weather {
        write_weather(out, report)?;
    }
    writeln!(out)?;

    writeln!(out, "== Packing Checklist ==")?;
    for item in &briefing.packing {
        writeln!(out, "[ ] {item}")?;
    }
    writeln!(out)?;

    if !briefing.podcasts.is_empty() {
        writeln!(out, "== Podcasts ==")?;
        for podcast in &briefing.podcasts {
            writeln!(out, "{}: {}", podcast.title, podcast.url)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "== BART Alerts ==")?;
    for alert in &briefing.alerts {
        writeln!(out, "{alert}")?;
    }
    writeln!(out)?;

    match &briefing.itineraries {
        Ok(itineraries) => {
            for itinerary in itineraries {
                writeln!(out, "== {} ==", itinerary.pair.display_name())?;
                for line in trip_lines(&itinerary.trips) {
                    writeln!(out, "{line}")?;
                }
                writeln!(out)?;
            }
        }
        Err(_) => {
            writeln!(out, "== BART Real-Time Departures ==")?;
            writeln!(out, "{TRANSIT_UNAVAILABLE}")?;
        }
    }

    Ok(())
}

fn write_weather<W: fmt::Write>(out: &mut W, report: &WeatherReport) -> fmt::Result {
    writeln!(out, "{}", report.location.label)?;
    match &report.current {
        Some(c) => writeln!(out, "  Current: {}°F, {}", c.temp, c.condition)?,
        None => writeln!(out, "  Error fetching current weather")?,
    }
    match &report.forecast {
        Some(f) => writeln!(
            out,
            "  Forecast for {}: {}°F, {}",
            format_day(f.date),
            f.conditions.temp,
            f.conditions.condition
        )?,
        None => writeln!(out, "  Error fetching forecast")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefing::Itinerary;
    use crate::briefing::weather::{Conditions, Forecast};
    use crate::config::{Location, Podcast, StationPair};
    use crate::error::FeedError;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_trip() -> MatchedTrip {
        MatchedTrip {
            route_id: "ORANGE".to_string(),
            departure_time: 1741011000,
            departure_time_formatted: "Monday, March 3 at 6:10 AM".to_string(),
            destination_station: "12TH".to_string(),
        }
    }

    fn sample_briefing(itineraries: Result<Vec<Itinerary>, FeedError>) -> Briefing {
        let office = Location {
            label: "Office (Oakland)".to_string(),
            zip: "94612".to_string(),
        };
        Briefing {
            generated_at: crate::clock::local_time(1741010400, chrono_tz::America::Los_Angeles)
                .unwrap(),
            workday: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            quote: "Well begun is half done. - Aristotle".to_string(),
            weather: vec![WeatherReport {
                location: office,
                current: Some(Conditions {
                    temp: 52.0,
                    condition: "light rain".to_string(),
                }),
                forecast: None,
            }],
            packing: vec!["Laptop".to_string(), "Umbrella".to_string()],
            itineraries,
            alerts: vec![crate::alerts::NO_ACTIVE_ALERTS.to_string()],
            podcasts: vec![Podcast::new(
                "NPR Life Kit",
                "https://open.spotify.com/show/5J0xAfsLX7bEYzGxOin4Sd",
            )],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&[sample_trip()]);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&[sample_trip()]).unwrap();
    }

    #[test]
    fn test_append_trips_writes_header_once() {
        let path = temp_path("commute_briefing_test_header.csv");
        let _ = fs::remove_file(&path);

        append_trips(&path, &[sample_trip()]).unwrap();
        append_trips(&path, &[sample_trip(), sample_trip()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "route_id,departure_time,departure_time_formatted,destination_station"
        );
        assert_eq!(lines.iter().filter(|l| l.starts_with("route_id")).count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_trip_lines_placeholder_when_empty() {
        assert_eq!(trip_lines(&[]), vec![NO_TRAINS]);
        assert_eq!(
            trip_lines(&[sample_trip()]),
            vec!["Train on ORANGE to 12TH departing Monday, March 3 at 6:10 AM"]
        );
    }

    #[test]
    fn test_render_briefing_sections() {
        let itinerary = Itinerary {
            pair: StationPair::new("DALY", "12TH", "Daly City to 12th St Oakland"),
            trips: vec![sample_trip()],
        };
        let page = render_briefing(&sample_briefing(Ok(vec![itinerary]))).unwrap();

        assert!(page.starts_with("Generated Monday, March 3 2025 6:00 AM PST\n"));
        assert!(page.contains("== Weather for Monday, March 3 =="));
        assert!(page.contains("  Current: 52°F, light rain"));
        assert!(page.contains("  Error fetching forecast"));
        assert!(page.contains("[ ] Umbrella"));
        assert!(page.contains(crate::alerts::NO_ACTIVE_ALERTS));
        assert!(page.contains("== Daly City to 12th St Oakland =="));
        assert!(page.contains("departing Monday, March 3 at 6:10 AM"));
        assert!(page.contains(
            "== Podcasts ==\nNPR Life Kit: https://open.spotify.com/show/5J0xAfsLX7bEYzGxOin4Sd\n"
        ));
    }

    #[test]
    fn test_forecast_line_uses_forecast_date() {
        let mut briefing = sample_briefing(Ok(vec![]));
        briefing.weather[0].forecast = Some(Forecast {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            conditions: Conditions {
                temp: 61.0,
                condition: "clear sky".to_string(),
            },
        });

        let page = render_briefing(&briefing).unwrap();

        assert!(page.contains("  Forecast for Tuesday, March 4: 61°F, clear sky"));
    }

    #[test]
    fn test_podcast_section_omitted_when_empty() {
        let mut briefing = sample_briefing(Ok(vec![]));
        briefing.podcasts.clear();

        let page = render_briefing(&briefing).unwrap();

        assert!(!page.contains("== Podcasts =="));
    }

    #[test]
    fn test_render_briefing_degrades_without_transit() {
        let err = FeedError::InvalidUrl("relative URL without a base".to_string());
        let page = render_briefing(&sample_briefing(Err(err))).unwrap();

        assert!(page.contains(TRANSIT_UNAVAILABLE));
        assert!(page.contains("== Daily Motivation =="));
    }
}

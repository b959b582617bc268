//! Local-time helpers: "now" in the briefing timezone, departure formatting
//! and workday selection.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Renders e.g. `Monday, March 3 at 7:05 AM`.
pub const DEPARTURE_FORMAT: &str = "%A, %B %-d at %-I:%M %p";

/// Renders e.g. `Monday, March 3`.
pub const DAY_FORMAT: &str = "%A, %B %-d";

pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Converts Unix epoch seconds to a local date-time, `None` if out of range.
pub fn local_time(epoch_secs: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(epoch_secs, 0).map(|utc| utc.with_timezone(&tz))
}

pub fn format_departure(epoch_secs: i64, tz: Tz) -> Option<String> {
    local_time(epoch_secs, tz).map(|local| local.format(DEPARTURE_FORMAT).to_string())
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// The workday a commuter is planning for.
///
/// Before local noon that is today, from noon on it is tomorrow; either way
/// Saturdays and Sundays roll forward to Monday.
pub fn next_workday<Z: TimeZone>(now: &DateTime<Z>) -> NaiveDate {
    let today = now.date_naive();
    let mut day = if now.hour() >= 12 {
        today + Days::new(1)
    } else {
        today
    };

    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day = day + Days::new(1);
    }

    day
}

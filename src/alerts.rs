//! Service alert extraction.
//!
//! The result is always non-empty: a failed fetch and a quiet feed each map
//! to their own single sentinel line, so callers can render it directly.

use tracing::{debug, warn};

use crate::error::FeedError;
use crate::gtfs_rt::FeedMessage;

pub const ALERTS_UNAVAILABLE: &str = "Alerts unavailable.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts.";

/// Description text of every alert in the feed, first translation only.
///
/// Alerts without any description translation are skipped.
pub fn all_alerts(feed: &FeedMessage) -> Vec<String> {
    alerts_matching(feed, None)
}

/// Like [`all_alerts`], keeping only descriptions that contain `keyword`
/// (case-insensitive) when one is given.
pub fn alerts_matching(feed: &FeedMessage, keyword: Option<&str>) -> Vec<String> {
    let needle = keyword.map(str::to_lowercase);

    let alerts: Vec<String> = feed
        .entity
        .iter()
        .filter_map(|entity| {
            let alert = entity.alert.as_ref()?;
            let text = alert
                .description_text
                .as_ref()
                .and_then(|d| d.translation.first())
                .map(|t| t.text.clone());
            if text.is_none() {
                debug!(entity_id = %entity.id, "Alert has no description translation, skipping");
            }
            text
        })
        .filter(|text| match &needle {
            Some(needle) => text.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    if alerts.is_empty() {
        vec![NO_ACTIVE_ALERTS.to_string()]
    } else {
        alerts
    }
}

/// Collapses a fetch result into display lines; failures become
/// [`ALERTS_UNAVAILABLE`].
pub fn alerts_or_unavailable(
    result: &Result<FeedMessage, FeedError>,
    keyword: Option<&str>,
) -> Vec<String> {
    match result {
        Ok(feed) => alerts_matching(feed, keyword),
        Err(e) => {
            warn!(error = %e, "Alerts feed unavailable");
            vec![ALERTS_UNAVAILABLE.to_string()]
        }
    }
}

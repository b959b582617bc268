use tracing::{debug, info};

use super::{BasicClient, HttpClient, fetch_bytes};
use crate::config::FeedEndpoints;
use crate::error::FeedError;
use crate::gtfs_rt::FeedMessage;
use crate::parser::parse_feed;

/// Retrieves and decodes the trip-update and alert feeds.
///
/// Every call is a fresh round trip; nothing is cached between calls.
pub struct FeedFetcher<C = BasicClient> {
    client: C,
    trip_updates_url: String,
    alerts_url: String,
}

impl<C: HttpClient> FeedFetcher<C> {
    pub fn new(client: C, endpoints: &FeedEndpoints) -> Self {
        Self {
            client,
            trip_updates_url: endpoints.trip_updates_url.clone(),
            alerts_url: endpoints.alerts_url.clone(),
        }
    }

    #[tracing::instrument(skip(self), fields(url = %self.trip_updates_url))]
    pub async fn fetch_trip_updates(&self) -> Result<FeedMessage, FeedError> {
        self.fetch_feed(&self.trip_updates_url).await
    }

    #[tracing::instrument(skip(self), fields(url = %self.alerts_url))]
    pub async fn fetch_alerts(&self) -> Result<FeedMessage, FeedError> {
        self.fetch_feed(&self.alerts_url).await
    }

    async fn fetch_feed(&self, url: &str) -> Result<FeedMessage, FeedError> {
        let bytes = fetch_bytes(&self.client, url).await?;
        debug!(bytes = bytes.len(), "Feed bytes received, parsing");

        let feed = parse_feed(&bytes)?;
        info!(
            entity_count = feed.entity.len(),
            header_timestamp = feed.header.timestamp,
            "Feed decoded"
        );
        Ok(feed)
    }
}

//! HTTP retrieval for GTFS-RT feeds and the JSON services around them.
//!
//! Everything goes through the [`HttpClient`] seam so request decorators
//! (see [`auth`]) and test clients can be layered over [`BasicClient`].

mod basic;
mod client;
mod feeds;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use feeds::FeedFetcher;

use serde::de::DeserializeOwned;

use crate::error::FeedError;

/// Issues a single GET and returns the body, rejecting non-success statuses.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, FeedError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FeedError::InvalidUrl(e.to_string()))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Unavailable {
            url: url.to_string(),
            status,
        });
    }

    Ok(resp.bytes().await?.to_vec())
}

/// Like [`fetch_bytes`], then deserializes the body as JSON.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &str,
) -> Result<T, FeedError> {
    let bytes = fetch_bytes(client, url).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

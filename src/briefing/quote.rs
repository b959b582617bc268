//! Daily motivation from zenquotes.

use serde::Deserialize;
use tracing::warn;

use crate::error::FeedError;
use crate::fetch::{HttpClient, fetch_json};

pub const FALLBACK_QUOTE: &str = "Stay positive, work hard, and make it happen!";

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

pub struct QuoteClient<C> {
    client: C,
    url: String,
}

impl<C: HttpClient> QuoteClient<C> {
    pub fn new(client: C, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// `"<quote> - <author>"` for the first quote returned.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String, FeedError> {
        let quotes: Vec<ZenQuote> = fetch_json(&self.client, &self.url).await?;
        Ok(render(&quotes))
    }

    pub async fn fetch_or_fallback(&self) -> String {
        match self.fetch().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "Quote lookup failed, using fallback");
                FALLBACK_QUOTE.to_string()
            }
        }
    }
}

fn render(quotes: &[ZenQuote]) -> String {
    quotes
        .first()
        .map(|quote| format!("{} - {}", quote.q, quote.a))
        .unwrap_or_else(|| FALLBACK_QUOTE.to_string())
}

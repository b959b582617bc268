//! Error types shared by the fetch, decode and configuration layers.

use thiserror::Error;

/// Failure to obtain or decode a remote document (GTFS-RT feed or JSON API).
#[derive(Debug, Error)]
pub enum FeedError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("feed unavailable: {url} returned HTTP {status}")]
    Unavailable {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),
    /// The body is not a valid GTFS-RT `FeedMessage`.
    #[error("feed decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_display_names_status_and_url() {
        let err = FeedError::Unavailable {
            url: "https://api.bart.gov/gtfsrt/alerts.aspx".into(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("alerts.aspx"));
    }

    #[test]
    fn decode_error_converts() {
        use prost::Message;

        let bad_bytes: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        let decode_err = crate::gtfs_rt::FeedMessage::decode(bad_bytes).unwrap_err();
        let err: FeedError = decode_err.into();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn json_error_converts() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json!!!");
        let err: FeedError = result.unwrap_err().into();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::UnknownTimezone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "Unknown timezone 'Mars/Olympus'");
    }
}

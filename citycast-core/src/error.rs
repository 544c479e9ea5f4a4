use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which upstream endpoint a lookup step talked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    CurrentWeather,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocoding => "geocoding",
            Endpoint::CurrentWeather => "current weather",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single geocode + weather lookup.
///
/// `Display` carries the full detail and is meant for logs. The chat transcript
/// shows [`LookupError::user_message`] instead.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach the {endpoint} service: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    UpstreamStatus {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("no location found for '{query}'")]
    NotFound { query: String },
}

impl LookupError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            LookupError::Network { endpoint, .. }
            | LookupError::UpstreamStatus { endpoint, .. }
            | LookupError::Decode { endpoint, .. } => *endpoint,
            LookupError::NotFound { .. } => Endpoint::Geocoding,
        }
    }

    /// Short message suitable for the transcript.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Network { .. } => "Could not fetch weather forecast".to_string(),
            LookupError::UpstreamStatus { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                "Weather service rejected the API key (401 Unauthorized)".to_string()
            }
            LookupError::UpstreamStatus { endpoint, status, .. } => {
                format!("The {endpoint} service answered with {status}")
            }
            LookupError::Decode { endpoint, .. } => {
                format!("Could not read the {endpoint} response")
            }
            LookupError::NotFound { query } => format!("No location found for \"{query}\""),
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

use crate::{
    Config,
    error::LookupError,
    model::{Coordinate, LocationCandidate, WeatherReport},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Resolves a free-text place name to a location.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// The first candidate the service returns for `city`.
    async fn resolve_candidate(&self, city: &str) -> Result<LocationCandidate, LookupError>;

    async fn resolve(&self, city: &str) -> Result<Coordinate, LookupError> {
        Ok(self.resolve_candidate(city).await?.coordinate())
    }
}

/// Fetches current conditions for a coordinate.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_current(&self, coord: Coordinate) -> Result<WeatherReport, LookupError>;
}

/// Pick the first candidate, failing explicitly on an empty list.
pub fn first_candidate(
    candidates: Vec<LocationCandidate>,
    query: &str,
) -> Result<LocationCandidate, LookupError> {
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NotFound { query: query.to_string() })
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    if !config.has_api_key() {
        log::warn!(
            "No OpenWeather API key configured; requests will be rejected upstream. \
             Set {} or run `citycast configure`.",
            crate::config::API_KEY_ENV
        );
    }

    OpenWeatherClient::new(
        config.api_key().to_owned(),
        config.endpoints.clone(),
        config.request_timeout(),
    )
}

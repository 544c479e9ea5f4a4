use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::EndpointConfig,
    error::{Endpoint, LookupError, truncate_body},
    model::{Coordinate, LocationCandidate, WeatherReport},
    provider::{Geocoder, WeatherFetcher, first_candidate},
};

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Client for the OpenWeather geocoding and current weather APIs.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoints: EndpointConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(
        api_key: String,
        endpoints: EndpointConfig,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key, endpoints, http })
    }

    fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    /// Send a GET, read the whole body, then check the status before parsing.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        log::debug!("GET {url} ({endpoint})");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| LookupError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| LookupError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(LookupError::UpstreamStatus {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| LookupError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherReport {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherReport {
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            temp_max: parsed.main.temp_max,
            temp_min: parsed.main.temp_min,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            description: parsed.weather.into_iter().next().map(|w| w.description),
        }
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn resolve_candidate(&self, city: &str) -> Result<LocationCandidate, LookupError> {
        let url = Self::url(&self.endpoints.geocoding_url, GEOCODING_PATH);

        let candidates: Vec<LocationCandidate> = self
            .get_json(
                Endpoint::Geocoding,
                &url,
                &[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())],
            )
            .await?;

        log::debug!("geocoding '{city}' returned {} candidate(s)", candidates.len());
        first_candidate(candidates, city)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch_current(&self, coord: Coordinate) -> Result<WeatherReport, LookupError> {
        let url = Self::url(&self.endpoints.weather_url, CURRENT_WEATHER_PATH);
        let lat = format_degrees(coord.latitude);
        let lon = format_degrees(coord.longitude);

        let parsed: OwCurrentResponse = self
            .get_json(
                Endpoint::CurrentWeather,
                &url,
                &[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str())],
            )
            .await?;

        Ok(parsed.into())
    }
}

fn format_degrees(value: f64) -> String {
    format!("{value:.5}")
}

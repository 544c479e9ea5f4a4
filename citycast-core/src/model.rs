use std::collections::HashMap;

use serde::Deserialize;

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One match returned by the geocoding service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(default)]
    pub local_names: HashMap<String, String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl LocationCandidate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// "Name, State, Country", skipping empty parts.
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), Some(self.country.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Current conditions at a coordinate. Temperatures are Kelvin, as returned upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub description: Option<String>,
}

/// A successful lookup: the location that was picked and its weather.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub location: LocationCandidate,
    pub report: WeatherReport,
}

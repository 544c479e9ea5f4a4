//! Core library for the `citycast` weather chat.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Geocoding and current weather lookups against OpenWeather
//! - Fixed-width formatting of weather reports
//!
//! It is used by `citycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod formatter;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{Endpoint, LookupError};
pub use lookup::WeatherLookup;
pub use model::{Coordinate, LocationCandidate, Lookup, WeatherReport};
pub use provider::{Geocoder, WeatherFetcher, openweather::OpenWeatherClient};

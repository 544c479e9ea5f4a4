use crate::{
    Config,
    error::LookupError,
    formatter,
    model::Lookup,
    provider::{Geocoder, WeatherFetcher, client_from_config},
};

/// Geocode a city, then fetch its current weather.
#[derive(Debug)]
pub struct WeatherLookup {
    geocoder: Box<dyn Geocoder>,
    fetcher: Box<dyn WeatherFetcher>,
}

impl WeatherLookup {
    pub fn new(geocoder: Box<dyn Geocoder>, fetcher: Box<dyn WeatherFetcher>) -> Self {
        Self { geocoder, fetcher }
    }

    /// Both steps served by the OpenWeather client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = client_from_config(config)?;
        Ok(Self::new(Box::new(client.clone()), Box::new(client)))
    }

    pub async fn lookup(&self, city: &str) -> Result<Lookup, LookupError> {
        let location = self.geocoder.resolve_candidate(city).await?;
        log::info!(
            "resolved '{city}' to {} ({:.5}, {:.5})",
            location.display_name(),
            location.lat,
            location.lon
        );

        let report = self.fetcher.fetch_current(location.coordinate()).await?;
        Ok(Lookup { location, report })
    }

    /// Text for the transcript. Errors are logged and collapsed to a short message.
    pub async fn report(&self, city: &str) -> String {
        match self.lookup(city).await {
            Ok(found) => render(&found),
            Err(err) => {
                log::warn!("lookup for '{city}' failed at the {} step: {err}", err.endpoint());
                err.user_message()
            }
        }
    }
}

/// Location header followed by the formatted report.
pub fn render(found: &Lookup) -> String {
    format!("{}\n{}", found.location.display_name(), formatter::format(&found.report))
}

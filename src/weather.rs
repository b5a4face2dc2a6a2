//! Weather provider client
//!
//! Single passthrough call against an OpenWeatherMap-compatible API with
//! query-parameter auth. This is also the geocoding step of the
//! aggregation flow: the returned document carries the coordinates that
//! the hotel and restaurant lookups depend on. No retries, no caching.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::Result;
use crate::TripWiseError;
use crate::config::WeatherConfig;
use crate::models::WeatherReport;

/// Client for the weather provider
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    units: String,
}

impl WeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripWise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripWiseError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
        })
    }

    /// Whether a provider key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Length of the configured provider key, 0 when absent
    #[must_use]
    pub fn api_key_len(&self) -> usize {
        self.api_key.as_ref().map_or(0, String::len)
    }

    /// Fetch current weather conditions for a city name
    pub async fn current_by_city(&self, city: &str) -> Result<WeatherReport> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            TripWiseError::config("Weather API key is not configured")
        })?;

        info!("Fetching current weather for '{}'", city);

        let url = format!(
            "{}/weather?q={}&appid={}&units={}",
            self.base_url,
            urlencoding::encode(city),
            api_key,
            self.units
        );
        debug!(
            "Weather API request URL: {}/weather?q={}&units={}",
            self.base_url,
            urlencoding::encode(city),
            self.units
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripWiseError::api(format!("Weather request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather API returned HTTP {} for '{}'", status, city);
            return Err(TripWiseError::api(format!(
                "Weather API error {status} for city '{city}'"
            )));
        }

        let report: WeatherReport = response.json().await.map_err(|e| {
            TripWiseError::api(format!("Failed to parse weather response: {e}"))
        })?;

        info!(
            "Weather for '{}': {} at ({:.4}, {:.4})",
            report.name,
            report.description().unwrap_or("unknown conditions"),
            report.coord.lat,
            report.coord.lon
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: Option<&str>) -> WeatherConfig {
        WeatherConfig {
            api_key: api_key.map(str::to_string),
            ..WeatherConfig::default()
        }
    }

    #[test]
    fn test_client_without_key() {
        let client = WeatherClient::new(&test_config(None)).unwrap();
        assert!(!client.has_api_key());
        assert_eq!(client.api_key_len(), 0);
    }

    #[test]
    fn test_client_reports_key_length() {
        let client = WeatherClient::new(&test_config(Some("abcdefgh1234"))).unwrap();
        assert!(client.has_api_key());
        assert_eq!(client.api_key_len(), 12);
    }

    #[tokio::test]
    async fn test_current_by_city_requires_key() {
        let client = WeatherClient::new(&test_config(None)).unwrap();
        let err = client.current_by_city("Paris").await.unwrap_err();
        assert!(matches!(err, TripWiseError::Config { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut config = test_config(Some("abcdefgh1234"));
        config.base_url = "https://api.openweathermap.org/data/2.5/".to_string();
        let client = WeatherClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }
}

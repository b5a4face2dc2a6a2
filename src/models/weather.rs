//! Current-weather document passed through from the weather provider
//!
//! The shapes mirror the OpenWeatherMap current-weather response. The
//! service never transforms these values; what the provider sent is what
//! the weather endpoint re-emits.

use serde::{Deserialize, Serialize};

/// Current weather conditions for a city, as reported by the provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReport {
    /// Geographic coordinates of the resolved city
    pub coord: Coordinates,
    /// Condition entries; the first one carries the headline description
    pub weather: Vec<Condition>,
    /// Temperature and humidity measurements
    pub main: Measurements,
    /// Wind measurements
    pub wind: Wind,
    /// Resolved city name
    pub name: String,
}

/// Geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Latitude in decimal degrees
    pub lat: f64,
}

/// A single weather condition entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Condition {
    /// Condition group (Rain, Clouds, Clear, ...)
    pub main: String,
    /// Human-readable condition description
    pub description: String,
    /// Provider icon identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Temperature and humidity measurements
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Measurements {
    /// Temperature in the configured units
    pub temp: f64,
    /// Perceived temperature in the configured units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    /// Atmospheric pressure in hPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Relative humidity percentage
    pub humidity: f64,
}

/// Wind measurements
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Wind {
    /// Wind speed in the configured units
    pub speed: f64,
    /// Wind direction in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deg: Option<f64>,
}

impl WeatherReport {
    /// Headline condition description, if the provider sent one
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }
}

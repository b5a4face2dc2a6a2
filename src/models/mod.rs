//! Data models for the TripWise service
//!
//! This module contains the wire-level domain models organized by concern:
//! - Weather: current conditions document passed through from the provider
//! - Recommendation: attraction, hotel and restaurant entries synthesized
//!   by the language model or substituted from static fallbacks

pub mod recommendation;
pub mod weather;

// Re-export all public types for convenient access
pub use recommendation::{HotelRecommendation, PlaceRecommendation, RestaurantRecommendation};
pub use weather::{Coordinates, WeatherReport};

//! `TripWise` - travel information aggregation service
//!
//! This library provides the backend for a travel-planning UI: live
//! weather for a city, plus language-model-synthesized lists of tourist
//! attractions, hotels and restaurants near it, with deterministic
//! fallbacks when a provider misbehaves.

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod recommend;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::TripWiseConfig;
pub use error::TripWiseError;
pub use gemini::GeminiClient;
pub use models::{
    HotelRecommendation, PlaceRecommendation, RestaurantRecommendation, WeatherReport,
};
pub use recommend::Synthesis;
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripWiseError>;

//! Recommendation entries served by the places, hotels and restaurants
//! endpoints
//!
//! Every field is always populated: gaps left by the language model are
//! filled with placeholder strings before an entry reaches a consumer.

use serde::{Deserialize, Serialize};

/// A tourist attraction near the requested city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlaceRecommendation {
    /// Name of the place
    pub name: String,
    /// Short description of what makes it special
    #[serde(rename = "secondaryInfo")]
    pub secondary_info: String,
}

/// A hotel near the requested coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HotelRecommendation {
    /// Hotel name
    pub name: String,
    /// Rating on the provider-supplied scale, kept as a string
    pub rating: String,
    /// Price tier (Budget, Mid-range, Luxury)
    pub price: String,
    /// Always empty; the language model supplies no imagery
    pub image: String,
    /// Location description
    pub address: String,
}

/// A restaurant near the requested coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RestaurantRecommendation {
    /// Restaurant name
    pub name: String,
    /// Rating on the provider-supplied scale, kept as a string
    pub rating: String,
    /// Cuisine label
    pub cuisine: String,
    /// Always empty; the language model supplies no imagery
    pub image: String,
    /// Location description
    pub address: String,
}

//! Recommendation synthesizer
//!
//! Builds a category-specific prompt asking the language model for exactly
//! five items, extracts the first bracket-balanced JSON array from the
//! free-text reply, and normalizes the parsed entries so every field is
//! populated. Degradation is a first-class branch, not an exception
//! handler: any provider failure, extraction failure, parse failure or
//! empty result yields the deterministic static fallback list for the
//! category, and the result says so.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::gemini::GeminiClient;
use crate::models::{HotelRecommendation, PlaceRecommendation, RestaurantRecommendation};

/// A synthesized recommendation list plus how it was obtained
#[derive(Debug, Clone)]
pub struct Synthesis<T> {
    /// The recommendation entries, all fields populated
    pub items: Vec<T>,
    /// True when the items are static fallback data rather than model output
    pub fallback: bool,
}

impl<T> Synthesis<T> {
    fn from_model(items: Vec<T>) -> Self {
        Self {
            items,
            fallback: false,
        }
    }

    fn from_fallback(items: Vec<T>) -> Self {
        Self {
            items,
            fallback: true,
        }
    }
}

/// Synthesize tourist attractions for a city
pub async fn places(gemini: &GeminiClient, city: &str) -> Synthesis<PlaceRecommendation> {
    match gemini.generate(&places_prompt(city)).await {
        Ok(text) => match parse_items::<RawPlace, _>(&text) {
            Some(items) => {
                info!("Synthesized {} places for '{}'", items.len(), city);
                Synthesis::from_model(items)
            }
            None => {
                warn!("Unusable places reply for '{}', using fallback list", city);
                Synthesis::from_fallback(fallback_places(city))
            }
        },
        Err(e) => {
            warn!("Places synthesis failed for '{}': {}", city, e);
            Synthesis::from_fallback(fallback_places(city))
        }
    }
}

/// Synthesize hotel recommendations near coordinates
pub async fn hotels(gemini: &GeminiClient, lat: f64, lon: f64) -> Synthesis<HotelRecommendation> {
    match gemini.generate(&hotels_prompt(lat, lon)).await {
        Ok(text) => match parse_items::<RawHotel, _>(&text) {
            Some(items) => {
                info!("Synthesized {} hotels near ({}, {})", items.len(), lat, lon);
                Synthesis::from_model(items)
            }
            None => {
                warn!("Unusable hotels reply, using fallback list");
                Synthesis::from_fallback(fallback_hotels())
            }
        },
        Err(e) => {
            warn!("Hotels synthesis failed: {}", e);
            Synthesis::from_fallback(fallback_hotels())
        }
    }
}

/// Synthesize restaurant recommendations near coordinates
pub async fn restaurants(
    gemini: &GeminiClient,
    lat: f64,
    lon: f64,
) -> Synthesis<RestaurantRecommendation> {
    match gemini.generate(&restaurants_prompt(lat, lon)).await {
        Ok(text) => match parse_items::<RawRestaurant, _>(&text) {
            Some(items) => {
                info!(
                    "Synthesized {} restaurants near ({}, {})",
                    items.len(),
                    lat,
                    lon
                );
                Synthesis::from_model(items)
            }
            None => {
                warn!("Unusable restaurants reply, using fallback list");
                Synthesis::from_fallback(fallback_restaurants())
            }
        },
        Err(e) => {
            warn!("Restaurants synthesis failed: {}", e);
            Synthesis::from_fallback(fallback_restaurants())
        }
    }
}

/// Extract the first bracket-balanced JSON array from free text.
///
/// Brackets inside JSON string literals do not count toward the balance,
/// so a reply like `Here you go: [{"name": "Bar [closed]"}]` still
/// extracts the full array. Returns `None` when no balanced array exists.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse an embedded array into normalized entries.
///
/// Returns `None` when no array can be extracted, the array is not valid
/// JSON of the expected shape, or it parses to an empty list.
fn parse_items<R, T>(text: &str) -> Option<Vec<T>>
where
    R: DeserializeOwned + Into<T>,
{
    let array = extract_json_array(text)?;
    let raw: Vec<R> = serde_json::from_str(array).ok()?;
    if raw.is_empty() {
        return None;
    }
    Some(raw.into_iter().map(Into::into).collect())
}

fn places_prompt(city: &str) -> String {
    format!(
        "Generate 5 top tourist attractions and places to visit in {city}.\n\
         For each place, provide:\n\
         1. Name of the place\n\
         2. Brief description (what makes it special)\n\n\
         Format the response as a JSON array with objects containing \"name\" and \"secondaryInfo\" fields.\n\
         Example format:\n\
         [\n\
           {{\n\
             \"name\": \"Place Name\",\n\
             \"secondaryInfo\": \"Brief description of the place\"\n\
           }}\n\
         ]\n\n\
         Make sure the response is valid JSON only, no additional text."
    )
}

fn hotels_prompt(lat: f64, lon: f64) -> String {
    format!(
        "Generate 5 recommended hotels for tourists visiting this location (coordinates: {lat}, {lon}).\n\
         For each hotel, provide:\n\
         1. Hotel name\n\
         2. Brief description of location/area\n\
         3. Approximate price range (Budget, Mid-range, Luxury)\n\
         4. Rating (1-5 stars)\n\n\
         Format the response as a JSON array with objects containing \"name\", \"address\", \"rating\", and \"price\" fields.\n\
         Example format:\n\
         [\n\
           {{\n\
             \"name\": \"Hotel Name\",\n\
             \"address\": \"Location description\",\n\
             \"rating\": \"4.5\",\n\
             \"price\": \"Mid-range\"\n\
           }}\n\
         ]\n\n\
         Make sure the response is valid JSON only, no additional text."
    )
}

fn restaurants_prompt(lat: f64, lon: f64) -> String {
    format!(
        "Generate 5 recommended restaurants for tourists visiting this location (coordinates: {lat}, {lon}).\n\
         For each restaurant, provide:\n\
         1. Restaurant name\n\
         2. Type of cuisine\n\
         3. Brief description of location\n\
         4. Rating (1-5 stars)\n\n\
         Format the response as a JSON array with objects containing \"name\", \"cuisine\", \"rating\", and \"address\" fields.\n\
         Example format:\n\
         [\n\
           {{\n\
             \"name\": \"Restaurant Name\",\n\
             \"cuisine\": \"Italian\",\n\
             \"rating\": \"4.5\",\n\
             \"address\": \"Location description\"\n\
           }}\n\
         ]\n\n\
         Make sure the response is valid JSON only, no additional text."
    )
}

/// Static attraction list substituted when synthesis fails
#[must_use]
pub fn fallback_places(city: &str) -> Vec<PlaceRecommendation> {
    let entries = [
        ("City Center", "Main tourist area of the city"),
        ("Historical District", "Explore the rich history and culture"),
        ("Local Market", "Experience local cuisine and shopping"),
        ("Park/Garden", "Relax in beautiful natural surroundings"),
        ("Museum", "Learn about local art and history"),
    ];

    entries
        .into_iter()
        .map(|(suffix, info)| PlaceRecommendation {
            name: format!("{city} {suffix}"),
            secondary_info: info.to_string(),
        })
        .collect()
}

/// Static hotel list substituted when synthesis fails
#[must_use]
pub fn fallback_hotels() -> Vec<HotelRecommendation> {
    let entries = [
        ("Grand Hotel", "4.5", "Luxury", "City center location"),
        ("Comfort Inn", "4.0", "Mid-range", "Near tourist attractions"),
        ("Budget Lodge", "3.5", "Budget", "Affordable accommodation"),
        (
            "Business Hotel",
            "4.2",
            "Mid-range",
            "Convenient for business travelers",
        ),
        (
            "Boutique Hotel",
            "4.8",
            "Luxury",
            "Unique and charming atmosphere",
        ),
    ];

    entries
        .into_iter()
        .map(|(name, rating, price, address)| HotelRecommendation {
            name: name.to_string(),
            rating: rating.to_string(),
            price: price.to_string(),
            image: String::new(),
            address: address.to_string(),
        })
        .collect()
}

/// Static restaurant list substituted when synthesis fails
#[must_use]
pub fn fallback_restaurants() -> Vec<RestaurantRecommendation> {
    let entries = [
        ("Local Bistro", "International", "4.5", "City center dining"),
        (
            "Traditional Restaurant",
            "Local Cuisine",
            "4.2",
            "Authentic local flavors",
        ),
        (
            "Cafe Central",
            "Cafe",
            "4.0",
            "Perfect for coffee and light meals",
        ),
        ("Fine Dining", "Gourmet", "4.8", "Upscale dining experience"),
        (
            "Street Food Corner",
            "Street Food",
            "4.3",
            "Local street food experience",
        ),
    ];

    entries
        .into_iter()
        .map(|(name, cuisine, rating, address)| RestaurantRecommendation {
            name: name.to_string(),
            rating: rating.to_string(),
            cuisine: cuisine.to_string(),
            image: String::new(),
            address: address.to_string(),
        })
        .collect()
}

/// Attraction entry as the model emits it; fields may be absent
#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
    #[serde(rename = "secondaryInfo")]
    secondary_info: Option<String>,
}

impl From<RawPlace> for PlaceRecommendation {
    fn from(raw: RawPlace) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "Unnamed Place".to_string()),
            secondary_info: raw.secondary_info.unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Hotel entry as the model emits it; fields may be absent
#[derive(Debug, Deserialize)]
struct RawHotel {
    name: Option<String>,
    rating: Option<String>,
    price: Option<String>,
    address: Option<String>,
}

impl From<RawHotel> for HotelRecommendation {
    fn from(raw: RawHotel) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "Unnamed Hotel".to_string()),
            rating: raw.rating.unwrap_or_else(|| "N/A".to_string()),
            price: raw.price.unwrap_or_else(|| "N/A".to_string()),
            image: String::new(),
            address: raw
                .address
                .unwrap_or_else(|| "Address not available".to_string()),
        }
    }
}

/// Restaurant entry as the model emits it; fields may be absent
#[derive(Debug, Deserialize)]
struct RawRestaurant {
    name: Option<String>,
    cuisine: Option<String>,
    rating: Option<String>,
    address: Option<String>,
}

impl From<RawRestaurant> for RestaurantRecommendation {
    fn from(raw: RawRestaurant) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "Unnamed Restaurant".to_string()),
            rating: raw.rating.unwrap_or_else(|| "N/A".to_string()),
            cuisine: raw.cuisine.unwrap_or_else(|| "N/A".to_string()),
            image: String::new(),
            address: raw
                .address
                .unwrap_or_else(|| "Address not available".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare_array(r#"[{"name": "A"}]"#, Some(r#"[{"name": "A"}]"#))]
    #[case::leading_prose(
        r#"Here are the results: [{"name": "A"}] hope that helps!"#,
        Some(r#"[{"name": "A"}]"#)
    )]
    #[case::markdown_fence(
        "```json\n[{\"name\": \"A\"}]\n```",
        Some("[{\"name\": \"A\"}]")
    )]
    #[case::bracket_inside_string(
        r#"[{"name": "Bar [closed]"}]"#,
        Some(r#"[{"name": "Bar [closed]"}]"#)
    )]
    #[case::escaped_quote_inside_string(
        r#"[{"name": "He said \"hi\" [sic]"}]"#,
        Some(r#"[{"name": "He said \"hi\" [sic]"}]"#)
    )]
    #[case::nested_arrays(r#"[[1, 2], [3]]"#, Some(r#"[[1, 2], [3]]"#))]
    #[case::unbalanced(r#"[{"name": "A""#, None)]
    #[case::no_array("no brackets at all", None)]
    #[case::only_close("] oops", None)]
    fn test_extract_json_array(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_json_array(input), expected);
    }

    #[test]
    fn test_extract_takes_first_array() {
        let text = r#"first [1, 2] second [3, 4]"#;
        assert_eq!(extract_json_array(text), Some("[1, 2]"));
    }

    #[test]
    fn test_parse_items_normalizes_missing_fields() {
        let text = r#"[{"name": "Hotel X"}, {"rating": "4.0"}]"#;
        let hotels: Vec<HotelRecommendation> = parse_items::<RawHotel, _>(text).unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name, "Hotel X");
        assert_eq!(hotels[0].rating, "N/A");
        assert_eq!(hotels[0].price, "N/A");
        assert_eq!(hotels[0].address, "Address not available");
        assert_eq!(hotels[1].name, "Unnamed Hotel");
        assert_eq!(hotels[1].rating, "4.0");
    }

    #[test]
    fn test_parse_items_rejects_empty_array() {
        assert!(parse_items::<RawHotel, HotelRecommendation>("[]").is_none());
    }

    #[test]
    fn test_parse_items_rejects_non_object_entries() {
        assert!(parse_items::<RawHotel, HotelRecommendation>("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_fallback_places_are_themed_and_deterministic() {
        let first = fallback_places("Paris");
        let second = fallback_places("Paris");
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert!(first.iter().all(|p| p.name.starts_with("Paris ")));
    }

    #[test]
    fn test_fallback_hotels_deterministic_and_complete() {
        let first = fallback_hotels();
        let second = fallback_hotels();
        assert_eq!(first.len(), 5);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        for hotel in &first {
            assert!(!hotel.name.is_empty());
            assert!(!hotel.rating.is_empty());
            assert!(!hotel.price.is_empty());
            assert!(!hotel.address.is_empty());
        }
    }

    #[test]
    fn test_fallback_restaurants_deterministic_and_complete() {
        let first = fallback_restaurants();
        assert_eq!(first.len(), 5);
        assert_eq!(first, fallback_restaurants());
        for restaurant in &first {
            assert!(!restaurant.name.is_empty());
            assert!(!restaurant.cuisine.is_empty());
            assert!(!restaurant.rating.is_empty());
            assert!(!restaurant.address.is_empty());
        }
    }

    #[test]
    fn test_prompts_request_five_items_with_fields() {
        let places = places_prompt("Paris");
        assert!(places.contains("5 top tourist attractions"));
        assert!(places.contains("Paris"));
        assert!(places.contains("secondaryInfo"));

        let hotels = hotels_prompt(48.85, 2.35);
        assert!(hotels.contains("5 recommended hotels"));
        assert!(hotels.contains("48.85, 2.35"));
        assert!(hotels.contains("\"price\""));

        let restaurants = restaurants_prompt(48.85, 2.35);
        assert!(restaurants.contains("5 recommended restaurants"));
        assert!(restaurants.contains("\"cuisine\""));
    }
}

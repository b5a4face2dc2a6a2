//! HTTP API for the travel-information aggregator
//!
//! The weather endpoint is a keyed passthrough and the only hard failure
//! path. The places endpoint sequences the weather lookup (coordinates
//! are a hard dependency) with the attractions synthesis. The hotels and
//! restaurants endpoints always answer 200 and degrade to static
//! fallbacks; a degraded list is flagged with an `x-fallback` response
//! header so callers can tell synthesized data from placeholder data.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};

use crate::gemini::GeminiClient;
use crate::models::{
    HotelRecommendation, PlaceRecommendation, RestaurantRecommendation, WeatherReport,
};
use crate::recommend::{self, Synthesis};
use crate::weather::WeatherClient;

/// Placeholder location handle; the language model needs no geo id
const LOCATION_ID: &str = "gemini-api";

/// Shared, immutable per-process state handed to every handler
pub struct AppState {
    /// Weather provider client
    pub weather: WeatherClient,
    /// Language-model provider client
    pub gemini: GeminiClient,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/weather", get(get_weather))
        .route("/places", get(get_places))
        .route("/hotels", get(get_hotels))
        .route("/restaurants", get(get_restaurants))
        .route("/test", get(get_test))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn server_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Headers for a recommendation list; flags fallback data
fn fallback_headers(fallback: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if fallback {
        headers.insert(
            HeaderName::from_static("x-fallback"),
            HeaderValue::from_static("true"),
        );
    }
    headers
}

async fn root() -> &'static str {
    "TripWise backend API is running"
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyQuery {
    #[allow(dead_code)]
    location_id: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// `GET /weather?city=`: weather provider passthrough
#[instrument(skip(state, query))]
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherReport>, ApiError> {
    let city = query.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() || !state.weather.has_api_key() {
        return Err(bad_request("Missing city or API key"));
    }

    match state.weather.current_by_city(city).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            error!("Weather fetch error for '{}': {}", city, e);
            Err(server_error("Weather fetch failed"))
        }
    }
}

#[derive(Debug, Serialize)]
struct PlacesResponse {
    places: Vec<PlaceRecommendation>,
    location_id: String,
    latitude: f64,
    longitude: f64,
    debug: PlacesDebug,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacesDebug {
    has_geo_id: bool,
    geo_id_value: String,
    places_count: usize,
    fallback: bool,
}

/// `GET /places?city=`: the aggregation entry point.
///
/// The weather lookup supplies the coordinates and is the only hard
/// dependency; if it fails the whole request fails. The attractions
/// synthesis afterwards can only produce real or fallback items.
#[instrument(skip(state, query))]
async fn get_places(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<PlacesResponse>, ApiError> {
    let city = query.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() {
        return Err(bad_request("City is required"));
    }

    let report = match state.weather.current_by_city(city).await {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to get coordinates for '{}': {}", city, e);
            return Err(server_error("Failed to get coordinates for the city"));
        }
    };

    let Synthesis { items, fallback } = recommend::places(&state.gemini, city).await;

    Ok(Json(PlacesResponse {
        debug: PlacesDebug {
            has_geo_id: true,
            geo_id_value: LOCATION_ID.to_string(),
            places_count: items.len(),
            fallback,
        },
        places: items,
        location_id: LOCATION_ID.to_string(),
        latitude: report.coord.lat,
        longitude: report.coord.lon,
    }))
}

/// `GET /hotels?location_id&latitude&longitude`: always 200
#[instrument(skip(state, query))]
async fn get_hotels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> impl IntoResponse {
    if !state.gemini.has_api_key() {
        warn!("Hotels: missing Gemini API key, returning empty list");
        return (HeaderMap::new(), Json(Vec::<HotelRecommendation>::new()));
    }

    let synthesis = match (query.latitude, query.longitude) {
        (Some(lat), Some(lon)) => recommend::hotels(&state.gemini, lat, lon).await,
        _ => {
            warn!("Hotels: missing coordinates, using fallback list");
            Synthesis {
                items: recommend::fallback_hotels(),
                fallback: true,
            }
        }
    };

    (fallback_headers(synthesis.fallback), Json(synthesis.items))
}

/// `GET /restaurants?location_id&latitude&longitude`: always 200
#[instrument(skip(state, query))]
async fn get_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> impl IntoResponse {
    if !state.gemini.has_api_key() {
        warn!("Restaurants: missing Gemini API key, returning empty list");
        return (
            HeaderMap::new(),
            Json(Vec::<RestaurantRecommendation>::new()),
        );
    }

    let synthesis = match (query.latitude, query.longitude) {
        (Some(lat), Some(lon)) => recommend::restaurants(&state.gemini, lat, lon).await,
        _ => {
            warn!("Restaurants: missing coordinates, using fallback list");
            Synthesis {
                items: recommend::fallback_restaurants(),
                fallback: true,
            }
        }
    };

    (fallback_headers(synthesis.fallback), Json(synthesis.items))
}

#[derive(Debug, Serialize)]
struct TestResponse {
    message: String,
    #[serde(rename = "hasWeatherAPI")]
    has_weather_api: bool,
    #[serde(rename = "hasGeminiAPI")]
    has_gemini_api: bool,
    #[serde(rename = "weatherAPILength")]
    weather_api_length: usize,
    #[serde(rename = "geminiAPILength")]
    gemini_api_length: usize,
    #[serde(rename = "geminiTestResult")]
    gemini_test_result: String,
}

/// `GET /test`: configuration diagnostic with a live connectivity probe
async fn get_test(State(state): State<Arc<AppState>>) -> Json<TestResponse> {
    let gemini_test_result = if state.gemini.has_api_key() {
        match state.gemini.probe().await {
            Ok(_) => "Working".to_string(),
            Err(e) => format!("Error: {e}"),
        }
    } else {
        "Not tested".to_string()
    };

    Json(TestResponse {
        message: "Server is running".to_string(),
        has_weather_api: state.weather.has_api_key(),
        has_gemini_api: state.gemini.has_api_key(),
        weather_api_length: state.weather.api_key_len(),
        gemini_api_length: state.gemini.api_key_len(),
        gemini_test_result,
    })
}

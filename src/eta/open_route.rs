//! OpenRouteService-backed travel time estimation
//!
//! Geocodes the delivery address, then asks the directions API for the
//! driving duration from the restaurant. Requests are retried with
//! exponential backoff; any remaining failure is logged and reported as
//! "no estimate".

use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::DeliveryAddress;

use super::{DeliveryEstimate, DeliveryEtaEstimator};

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 500;

/// OpenRouteService configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct OpenRouteServiceConfig {
    pub api_key: String,
    pub base_url: String,
    /// Routing profile, e.g. `driving-car` or `cycling-regular`.
    pub profile: String,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
}

impl OpenRouteServiceConfig {
    /// `None` when ORS_API_KEY is not configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ORS_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            profile: std::env::var("ORS_PROFILE").unwrap_or_else(|_| "driving-car".to_string()),
            restaurant_latitude: std::env::var("ORS_RESTAURANT_LATITUDE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            restaurant_longitude: std::env::var("ORS_RESTAURANT_LONGITUDE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
        })
    }
}

// ========== Wire DTOs ==========

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: Option<GeocodeGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    /// `[longitude, latitude]`
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    /// Waypoints as `[longitude, latitude]` pairs
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    properties: Option<RouteProperties>,
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    #[serde(default)]
    segments: Vec<RouteSegment>,
}

#[derive(Debug, Deserialize)]
struct RouteSegment {
    /// Travel time in seconds
    duration: f64,
}

// ========== Estimator ==========

#[derive(Debug, Clone)]
pub struct OpenRouteServiceEstimator {
    client: reqwest::Client,
    config: OpenRouteServiceConfig,
}

impl OpenRouteServiceEstimator {
    pub fn new(config: OpenRouteServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Geocode the address to `(latitude, longitude)`.
    async fn geocode(&self, address: &DeliveryAddress) -> Option<(f64, f64)> {
        let query = build_address_query(address);
        let url = format!("{}/geocode/search", self.config.base_url);
        let params = [
            ("api_key", self.config.api_key.as_str()),
            ("text", query.as_str()),
            ("size", "1"),
        ];

        let geo: GeocodeResponse = self.get_with_retry(&url, &params).await?;
        let coordinates = geo
            .features
            .first()
            .and_then(|f| f.geometry.as_ref())
            .map(|g| g.coordinates.as_slice())
            .unwrap_or_default();

        if coordinates.len() < 2 {
            tracing::warn!(address = %query, "geocode returned no usable coordinates");
            return None;
        }
        // GeoJSON order is [lon, lat]
        Some((coordinates[1], coordinates[0]))
    }

    /// Driving duration in seconds between two points.
    async fn route_duration_seconds(&self, dest_lat: f64, dest_lon: f64) -> Option<f64> {
        let url = format!(
            "{}/v2/directions/{}/geojson?api_key={}",
            self.config.base_url, self.config.profile, self.config.api_key
        );
        let payload = DirectionsRequest {
            coordinates: vec![
                [self.config.restaurant_longitude, self.config.restaurant_latitude],
                [dest_lon, dest_lat],
            ],
        };

        let directions: DirectionsResponse = self.post_with_retry(&url, &payload).await?;
        let duration = directions
            .features
            .first()
            .and_then(|f| f.properties.as_ref())
            .and_then(|p| p.segments.first())
            .map(|s| s.duration);

        if duration.is_none() {
            tracing::warn!("directions response carried no route segments");
        }
        duration
    }

    async fn get_with_retry<T, Q>(&self, url: &str, query: &Q) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize,
    {
        self.with_retry(|| async {
            self.client
                .get(url)
                .query(query)
                .send()
                .await?
                .error_for_status()?
                .json::<T>()
                .await
        })
        .await
    }

    async fn post_with_retry<T, B>(&self, url: &str, body: &B) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        self.with_retry(|| async {
            self.client
                .post(url)
                .json(body)
                .send()
                .await?
                .error_for_status()?
                .json::<T>()
                .await
        })
        .await
    }

    async fn with_retry<T, F, Fut>(&self, op: F) -> Option<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, reqwest::Error>>,
    {
        for attempt in 0..MAX_ATTEMPTS {
            match op().await {
                Ok(value) => return Some(value),
                Err(e) => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "routing request failed");
                    if attempt + 1 < MAX_ATTEMPTS {
                        let backoff = BACKOFF_BASE_MS * 2u64.pow(attempt);
                        tokio::time::sleep(std::time::Duration::from_millis(backoff)).await;
                    }
                }
            }
        }
        None
    }
}

#[async_trait]
impl DeliveryEtaEstimator for OpenRouteServiceEstimator {
    async fn estimate(&self, address: &DeliveryAddress) -> Option<DeliveryEstimate> {
        let (lat, lon) = self.geocode(address).await?;
        let seconds = self.route_duration_seconds(lat, lon).await?;
        if seconds <= 0.0 {
            tracing::warn!("routing service returned a non-positive duration");
            return None;
        }
        Some(DeliveryEstimate {
            travel_time: Duration::seconds(seconds.round() as i64),
        })
    }
}

fn build_address_query(address: &DeliveryAddress) -> String {
    let mut parts = vec![address.street()];
    if let Some(line2) = address.line2() {
        parts.push(line2);
    }
    parts.push(address.city());
    parts.push(address.zip());
    if let Some(country) = address.country() {
        parts.push(country);
    }
    parts.join(", ")
}

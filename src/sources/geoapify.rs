use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::Review;
use crate::sources::traits::PlaceSource;
use crate::sources::types::{PlaceQuery, RawPlace};

pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";

/// Geoapify Places API client, restricted to the `amenity.toilet` category
pub struct GeoapifySource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeoapifySource {
    /// Create a new source against the public Geoapify endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, Duration::from_secs(10))
    }

    /// Create a new source against a custom endpoint
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("toilet-finder/0.1")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn places_url(&self) -> String {
        format!("{}/v2/places", self.base_url)
    }
}

#[async_trait]
impl PlaceSource for GeoapifySource {
    async fn fetch_places(&self, query: &PlaceQuery) -> Result<Vec<RawPlace>> {
        let radius_m = (query.radius_km * 1000.0).round() as u64;
        let filter = format!(
            "circle:{},{},{}",
            query.center.longitude, query.center.latitude, radius_m
        );

        info!(
            lat = query.center.latitude,
            lon = query.center.longitude,
            radius_m,
            "Fetching toilets from Geoapify"
        );

        let response = self
            .client
            .get(self.places_url())
            .query(&[
                ("categories", "amenity.toilet"),
                ("filter", filter.as_str()),
                ("limit", query.limit.to_string().as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to fetch Geoapify places")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Geoapify returned an error");
            anyhow::bail!("Geoapify request failed with status {}: {}", status, body);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to decode Geoapify response")?;

        let places = parse_places(body);
        debug!("Decoded {} places", places.len());
        Ok(places)
    }

    fn source_name(&self) -> &'static str {
        "Geoapify"
    }
}

/// Extract place records from any of the response shapes the API has served.
///
/// Elements are decoded field by field; an unusable field falls back to `None`
/// and only non-object elements are skipped.
pub fn parse_places(body: Value) -> Vec<RawPlace> {
    let items: Vec<Option<RawPlace>> = match body {
        Value::Array(items) => items.into_iter().map(decode_plain).collect(),
        Value::Object(mut map) => {
            let is_feature_collection =
                map.get("type").and_then(Value::as_str) == Some("FeatureCollection");

            if is_feature_collection {
                match map.remove("features") {
                    Some(Value::Array(features)) => {
                        features.into_iter().map(decode_feature).collect()
                    }
                    _ => Vec::new(),
                }
            } else if let Some(Value::Array(items)) = map.remove("toilets") {
                items.into_iter().map(decode_plain).collect()
            } else if let Some(Value::Array(items)) = map.remove("data") {
                items.into_iter().map(decode_plain).collect()
            } else {
                warn!("Unexpected places response structure");
                Vec::new()
            }
        }
        _ => {
            warn!("Unexpected places response structure");
            Vec::new()
        }
    };

    items.into_iter().flatten().collect()
}

fn decode_plain(item: Value) -> Option<RawPlace> {
    if !item.is_object() {
        warn!("Skipping non-object place record");
        return None;
    }

    let text = |key: &str| text_field(&item, key);
    let number = |key: &str| number_field(&item, key);

    let reviews = item.get("reviews").and_then(Value::as_array).map(|reviews| {
        let decoded: Vec<Review> = reviews.iter().filter_map(decode_review).collect();
        if decoded.len() < reviews.len() {
            warn!(
                dropped = reviews.len() - decoded.len(),
                "Dropping malformed reviews"
            );
        }
        decoded
    });

    let facilities = item.get("facilities").and_then(Value::as_array).map(|tags| {
        tags.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    });

    Some(RawPlace {
        id: id_field(&item, "id"),
        name: text("name"),
        address: text("address"),
        city: text("city"),
        district: text("district"),
        state: text("state"),
        latitude: number("latitude"),
        longitude: number("longitude"),
        reviews,
        facilities,
        is_open: item.get("isOpen").and_then(Value::as_bool),
    })
}

/// A review needs a usable rating; missing text is empty and a missing date is now
fn decode_review(review: &Value) -> Option<Review> {
    let rating = number_field(review, "rating")?.round();
    if !(0.0..=f64::from(u8::MAX)).contains(&rating) {
        return None;
    }

    let date = review
        .get("date")
        .and_then(Value::as_str)
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(Review::new(
        text_field(review, "text").unwrap_or_default(),
        rating as u8,
        date,
    ))
}

fn decode_feature(feature: Value) -> Option<RawPlace> {
    if !feature.is_object() {
        warn!("Skipping non-object feature");
        return None;
    }

    let props = &feature["properties"];
    let text = |key: &str| text_field(props, key);

    let id = text("place_id").or_else(|| id_field(&feature, "id"));

    let coordinates = feature["geometry"]["coordinates"].as_array();
    let coordinate = |idx: usize| coordinates.and_then(|c| c.get(idx)).and_then(Value::as_f64);

    Some(RawPlace {
        id,
        name: text("name"),
        address: text("address_line1").or_else(|| text("address")),
        city: text("city"),
        district: text("district").or_else(|| text("suburb")),
        state: text("state"),
        longitude: coordinate(0),
        latitude: coordinate(1),
        reviews: None,
        facilities: None,
        is_open: None,
    })
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

// Ids arrive as strings or numbers
fn id_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

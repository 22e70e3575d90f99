use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Place, Review, ToiletRecord};
use crate::sources::RawPlace;

pub const DEFAULT_NAME: &str = "Public Toilet";
pub const DEFAULT_ADDRESS: &str = "Address not available";
pub const DEFAULT_CITY: &str = "Unknown City";
pub const DEFAULT_DISTRICT: &str = "Unknown District";
pub const DEFAULT_STATE: &str = "Unknown State";
pub const DEFAULT_FACILITY: &str = "Basic Facilities";
pub const DEFAULT_LANDMARK: &str = "Public Area";

/// Landmark kinds recognised in addresses, checked in order
pub const LANDMARK_KINDS: &[&str] = &[
    "Metro Station",
    "Railway Station",
    "Bus Stand",
    "Market",
    "Hospital",
    "School",
    "Park",
];

/// Convert raw source records into normalized toilet records.
/// Missing fields fall back to defaults; no record is ever rejected.
pub fn normalize_places(raw: Vec<RawPlace>, now: DateTime<Utc>) -> Vec<ToiletRecord> {
    raw.into_iter().map(|place| normalize_place(place, now)).collect()
}

pub fn normalize_place(raw: RawPlace, now: DateTime<Utc>) -> ToiletRecord {
    let address = non_empty(raw.address).unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    let city = non_empty(raw.city);
    let district = non_empty(raw.district)
        .or_else(|| city.clone())
        .unwrap_or_else(|| DEFAULT_DISTRICT.to_string());

    let id = non_empty(raw.id).unwrap_or_else(|| {
        let id = Uuid::new_v4().to_string();
        debug!(%id, "Place without id, generated one");
        id
    });

    let facilities = match raw.facilities {
        Some(facilities) if !facilities.is_empty() => facilities,
        _ => vec![DEFAULT_FACILITY.to_string()],
    };

    let place = Place {
        id,
        name: non_empty(raw.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        landmark: extract_landmark(&address).to_string(),
        address,
        city: city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
        district,
        state: non_empty(raw.state).unwrap_or_else(|| DEFAULT_STATE.to_string()),
        latitude: raw.latitude.unwrap_or(0.0),
        longitude: raw.longitude.unwrap_or(0.0),
        is_open: raw.is_open.unwrap_or(true),
        facilities,
    };

    let reviews: Vec<Review> = raw
        .reviews
        .unwrap_or_default()
        .into_iter()
        .filter(|review| {
            let valid = (1..=5).contains(&review.rating);
            if !valid {
                warn!(place_id = %place.id, rating = review.rating, "Dropping review with out-of-range rating");
            }
            valid
        })
        .collect();

    ToiletRecord::new(place, reviews, now)
}

/// First landmark kind mentioned in the address, or "Public Area"
pub fn extract_landmark(address: &str) -> &'static str {
    let address = address.to_lowercase();
    LANDMARK_KINDS
        .iter()
        .find(|kind| address.contains(&kind.to_lowercase()))
        .copied()
        .unwrap_or(DEFAULT_LANDMARK)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

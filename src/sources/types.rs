use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, Review};

/// Search parameters for a place fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// Center of the search circle
    pub center: Coordinates,
    /// Search radius in kilometers
    pub radius_km: f64,
    /// Maximum number of places to return
    pub limit: u32,
}

impl Default for PlaceQuery {
    fn default() -> Self {
        Self {
            // New Delhi
            center: Coordinates::new(28.6139, 77.2090),
            radius_km: 10.0,
            limit: 20,
        }
    }
}

/// Place record as delivered by an external source. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reviews: Option<Vec<Review>>,
    pub facilities: Option<Vec<String>>,
    pub is_open: Option<bool>,
}

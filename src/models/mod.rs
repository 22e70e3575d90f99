use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{aggregate_rating, classify};

/// Three-level cleanliness label derived from a toilet's reviews
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CleanlinessStatus {
    Good,
    Average,
    Bad,
}

impl CleanlinessStatus {
    /// Fixed ordinal used when sorting by cleanliness: Good(2) > Average(1) > Bad(0)
    pub fn rank(self) -> u8 {
        match self {
            CleanlinessStatus::Good => 2,
            CleanlinessStatus::Average => 1,
            CleanlinessStatus::Bad => 0,
        }
    }
}

impl fmt::Display for CleanlinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CleanlinessStatus::Good => "Good",
            CleanlinessStatus::Average => "Average",
            CleanlinessStatus::Bad => "Bad",
        };
        f.write_str(label)
    }
}

/// A single review left on a toilet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub text: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
}

impl Review {
    pub fn new(text: impl Into<String>, rating: u8, date: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            rating,
            date,
        }
    }
}

/// Descriptive fields of a toilet, everything that is not derived from reviews
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub landmark: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_open: bool,
    pub facilities: Vec<String>,
}

/// Normalized toilet record shown to users.
///
/// `rating` and `cleanliness_status` are always derived from `reviews`; the
/// fields are private so the only way to change them is through
/// [`ToiletRecord::push_review`] or [`ToiletRecord::extend_reviews`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToiletRecord {
    #[serde(flatten)]
    pub place: Place,
    cleanliness_status: CleanlinessStatus,
    rating: f64,
    reviews: Vec<Review>,
    pub last_updated: DateTime<Utc>,
}

impl ToiletRecord {
    pub fn new(place: Place, reviews: Vec<Review>, last_updated: DateTime<Utc>) -> Self {
        let mut record = Self {
            place,
            cleanliness_status: CleanlinessStatus::Average,
            rating: 0.0,
            reviews,
            last_updated,
        };
        record.recompute();
        record
    }

    pub fn id(&self) -> &str {
        &self.place.id
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn cleanliness_status(&self) -> CleanlinessStatus {
        self.cleanliness_status
    }

    /// Reviews in display order, newest last
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.recompute();
    }

    pub fn extend_reviews(&mut self, reviews: impl IntoIterator<Item = Review>) {
        self.reviews.extend(reviews);
        self.recompute();
    }

    /// Re-derive the status from the current reviews. Idempotent.
    pub fn refresh_status(&mut self) {
        self.recompute();
    }

    fn recompute(&mut self) {
        self.rating = aggregate_rating(&self.reviews);
        self.cleanliness_status = classify(&self.reviews);
    }
}

/// A user-submitted review as stored in the journal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserReviewEntry {
    pub id: String,
    pub toilet_id: String,
    pub review: Review,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where the user is looking. At most one mode is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LocationContext {
    #[default]
    Anywhere,
    /// Free-text region, substring-matched against city and district
    Region(String),
    /// Radius search around a coordinate
    Near(Coordinates),
}

impl LocationContext {
    pub fn is_geo(&self) -> bool {
        matches!(self, LocationContext::Near(_))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationContext::Near(coords) => Some(*coords),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Cleanliness,
    Distance,
}

impl SortKey {
    /// Sort options a user can pick from. Distance only makes sense in geo mode.
    pub fn options(geo_active: bool) -> Vec<SortKey> {
        let mut options = vec![SortKey::Rating, SortKey::Cleanliness];
        if geo_active {
            options.push(SortKey::Distance);
        }
        options
    }
}

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Coordinates;
use crate::sources::types::{PlaceQuery, RawPlace};

/// Common trait for all toilet place sources
/// Live APIs and fixtures implement this so the finder can swap them freely
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Fetch raw place records around the query center
    async fn fetch_places(&self, query: &PlaceQuery) -> Result<Vec<RawPlace>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

/// Provider of the device's current position
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoordinateSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates>;
}

//! Session controller: owns the loaded records and the user's current
//! location, search and sort choices, and turns them into a ranked view.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::journal::ReviewJournal;
use crate::models::{LocationContext, SortKey, ToiletRecord, UserReviewEntry};
use crate::pipeline::{
    append_review, enrich, normalize_places, select_with_fallback, SeedFallback, SelectQuery,
    Selection, StatusSummary,
};
use crate::sources::{CoordinateSource, PlaceQuery, PlaceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataOrigin {
    Live,
    Seed,
}

/// Everything the UI layer needs to draw the result list
#[derive(Debug, Clone, Serialize)]
pub struct FinderView {
    pub selection: Selection,
    pub summary: StatusSummary,
    pub sort_options: Vec<SortKey>,
}

pub struct ToiletFinder<S, J> {
    source: Option<S>,
    journal: J,
    seed: Vec<ToiletRecord>,
    config: FinderConfig,
    records: Vec<ToiletRecord>,
    origin: Option<DataOrigin>,
    query: SelectQuery,
    notice: Option<FinderError>,
}

impl<S, J> ToiletFinder<S, J>
where
    S: PlaceSource,
    J: ReviewJournal,
{
    /// `source` may be `None`, in which case every load uses the seed set
    pub fn new(source: Option<S>, journal: J, seed: Vec<ToiletRecord>, config: FinderConfig) -> Self {
        let query = SelectQuery {
            radius_km: config.search_radius_km,
            ..Default::default()
        };

        Self {
            source,
            journal,
            seed,
            config,
            records: Vec::new(),
            origin: None,
            query,
            notice: None,
        }
    }

    pub fn records(&self) -> &[ToiletRecord] {
        &self.records
    }

    pub fn origin(&self) -> Option<DataOrigin> {
        self.origin
    }

    pub fn radius_km(&self) -> f64 {
        self.query.radius_km
    }

    pub fn location(&self) -> &LocationContext {
        &self.query.location
    }

    /// Why the last load fell back to seed data, if it did
    pub fn notice(&self) -> Option<&FinderError> {
        self.notice.as_ref()
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Fetch live records around the active coordinate (or the configured
    /// default) and merge journaled reviews into them. Falls back to the seed
    /// set when the source fails or returns nothing.
    ///
    /// Takes `&mut self`, so only one fetch per finder can be in flight.
    pub async fn load(&mut self) -> Result<DataOrigin> {
        let journal = self.journal.entries()?;
        let query = PlaceQuery {
            center: self
                .query
                .location
                .coordinates()
                .unwrap_or_else(|| self.config.default_center()),
            radius_km: self.config.search_radius_km,
            limit: self.config.fetch_limit,
        };

        self.notice = None;
        let fetched = match &self.source {
            Some(source) => match source.fetch_places(&query).await {
                Ok(places) if !places.is_empty() => {
                    info!("✅ {} returned {} places", source.source_name(), places.len());
                    Ok(places)
                }
                Ok(_) => Err(format!("{} returned no places", source.source_name())),
                Err(e) => Err(format!("{}: {:#}", source.source_name(), e)),
            },
            None => Err("no place source configured".to_string()),
        };

        let origin = match fetched {
            Ok(places) => {
                let base = normalize_places(places, Utc::now());
                self.records = enrich(base, &journal);
                DataOrigin::Live
            }
            Err(reason) => {
                warn!(reason = %reason, "Live data unavailable, using seed data");
                self.notice = Some(FinderError::SourceUnavailable(reason));
                self.records = enrich(self.seed.clone(), &journal);
                DataOrigin::Seed
            }
        };

        info!(?origin, count = self.records.len(), "Toilet data loaded");
        self.origin = Some(origin);
        Ok(origin)
    }

    /// Filter by a free-text region. An empty region shows everything.
    /// Clears any coordinate-based location.
    pub fn select_region(&mut self, region: &str) {
        let region = region.trim();
        self.query.location = if region.is_empty() {
            LocationContext::Anywhere
        } else {
            LocationContext::Region(region.to_string())
        };
        info!(location = ?self.query.location, "Location changed");
    }

    /// Switch to radius mode around the device position and reload.
    ///
    /// If no position can be acquired the session is left unchanged and
    /// region search keeps working.
    pub async fn use_current_location<C>(&mut self, locator: &C) -> Result<DataOrigin>
    where
        C: CoordinateSource + ?Sized,
    {
        let position = match locator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Could not determine current location");
                return Err(FinderError::CoordinatesUnavailable(e.to_string()));
            }
        };

        self.query.location = LocationContext::Near(position);
        info!(
            lat = position.latitude,
            lon = position.longitude,
            "Using current location"
        );
        self.load().await
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search_term = term.to_string();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// Persist a review and apply it to the loaded record.
    ///
    /// Seed toilets shown through the region fallback are not part of the
    /// loaded set; their review is journaled and shows up on the next view.
    pub fn add_review(&mut self, toilet_id: &str, text: &str, rating: u8) -> Result<UserReviewEntry> {
        if let Some(record) = self.records.iter_mut().find(|r| r.id() == toilet_id) {
            return append_review(record, &mut self.journal, text, rating);
        }

        match self.seed.iter().find(|r| r.id() == toilet_id) {
            Some(seed) => {
                let mut scratch = seed.clone();
                append_review(&mut scratch, &mut self.journal, text, rating)
            }
            None => Err(FinderError::UnknownToilet(toilet_id.to_string())),
        }
    }

    pub fn view(&self) -> Result<FinderView> {
        let journal = self.journal.entries()?;
        let selection = select_with_fallback(
            &self.records,
            &self.query,
            SeedFallback {
                records: &self.seed,
                journal: &journal,
            },
        );
        let summary = StatusSummary::from_toilets(&selection.toilets);

        Ok(FinderView {
            selection,
            summary,
            sort_options: SortKey::options(self.query.location.is_geo()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use crate::models::{Coordinates, Place, Review};
    use crate::pipeline::SelectionOutcome;
    use crate::sources::traits::{MockCoordinateSource, MockPlaceSource};
    use crate::sources::RawPlace;

    fn raw(id: &str, city: &str, lat: f64, lon: f64) -> RawPlace {
        RawPlace {
            id: Some(id.to_string()),
            name: Some(format!("Toilet {}", id)),
            address: Some("Near City Market".to_string()),
            city: Some(city.to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
            reviews: Some(vec![Review::new("clean", 4, Utc::now())]),
            ..Default::default()
        }
    }

    fn seed() -> Vec<ToiletRecord> {
        let place = Place {
            id: "seed-1".to_string(),
            name: "Hawa Mahal Public Washroom".to_string(),
            address: "Hawa Mahal Road".to_string(),
            city: "Jaipur".to_string(),
            district: "Jaipur".to_string(),
            state: "Rajasthan".to_string(),
            landmark: "Hawa Mahal".to_string(),
            latitude: 26.9239,
            longitude: 75.8267,
            is_open: true,
            facilities: vec![],
        };
        vec![ToiletRecord::new(
            place,
            vec![Review::new("ok", 3, Utc::now())],
            Utc::now(),
        )]
    }

    fn source_returning(places: Vec<RawPlace>) -> MockPlaceSource {
        let mut source = MockPlaceSource::new();
        source
            .expect_fetch_places()
            .returning(move |_| Ok(places.clone()));
        source.expect_source_name().return_const("mock");
        source
    }

    fn finder(source: Option<MockPlaceSource>) -> ToiletFinder<MockPlaceSource, MemoryJournal> {
        ToiletFinder::new(source, MemoryJournal::new(), seed(), FinderConfig::default())
    }

    #[tokio::test]
    async fn test_load_live_data() {
        let source = source_returning(vec![
            raw("a", "Delhi", 28.63, 77.21),
            raw("b", "Delhi", 28.61, 77.23),
        ]);
        let mut finder = finder(Some(source));

        let origin = finder.load().await.unwrap();

        assert_eq!(origin, DataOrigin::Live);
        assert!(finder.notice().is_none());
        assert_eq!(finder.records().len(), 2);
        assert_eq!(finder.records()[0].place.landmark, "Market");
    }

    #[tokio::test]
    async fn test_load_falls_back_on_error() {
        let mut source = MockPlaceSource::new();
        source
            .expect_fetch_places()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        source.expect_source_name().return_const("mock");
        let mut finder = finder(Some(source));

        let origin = finder.load().await.unwrap();

        assert_eq!(origin, DataOrigin::Seed);
        assert!(matches!(
            finder.notice(),
            Some(FinderError::SourceUnavailable(msg)) if msg.contains("connection refused")
        ));
        assert_eq!(finder.records()[0].id(), "seed-1");
    }

    #[tokio::test]
    async fn test_load_falls_back_on_empty_answer() {
        let mut finder = finder(Some(source_returning(Vec::new())));
        assert_eq!(finder.load().await.unwrap(), DataOrigin::Seed);
    }

    #[tokio::test]
    async fn test_load_without_source_uses_seed() {
        let mut finder = finder(None);
        assert_eq!(finder.load().await.unwrap(), DataOrigin::Seed);
        assert!(finder.notice().is_some());
    }

    #[tokio::test]
    async fn test_journal_is_reapplied_after_reload() {
        let source = source_returning(vec![raw("a", "Delhi", 28.63, 77.21)]);
        let mut finder = finder(Some(source));
        finder.load().await.unwrap();

        finder.add_review("a", "Great and clean!", 5).unwrap();
        assert_eq!(finder.records()[0].reviews().len(), 2);

        finder.load().await.unwrap();
        assert_eq!(finder.records()[0].reviews().len(), 2);
        assert_eq!(finder.records()[0].rating(), 4.5);
    }

    #[tokio::test]
    async fn test_current_location_switches_to_radius_mode() {
        let source = source_returning(vec![
            raw("near", "Delhi", 28.615, 77.21),
            raw("far", "Mumbai", 18.92, 72.83),
        ]);
        let mut finder = finder(Some(source));
        finder.select_region("Mumbai");

        let mut locator = MockCoordinateSource::new();
        locator
            .expect_current_position()
            .returning(|| Ok(Coordinates::new(28.6139, 77.2090)));

        finder.use_current_location(&locator).await.unwrap();
        assert!(finder.location().is_geo());

        let view = finder.view().unwrap();
        let ids: Vec<_> = view.selection.toilets.iter().map(|t| t.record.id()).collect();
        assert_eq!(ids, vec!["near"]);
        assert!(view.sort_options.contains(&SortKey::Distance));
    }

    #[tokio::test]
    async fn test_location_failure_keeps_region_mode() {
        let mut finder = finder(Some(source_returning(vec![raw("a", "Delhi", 28.6, 77.2)])));
        finder.load().await.unwrap();
        finder.select_region("Delhi");

        let mut locator = MockCoordinateSource::new();
        locator
            .expect_current_position()
            .returning(|| Err(anyhow::anyhow!("permission denied")));

        let err = finder.use_current_location(&locator).await.unwrap_err();
        assert!(matches!(err, FinderError::CoordinatesUnavailable(_)));
        assert_eq!(
            finder.location(),
            &LocationContext::Region("Delhi".to_string())
        );
        assert_eq!(finder.view().unwrap().selection.toilets.len(), 1);
    }

    #[tokio::test]
    async fn test_region_clears_coordinates() {
        let mut finder = finder(Some(source_returning(vec![raw("a", "Delhi", 28.6, 77.2)])));
        let locator = crate::sources::FixedLocation::new(Coordinates::new(28.6, 77.2));
        finder.use_current_location(&locator).await.unwrap();

        finder.select_region("Delhi");
        assert!(!finder.location().is_geo());
        assert_eq!(finder.view().unwrap().sort_options.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_fallback_review_shows_on_next_view() {
        let mut finder = finder(Some(source_returning(vec![raw("a", "Delhi", 28.6, 77.2)])));
        finder.load().await.unwrap();
        finder.select_region("Jaipur");

        let before = finder.view().unwrap();
        assert!(before.selection.from_seed);
        assert_eq!(before.selection.toilets[0].record.reviews().len(), 1);

        finder.add_review("seed-1", "spotless", 5).unwrap();

        let after = finder.view().unwrap();
        assert_eq!(after.selection.toilets[0].record.reviews().len(), 2);
        assert_eq!(after.selection.toilets[0].record.rating(), 4.0);
    }

    #[tokio::test]
    async fn test_unknown_toilet_review() {
        let mut finder = finder(None);
        finder.load().await.unwrap();

        let err = finder.add_review("nope", "clean", 4).unwrap_err();
        assert!(matches!(err, FinderError::UnknownToilet(id) if id == "nope"));
        assert!(finder.journal().is_empty());
    }

    #[tokio::test]
    async fn test_view_before_load_is_no_data() {
        let finder = finder(None);
        let view = finder.view().unwrap();
        assert_eq!(view.selection.outcome, SelectionOutcome::NoData);
        assert_eq!(view.summary.total(), 0);
    }
}

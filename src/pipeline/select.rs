//! Locality filter, text search and ranking over in-memory records.

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::distance_km;
use crate::models::{Coordinates, LocationContext, SortKey, ToiletRecord, UserReviewEntry};
use crate::pipeline::enrich::enrich;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// A record that survived filtering, with its distance in geo mode
#[derive(Debug, Clone, Serialize)]
pub struct RankedToilet {
    #[serde(flatten)]
    pub record: ToiletRecord,
    pub distance_km: Option<f64>,
}

/// How a selection ended, so callers can tell an empty area from no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionOutcome {
    Found,
    /// Nothing to filter in the first place
    NoData,
    /// Coordinate mode left nothing inside the radius
    NoneWithinRadius,
    /// Region or search term matched nothing
    NoMatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub toilets: Vec<RankedToilet>,
    pub outcome: SelectionOutcome,
    /// True when the region filter was answered from the seed set
    pub from_seed: bool,
}

#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub location: LocationContext,
    pub search_term: String,
    pub sort: SortKey,
    pub radius_km: f64,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            location: LocationContext::Anywhere,
            search_term: String::new(),
            sort: SortKey::Rating,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

/// Secondary data consulted when a region has no live records
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedFallback<'a> {
    pub records: &'a [ToiletRecord],
    pub journal: &'a [UserReviewEntry],
}

/// Filter, search and sort `records` without a seed fallback
pub fn select(records: &[ToiletRecord], query: &SelectQuery) -> Selection {
    select_with_fallback(records, query, SeedFallback::default())
}

pub fn select_with_fallback(
    records: &[ToiletRecord],
    query: &SelectQuery,
    fallback: SeedFallback<'_>,
) -> Selection {
    if records.is_empty() {
        debug!("No records to select from");
        return Selection {
            toilets: Vec::new(),
            outcome: SelectionOutcome::NoData,
            from_seed: false,
        };
    }

    let mut from_seed = false;
    let located = match &query.location {
        LocationContext::Anywhere => records.iter().cloned().map(unranked).collect(),
        LocationContext::Near(center) => within_radius(records, *center, query.radius_km),
        LocationContext::Region(region) => {
            let matched = in_region(records, region);
            if matched.is_empty() {
                let seeded = in_region(fallback.records, region);
                if seeded.is_empty() {
                    matched
                } else {
                    info!(
                        region = %region,
                        count = seeded.len(),
                        "No live toilets in region, using seed data"
                    );
                    from_seed = true;
                    let raw: Vec<ToiletRecord> = seeded.into_iter().map(|t| t.record).collect();
                    enrich(raw, fallback.journal)
                        .into_iter()
                        .map(unranked)
                        .collect()
                }
            } else {
                matched
            }
        }
    };

    if located.is_empty() {
        let outcome = if query.location.is_geo() {
            SelectionOutcome::NoneWithinRadius
        } else {
            SelectionOutcome::NoMatch
        };
        debug!(?outcome, "Locality filter left nothing");
        return Selection {
            toilets: located,
            outcome,
            from_seed,
        };
    }

    let mut toilets = search(located, &query.search_term);
    sort_toilets(&mut toilets, effective_sort(query));

    let outcome = if toilets.is_empty() {
        SelectionOutcome::NoMatch
    } else {
        SelectionOutcome::Found
    };
    debug!(count = toilets.len(), ?outcome, from_seed, "Selection complete");

    Selection {
        toilets,
        outcome,
        from_seed,
    }
}

fn unranked(record: ToiletRecord) -> RankedToilet {
    RankedToilet {
        record,
        distance_km: None,
    }
}

/// Records within `radius_km` of `center`, each tagged with its distance
pub fn within_radius(
    records: &[ToiletRecord],
    center: Coordinates,
    radius_km: f64,
) -> Vec<RankedToilet> {
    records
        .iter()
        .filter_map(|record| {
            let d = distance_km(
                center.latitude,
                center.longitude,
                record.place.latitude,
                record.place.longitude,
            );
            (d <= radius_km).then(|| RankedToilet {
                record: record.clone(),
                distance_km: Some(d),
            })
        })
        .collect()
}

/// Records whose city or district contains `region`, case-insensitively
pub fn in_region(records: &[ToiletRecord], region: &str) -> Vec<RankedToilet> {
    let needle = region.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.place.city.to_lowercase().contains(&needle)
                || record.place.district.to_lowercase().contains(&needle)
        })
        .cloned()
        .map(unranked)
        .collect()
}

fn search(toilets: Vec<RankedToilet>, term: &str) -> Vec<RankedToilet> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return toilets;
    }

    toilets
        .into_iter()
        .filter(|t| {
            let place = &t.record.place;
            place.name.to_lowercase().contains(&term)
                || place.address.to_lowercase().contains(&term)
                || place.landmark.to_lowercase().contains(&term)
        })
        .collect()
}

fn effective_sort(query: &SelectQuery) -> SortKey {
    if query.sort == SortKey::Distance && !query.location.is_geo() {
        debug!("Distance sort outside coordinate mode, ranking by rating");
        return SortKey::Rating;
    }
    query.sort
}

/// Stable sort: equal keys keep their input order
pub fn sort_toilets(toilets: &mut [RankedToilet], key: SortKey) {
    match key {
        SortKey::Rating => {
            toilets.sort_by(|a, b| b.record.rating().total_cmp(&a.record.rating()))
        }
        SortKey::Cleanliness => toilets.sort_by(|a, b| {
            b.record
                .cleanliness_status()
                .rank()
                .cmp(&a.record.cleanliness_status().rank())
        }),
        SortKey::Distance => toilets.sort_by(|a, b| {
            let da = a.distance_km.unwrap_or(f64::INFINITY);
            let db = b.distance_km.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        }),
    }
}

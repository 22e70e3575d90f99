pub mod enrich;
pub mod ingest;
pub mod select;
pub mod stats;

pub use enrich::{append_review, enrich};
pub use ingest::{extract_landmark, normalize_place, normalize_places};
pub use select::{
    select, select_with_fallback, RankedToilet, SeedFallback, SelectQuery, Selection,
    SelectionOutcome, DEFAULT_RADIUS_KM,
};
pub use stats::{OverallVerdict, StatusSummary};

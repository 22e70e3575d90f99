use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{FinderError, Result};
use crate::journal::ReviewJournal;
use crate::models::{Review, ToiletRecord, UserReviewEntry};

/// Merge journaled user reviews into freshly loaded records.
///
/// Matching entries are appended after the record's own reviews in journal
/// order and the derived fields are recomputed. Records without matches get
/// their status refreshed from their existing reviews.
pub fn enrich(base: Vec<ToiletRecord>, journal: &[UserReviewEntry]) -> Vec<ToiletRecord> {
    let mut merged = 0usize;

    let records: Vec<ToiletRecord> = base
        .into_iter()
        .map(|mut record| {
            let extra: Vec<Review> = journal
                .iter()
                .filter(|entry| entry.toilet_id == record.id())
                .map(|entry| entry.review.clone())
                .collect();

            if extra.is_empty() {
                record.refresh_status();
            } else {
                merged += extra.len();
                record.extend_reviews(extra);
            }
            record
        })
        .collect();

    debug!(
        records = records.len(),
        journal = journal.len(),
        merged,
        "Enriched records with journal"
    );
    records
}

/// Record a user review: journal first, then the in-memory record.
///
/// If the journal write fails the record is left untouched.
pub fn append_review<J: ReviewJournal + ?Sized>(
    record: &mut ToiletRecord,
    journal: &mut J,
    text: &str,
    rating: u8,
) -> Result<UserReviewEntry> {
    if !(1..=5).contains(&rating) {
        return Err(FinderError::InvalidRating(rating));
    }

    let now = Utc::now();
    let entry = UserReviewEntry {
        id: Uuid::new_v4().to_string(),
        toilet_id: record.id().to_string(),
        review: Review::new(text.trim(), rating, now),
        timestamp: now,
    };

    journal.append(&entry)?;
    record.push_review(entry.review.clone());

    info!(
        toilet_id = %entry.toilet_id,
        rating,
        new_rating = record.rating(),
        status = %record.cleanliness_status(),
        "Review added"
    );
    Ok(entry)
}

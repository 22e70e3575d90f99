//! Rule-based cleanliness classifier.
//!
//! The default mode blends the mean star rating (70%) with a keyword score
//! (30%) computed from review text. The recent-average mode ignores text and
//! looks at the five most recently dated reviews only.

use crate::analysis::rating::mean_rating;
use crate::models::{CleanlinessStatus, Review};

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "clean",
    "good",
    "excellent",
    "great",
    "nice",
    "well-maintained",
    "hygienic",
    "spotless",
    "fresh",
    "pleasant",
    "tidy",
    "proper",
    "satisfied",
    "recommended",
    "impressive",
    "maintained",
    "facilities",
    "soap",
    "water",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "dirty",
    "bad",
    "terrible",
    "awful",
    "smelly",
    "unhygienic",
    "poor",
    "broken",
    "disgusting",
    "filthy",
    "mess",
    "stink",
    "avoid",
    "horrible",
    "worst",
    "nasty",
    "unmaintained",
    "issues",
    "problems",
    "complaint",
];

const RATING_WEIGHT: f64 = 0.7;
const KEYWORD_WEIGHT: f64 = 0.3;
const GOOD_THRESHOLD: f64 = 0.65;
const BAD_THRESHOLD: f64 = 0.35;
/// Thresholds are inclusive; scores within this distance count as on the boundary
const SCORE_EPSILON: f64 = 1e-9;

const RECENT_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierMode {
    /// Rating and keyword blend over every review
    #[default]
    Weighted,
    /// Mean rating of the five most recent reviews
    RecentAverage,
}

/// Classify with the default weighted mode
pub fn classify(reviews: &[Review]) -> CleanlinessStatus {
    classify_with(ClassifierMode::Weighted, reviews)
}

pub fn classify_with(mode: ClassifierMode, reviews: &[Review]) -> CleanlinessStatus {
    if reviews.is_empty() {
        return CleanlinessStatus::Average;
    }

    match mode {
        ClassifierMode::Weighted => classify_weighted(reviews),
        ClassifierMode::RecentAverage => classify_recent(reviews),
    }
}

fn classify_weighted(reviews: &[Review]) -> CleanlinessStatus {
    let rating_score = (mean_rating(reviews) - 1.0) / 4.0;

    let mut positive = 0u32;
    let mut negative = 0u32;
    for review in reviews {
        let text = review.text.to_lowercase();
        positive += keyword_hits(&text, POSITIVE_KEYWORDS);
        negative += keyword_hits(&text, NEGATIVE_KEYWORDS);
    }

    let keyword_score = if positive > negative {
        f64::from(positive) / f64::from(positive + negative)
    } else if negative > 0 {
        0.0
    } else {
        0.5
    };

    let score = RATING_WEIGHT * rating_score + KEYWORD_WEIGHT * keyword_score;
    tracing::trace!(rating_score, keyword_score, score, positive, negative, "weighted score");

    if score >= GOOD_THRESHOLD - SCORE_EPSILON {
        CleanlinessStatus::Good
    } else if score <= BAD_THRESHOLD + SCORE_EPSILON {
        CleanlinessStatus::Bad
    } else {
        CleanlinessStatus::Average
    }
}

// Each keyword counts at most once per review.
fn keyword_hits(text: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| text.contains(*kw)).count() as u32
}

fn classify_recent(reviews: &[Review]) -> CleanlinessStatus {
    let mut recent: Vec<&Review> = reviews.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_WINDOW);

    let sum: u32 = recent.iter().map(|r| u32::from(r.rating)).sum();
    let avg = f64::from(sum) / recent.len() as f64;

    if avg >= 4.0 {
        CleanlinessStatus::Good
    } else if avg <= 2.0 {
        CleanlinessStatus::Bad
    } else {
        CleanlinessStatus::Average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn review(text: &str, rating: u8) -> Review {
        Review::new(text, rating, Utc::now())
    }

    fn dated(rating: u8, days_ago: i64) -> Review {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Review::new("ok", rating, base - Duration::days(days_ago))
    }

    #[test]
    fn test_empty_is_average() {
        assert_eq!(classify(&[]), CleanlinessStatus::Average);
        assert_eq!(
            classify_with(ClassifierMode::RecentAverage, &[]),
            CleanlinessStatus::Average
        );
    }

    #[test]
    fn test_clean_five_star_is_good() {
        let reviews = vec![review("very clean and well-maintained", 5)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Good);
    }

    #[test]
    fn test_dirty_one_star_is_bad() {
        let reviews = vec![review("very dirty and smelly", 1)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Bad);
    }

    #[test]
    fn test_no_keywords_uses_neutral_keyword_score() {
        // rating 3 -> 0.5 * 0.7 + 0.5 * 0.3 = 0.5
        let reviews = vec![review("it was ok", 3)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Average);
    }

    #[test]
    fn test_keywords_tip_the_balance() {
        // rating 4 -> 0.75 * 0.7 = 0.525; negative text keeps it below 0.65
        let reviews = vec![review("terrible smell, broken tap", 4)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Average);

        // same rating with positive text: 0.525 + 0.3 = 0.825
        let reviews = vec![review("spotless, soap available", 4)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Good);
    }

    #[test]
    fn test_tie_between_keywords_scores_zero() {
        // positive == negative -> keyword score 0; rating 3 gives 0.35 -> Bad
        let reviews = vec![review("clean but smelly", 3)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Bad);
    }

    #[test]
    fn test_score_on_good_threshold_is_good() {
        // rating 3 with only positive keywords -> 0.35 + 0.3 = 0.65
        let reviews = vec![review("clean", 3)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Good);

        // two reviews averaging 3 land on the same boundary
        let reviews = vec![review("spotless", 2), review("fresh", 4)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Good);
    }

    #[test]
    fn test_score_on_bad_threshold_is_bad() {
        // rating 3 with a keyword tie -> 0.35 + 0.0 = 0.35
        let reviews = vec![review("good", 3), review("poor", 3)];
        assert_eq!(classify(&reviews), CleanlinessStatus::Bad);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        // rating 2 -> 0.175 + 0.3 = 0.475
        let lower = vec![review("clean", 2)];
        let upper = vec![review("CLEAN", 2)];
        assert_eq!(classify(&lower), classify(&upper));
        assert_eq!(classify(&upper), CleanlinessStatus::Average);
    }

    #[test]
    fn test_weighted_is_order_independent() {
        let mut reviews = vec![
            review("dirty floor", 2),
            review("clean enough", 4),
            review("great facilities", 5),
            review("smelly", 1),
        ];
        let forward = classify(&reviews);
        reviews.reverse();
        assert_eq!(classify(&reviews), forward);
    }

    #[test]
    fn test_recent_mode_uses_five_newest() {
        // Five newest are all 5 stars, older ones are 1 star
        let mut reviews = vec![
            dated(1, 30),
            dated(1, 40),
            dated(1, 50),
            dated(5, 1),
            dated(5, 2),
            dated(5, 3),
            dated(5, 4),
            dated(5, 5),
        ];
        assert_eq!(
            classify_with(ClassifierMode::RecentAverage, &reviews),
            CleanlinessStatus::Good
        );

        reviews.reverse();
        assert_eq!(
            classify_with(ClassifierMode::RecentAverage, &reviews),
            CleanlinessStatus::Good
        );

        // Weighted mode sees every review
        assert_ne!(classify(&reviews), CleanlinessStatus::Good);
    }

    #[test]
    fn test_recent_mode_thresholds() {
        let bad = vec![dated(2, 1), dated(2, 2)];
        let average = vec![dated(3, 1), dated(3, 2)];
        assert_eq!(
            classify_with(ClassifierMode::RecentAverage, &bad),
            CleanlinessStatus::Bad
        );
        assert_eq!(
            classify_with(ClassifierMode::RecentAverage, &average),
            CleanlinessStatus::Average
        );
    }
}

use crate::models::Review;

/// Mean rating rounded to one decimal, half away from zero.
///
/// Returns `0.0` for an empty review set instead of NaN.
pub fn aggregate_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let mean = mean_rating(reviews);
    (mean * 10.0).round() / 10.0
}

pub(crate) fn mean_rating(reviews: &[Review]) -> f64 {
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

pub mod distance;
pub mod rating;
pub mod sentiment;

pub use distance::distance_km;
pub use rating::aggregate_rating;
pub use sentiment::{classify, classify_with, ClassifierMode};

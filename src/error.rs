use thiserror::Error;

use crate::journal::JournalError;

pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Debug, Error)]
pub enum FinderError {
    /// Place source failed or returned nothing; the seed set is used instead
    #[error("live toilet data unavailable: {0}")]
    SourceUnavailable(String),

    /// Device position could not be acquired; region search still works
    #[error("coordinates unavailable: {0}")]
    CoordinatesUnavailable(String),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("toilet {0} not found")]
    UnknownToilet(String),

    #[error(transparent)]
    Journal(#[from] JournalError),
}

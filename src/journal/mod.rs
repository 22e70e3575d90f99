//! Append-only store of user-submitted reviews.
//!
//! The journal is passed explicitly into enrichment and review submission so
//! the pipeline runs the same against memory in tests and a file on disk.

mod file;
mod memory;

pub use file::FileJournal;
pub use memory::MemoryJournal;

use thiserror::Error;

use crate::models::UserReviewEntry;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal entry could not be encoded: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait ReviewJournal {
    /// All entries in insertion order
    fn entries(&self) -> Result<Vec<UserReviewEntry>, JournalError>;

    /// Append one entry. The entry must be durable when this returns `Ok`.
    fn append(&mut self, entry: &UserReviewEntry) -> Result<(), JournalError>;
}

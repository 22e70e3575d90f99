use super::{JournalError, ReviewJournal};
use crate::models::UserReviewEntry;

/// Journal kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    entries: Vec<UserReviewEntry>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<UserReviewEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReviewJournal for MemoryJournal {
    fn entries(&self) -> Result<Vec<UserReviewEntry>, JournalError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: &UserReviewEntry) -> Result<(), JournalError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

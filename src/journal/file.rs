use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{JournalError, ReviewJournal};
use crate::models::UserReviewEntry;

/// Journal stored as one JSON object per line
#[derive(Debug, Clone)]
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewJournal for FileJournal {
    fn entries(&self) -> Result<Vec<UserReviewEntry>, JournalError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No journal at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<UserReviewEntry>(&line) {
                Ok(entry) => entries.push(entry),
                // A torn or hand-edited line must not hide the rest of the journal
                Err(e) => warn!(line = idx + 1, error = %e, "Skipping unreadable journal line"),
            }
        }

        debug!("Read {} journal entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    fn append(&mut self, entry: &UserReviewEntry) -> Result<(), JournalError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();

        // Terminate a torn last line so this entry starts on its own line
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                line.insert(0, '\n');
            }
        }

        let written = file
            .write_all(line.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(e) = written {
            // A failed append leaves the file at its previous length
            if let Err(truncate) = file.set_len(len) {
                warn!(error = %truncate, "Failed to roll back partial journal write");
            }
            return Err(e.into());
        }

        debug!(entry_id = %entry.id, toilet_id = %entry.toilet_id, "Appended journal entry");
        Ok(())
    }
}

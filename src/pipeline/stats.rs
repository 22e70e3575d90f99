use serde::Serialize;

use crate::models::CleanlinessStatus;
use crate::pipeline::select::RankedToilet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallVerdict {
    Excellent,
    Average,
    NeedsImprovement,
}

/// Per-status counts over a displayed list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusSummary {
    pub good: usize,
    pub average: usize,
    pub bad: usize,
}

impl StatusSummary {
    pub fn from_toilets(toilets: &[RankedToilet]) -> Self {
        toilets.iter().fold(Self::default(), |mut summary, t| {
            match t.record.cleanliness_status() {
                CleanlinessStatus::Good => summary.good += 1,
                CleanlinessStatus::Average => summary.average += 1,
                CleanlinessStatus::Bad => summary.bad += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.good + self.average + self.bad
    }

    /// Share of `status` in percent, 0 when there is nothing to count
    pub fn percentage(&self, status: CleanlinessStatus) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match status {
            CleanlinessStatus::Good => self.good,
            CleanlinessStatus::Average => self.average,
            CleanlinessStatus::Bad => self.bad,
        };
        count as f64 / total as f64 * 100.0
    }

    pub fn verdict(&self) -> OverallVerdict {
        if self.good > self.bad + self.average {
            OverallVerdict::Excellent
        } else if self.bad > self.good + self.average {
            OverallVerdict::NeedsImprovement
        } else {
            OverallVerdict::Average
        }
    }
}

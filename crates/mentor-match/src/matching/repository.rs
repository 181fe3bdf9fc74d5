use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, MenteeCandidate, MentorCandidate};
use super::engine::{AssignmentRun, MatchSuggestion};

/// Narrowing applied when listing mentors from the pool provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorFilter {
    pub department: Option<String>,
    pub min_seniority: Option<f64>,
}

impl MentorFilter {
    pub fn matches(&self, mentor: &MentorCandidate) -> bool {
        if let Some(department) = &self.department {
            if mentor.department.as_deref() != Some(department.as_str()) {
                return false;
            }
        }
        if let Some(min_seniority) = self.min_seniority {
            if mentor.seniority_years < min_seniority {
                return false;
            }
        }
        true
    }
}

/// Source of candidate snapshots owned by user management.
pub trait CandidatePool: Send + Sync {
    fn list_available_mentors(
        &self,
        filter: &MentorFilter,
    ) -> Result<Vec<MentorCandidate>, PoolError>;
    fn get_mentee(&self, id: &CandidateId) -> Result<Option<MenteeCandidate>, PoolError>;
    fn list_unmatched_mentees(&self) -> Result<Vec<MenteeCandidate>, PoolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("candidate pool unavailable: {0}")]
    Unavailable(String),
}

/// Receives engine output for persistence, notification, and human validation.
pub trait MatchSink: Send + Sync {
    fn record_suggestion(
        &self,
        suggestion: &MatchSuggestion,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError>;
    fn record_assignments(
        &self,
        run: &AssignmentRun,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("match sink unavailable: {0}")]
    Unavailable(String),
}

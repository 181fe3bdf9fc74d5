//! Mentor/mentee compatibility scoring and pairing.
//!
//! The engine is pure computation over borrowed candidate snapshots. Candidate pools and result
//! consumers are traits so the service and router can be exercised with in-memory doubles.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CandidateId, CandidateSide, MenteeCandidate, MentorCandidate};
pub use engine::{
    check_eligibility, is_eligible, score, AssignmentRun, CompatibilityResult, CriteriaConfig,
    CriteriaError, CriteriaUpdate, Dimension, Ineligibility, MatchPass, MatchSuggestion,
    MatchingEngine, NormalizedCriteria, ScoreComponent, SuggestionPolicy, WorkloadLedger,
};
pub use repository::{CandidatePool, MatchSink, MentorFilter, PoolError, SinkError};
pub use router::{matching_router, AssignmentRequest, SuggestionRequest};
pub use service::{MatchingService, MatchingServiceError};

/// Caller errors that abort a single engine call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingError {
    #[error("invalid matching criteria: {0}")]
    Criteria(#[from] CriteriaError),
    #[error("invalid {side} record: {reason}")]
    InvalidCandidate { side: CandidateSide, reason: String },
    #[error("duplicate {side} id {id}")]
    DuplicateCandidate { side: CandidateSide, id: CandidateId },
}

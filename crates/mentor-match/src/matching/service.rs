use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::CandidateId;
use super::engine::{
    AssignmentRun, CriteriaConfig, CriteriaUpdate, MatchSuggestion, MatchingEngine,
    SuggestionPolicy,
};
use super::repository::{CandidatePool, MatchSink, MentorFilter, PoolError, SinkError};
use super::MatchingError;

/// Service composing the candidate pool, the engine, and the downstream sink.
pub struct MatchingService<P, S> {
    pool: Arc<P>,
    sink: Arc<S>,
    engine: Arc<MatchingEngine>,
    criteria: CriteriaConfig,
}

impl<P, S> MatchingService<P, S>
where
    P: CandidatePool + 'static,
    S: MatchSink + 'static,
{
    pub fn new(
        pool: Arc<P>,
        sink: Arc<S>,
        criteria: CriteriaConfig,
        policy: SuggestionPolicy,
    ) -> Result<Self, MatchingServiceError> {
        let engine = Arc::new(MatchingEngine::new(criteria.clone(), policy)?);
        Ok(Self {
            pool,
            sink,
            engine,
            criteria,
        })
    }

    pub fn criteria(&self) -> &CriteriaConfig {
        &self.criteria
    }

    pub fn policy(&self) -> &SuggestionPolicy {
        self.engine.policy()
    }

    /// Rank mentors for a stored mentee and hand the suggestion to the sink.
    pub fn suggest_for(
        &self,
        mentee_id: &CandidateId,
        filter: &MentorFilter,
        overrides: Option<&CriteriaUpdate>,
    ) -> Result<MatchSuggestion, MatchingServiceError> {
        let engine = self.engine_for(overrides)?;
        let mentee = self
            .pool
            .get_mentee(mentee_id)?
            .ok_or_else(|| MatchingServiceError::MenteeNotFound(mentee_id.clone()))?;
        let mentors = self.pool.list_available_mentors(filter)?;

        let suggestion = engine.suggest(&mentee, &mentors)?;
        self.sink.record_suggestion(&suggestion, Utc::now())?;

        info!(
            mentee = %mentee_id,
            pass = ?suggestion.pass,
            suggestions = suggestion.results.len(),
            "suggestions recorded"
        );
        Ok(suggestion)
    }

    /// Assign every unmatched mentee in one greedy run and hand the pairs to the sink.
    pub fn assign_unmatched(
        &self,
        overrides: Option<&CriteriaUpdate>,
    ) -> Result<AssignmentRun, MatchingServiceError> {
        let engine = self.engine_for(overrides)?;
        let mentees = self.pool.list_unmatched_mentees()?;
        let mentors = self.pool.list_available_mentors(&MentorFilter::default())?;

        let run = engine.assign_all(&mentees, &mentors)?;
        self.sink.record_assignments(&run, Utc::now())?;
        Ok(run)
    }

    fn engine_for(
        &self,
        overrides: Option<&CriteriaUpdate>,
    ) -> Result<Arc<MatchingEngine>, MatchingServiceError> {
        match overrides {
            None => Ok(self.engine.clone()),
            Some(update) => {
                let criteria = self.criteria.apply(update).map_err(MatchingError::from)?;
                let engine = MatchingEngine::new(criteria, self.engine.policy().clone())?;
                Ok(Arc::new(engine))
            }
        }
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("mentee {0} not found")]
    MenteeNotFound(CandidateId),
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

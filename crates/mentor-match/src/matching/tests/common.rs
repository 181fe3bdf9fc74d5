use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::matching::domain::{CandidateId, MenteeCandidate, MentorCandidate};
use crate::matching::engine::{
    AssignmentRun, CriteriaConfig, MatchSuggestion, MatchingEngine, SuggestionPolicy,
};
use crate::matching::repository::{
    CandidatePool, MatchSink, MentorFilter, PoolError, SinkError,
};
use crate::matching::{matching_router, MatchingService};

pub(super) fn mentor(id: &str, seniority_years: f64, age: u32, department: &str) -> MentorCandidate {
    MentorCandidate {
        id: CandidateId::from(id),
        seniority_years,
        age,
        department: Some(department.to_string()),
        available: true,
        current_mentees: 0,
    }
}

pub(super) fn mentee(id: &str, seniority_years: f64, age: u32, department: &str) -> MenteeCandidate {
    MenteeCandidate {
        id: CandidateId::from(id),
        seniority_years,
        age,
        department: Some(department.to_string()),
        available: true,
    }
}

pub(super) fn criteria() -> CriteriaConfig {
    CriteriaConfig::default()
}

pub(super) fn criteria_with_capacity(max_concurrent_mentees: u32) -> CriteriaConfig {
    let mut config = criteria();
    config.workload_penalty.max_concurrent_mentees = max_concurrent_mentees;
    config
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(criteria(), SuggestionPolicy::default()).expect("default engine")
}

pub(super) fn engine_with(criteria: CriteriaConfig) -> MatchingEngine {
    MatchingEngine::new(criteria, SuggestionPolicy::default()).expect("engine builds")
}

/// Mentors spanning the interesting cases for a 28 year old engineering mentee.
pub(super) fn mixed_mentor_pool() -> Vec<MentorCandidate> {
    vec![
        mentor("m-ideal", 6.0, 36, "eng"),
        mentor("m-ideal-other-dept", 6.0, 35, "sales"),
        mentor("m-wide-gap", 5.0, 40, "eng"),
        mentor("m-too-old", 12.0, 50, "eng"),
        mentor("m-junior", 1.0, 38, "eng"),
        mentor("m-younger", 9.0, 26, "eng"),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryPool {
    pub(super) mentors: Arc<Mutex<Vec<MentorCandidate>>>,
    pub(super) mentees: Arc<Mutex<BTreeMap<CandidateId, MenteeCandidate>>>,
}

impl MemoryPool {
    pub(super) fn with(mentors: Vec<MentorCandidate>, mentees: Vec<MenteeCandidate>) -> Self {
        let pool = Self::default();
        *pool.mentors.lock().expect("pool mutex poisoned") = mentors;
        {
            let mut guard = pool.mentees.lock().expect("pool mutex poisoned");
            for mentee in mentees {
                guard.insert(mentee.id.clone(), mentee);
            }
        }
        pool
    }
}

impl CandidatePool for MemoryPool {
    fn list_available_mentors(
        &self,
        filter: &MentorFilter,
    ) -> Result<Vec<MentorCandidate>, PoolError> {
        let guard = self.mentors.lock().expect("pool mutex poisoned");
        Ok(guard
            .iter()
            .filter(|mentor| mentor.available && filter.matches(mentor))
            .cloned()
            .collect())
    }

    fn get_mentee(&self, id: &CandidateId) -> Result<Option<MenteeCandidate>, PoolError> {
        let guard = self.mentees.lock().expect("pool mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_unmatched_mentees(&self) -> Result<Vec<MenteeCandidate>, PoolError> {
        let guard = self.mentees.lock().expect("pool mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailablePool;

impl CandidatePool for UnavailablePool {
    fn list_available_mentors(
        &self,
        _filter: &MentorFilter,
    ) -> Result<Vec<MentorCandidate>, PoolError> {
        Err(PoolError::Unavailable("directory offline".to_string()))
    }

    fn get_mentee(&self, _id: &CandidateId) -> Result<Option<MenteeCandidate>, PoolError> {
        Err(PoolError::Unavailable("directory offline".to_string()))
    }

    fn list_unmatched_mentees(&self) -> Result<Vec<MenteeCandidate>, PoolError> {
        Err(PoolError::Unavailable("directory offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    suggestions: Arc<Mutex<Vec<(MatchSuggestion, DateTime<Utc>)>>>,
    runs: Arc<Mutex<Vec<AssignmentRun>>>,
}

impl MemorySink {
    pub(super) fn suggestions(&self) -> Vec<MatchSuggestion> {
        self.suggestions
            .lock()
            .expect("sink mutex poisoned")
            .iter()
            .map(|(suggestion, _)| suggestion.clone())
            .collect()
    }

    pub(super) fn runs(&self) -> Vec<AssignmentRun> {
        self.runs.lock().expect("sink mutex poisoned").clone()
    }
}

impl MatchSink for MemorySink {
    fn record_suggestion(
        &self,
        suggestion: &MatchSuggestion,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        self.suggestions
            .lock()
            .expect("sink mutex poisoned")
            .push((suggestion.clone(), recorded_at));
        Ok(())
    }

    fn record_assignments(
        &self,
        run: &AssignmentRun,
        _recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        self.runs.lock().expect("sink mutex poisoned").push(run.clone());
        Ok(())
    }
}

pub(super) struct FailingSink;

impl MatchSink for FailingSink {
    fn record_suggestion(
        &self,
        _suggestion: &MatchSuggestion,
        _recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("queue full".to_string()))
    }

    fn record_assignments(
        &self,
        _run: &AssignmentRun,
        _recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("queue full".to_string()))
    }
}

pub(super) fn build_service() -> (
    MatchingService<MemoryPool, MemorySink>,
    Arc<MemoryPool>,
    Arc<MemorySink>,
) {
    let pool = Arc::new(MemoryPool::with(
        mixed_mentor_pool(),
        vec![
            mentee("e-new", 0.5, 28, "eng"),
            mentee("e-mid", 2.0, 30, "sales"),
        ],
    ));
    let sink = Arc::new(MemorySink::default());
    let service = MatchingService::new(
        pool.clone(),
        sink.clone(),
        criteria(),
        SuggestionPolicy::default(),
    )
    .expect("service builds");
    (service, pool, sink)
}

pub(super) fn router_with_service(
    service: MatchingService<MemoryPool, MemorySink>,
) -> axum::Router {
    matching_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

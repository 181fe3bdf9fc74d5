use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use mentor_match::error::AppError;
use mentor_match::matching::{
    AssignmentRun, CandidateId, CandidatePool, MatchSink, MatchSuggestion, MatchingServiceError,
    MenteeCandidate, MentorCandidate, MentorFilter, PoolError, SinkError,
};
use mentor_match::roster::RosterImporter;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

/// Most recent sink records kept for `/api/v1/matching/history`.
pub(crate) const HISTORY_LIMIT: usize = 200;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidate snapshots held in process, seeded from roster exports.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidatePool {
    mentors: Arc<Mutex<Vec<MentorCandidate>>>,
    mentees: Arc<Mutex<BTreeMap<CandidateId, MenteeCandidate>>>,
    matched: Arc<Mutex<BTreeSet<CandidateId>>>,
}

impl InMemoryCandidatePool {
    pub(crate) fn from_rosters(
        mentors: Option<&Path>,
        mentees: Option<&Path>,
    ) -> Result<Self, AppError> {
        let pool = Self::default();
        if let Some(path) = mentors {
            pool.replace_mentors(RosterImporter::mentors_from_path(path)?)
                .map_err(MatchingServiceError::from)?;
        }
        if let Some(path) = mentees {
            pool.replace_mentees(RosterImporter::mentees_from_path(path)?)
                .map_err(MatchingServiceError::from)?;
        }
        Ok(pool)
    }

    pub(crate) fn replace_mentors(&self, mentors: Vec<MentorCandidate>) -> Result<(), PoolError> {
        *lock(&self.mentors)? = mentors;
        Ok(())
    }

    pub(crate) fn replace_mentees(&self, mentees: Vec<MenteeCandidate>) -> Result<(), PoolError> {
        let mut guard = lock(&self.mentees)?;
        guard.clear();
        for mentee in mentees {
            guard.insert(mentee.id.clone(), mentee);
        }
        lock(&self.matched)?.clear();
        Ok(())
    }

    /// Fold an accepted run back into the pool: paired mentees leave the unmatched listing and
    /// their mentors carry the extra load into later runs.
    pub(crate) fn commit_run(&self, run: &AssignmentRun) -> Result<(), PoolError> {
        let mut matched = lock(&self.matched)?;
        let mut mentors = lock(&self.mentors)?;
        for pair in &run.pairs {
            matched.insert(pair.mentee_id.clone());
            if let Some(mentor) = mentors.iter_mut().find(|mentor| mentor.id == pair.mentor_id) {
                mentor.current_mentees = mentor.current_mentees.saturating_add(1);
            }
        }
        Ok(())
    }

    pub(crate) fn counts(&self) -> Result<(usize, usize), PoolError> {
        Ok((lock(&self.mentors)?.len(), lock(&self.mentees)?.len()))
    }
}

impl CandidatePool for InMemoryCandidatePool {
    fn list_available_mentors(
        &self,
        filter: &MentorFilter,
    ) -> Result<Vec<MentorCandidate>, PoolError> {
        Ok(lock(&self.mentors)?
            .iter()
            .filter(|mentor| mentor.available && filter.matches(mentor))
            .cloned()
            .collect())
    }

    fn get_mentee(&self, id: &CandidateId) -> Result<Option<MenteeCandidate>, PoolError> {
        Ok(lock(&self.mentees)?.get(id).cloned())
    }

    fn list_unmatched_mentees(&self) -> Result<Vec<MenteeCandidate>, PoolError> {
        let mentees = lock(&self.mentees)?;
        let matched = lock(&self.matched)?;
        Ok(mentees
            .values()
            .filter(|mentee| mentee.available && !matched.contains(&mentee.id))
            .cloned()
            .collect())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PoolError> {
    mutex
        .lock()
        .map_err(|_| PoolError::Unavailable("candidate pool lock poisoned".to_string()))
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum MatchRecord {
    Suggestion {
        recorded_at: DateTime<Utc>,
        suggestion: MatchSuggestion,
    },
    Assignments {
        recorded_at: DateTime<Utc>,
        run: AssignmentRun,
    },
}

/// Commits assignment runs to the pool and keeps a bounded history of engine output.
#[derive(Clone)]
pub(crate) struct InMemoryMatchSink {
    pool: InMemoryCandidatePool,
    history: Arc<Mutex<VecDeque<MatchRecord>>>,
}

impl InMemoryMatchSink {
    pub(crate) fn new(pool: InMemoryCandidatePool) -> Self {
        Self {
            pool,
            history: Arc::new(Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT))),
        }
    }

    /// Oldest first.
    pub(crate) fn history(&self) -> Result<Vec<MatchRecord>, SinkError> {
        Ok(self.history_guard()?.iter().cloned().collect())
    }

    fn push(&self, record: MatchRecord) -> Result<(), SinkError> {
        let mut history = self.history_guard()?;
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(record);
        Ok(())
    }

    fn history_guard(&self) -> Result<MutexGuard<'_, VecDeque<MatchRecord>>, SinkError> {
        self.history
            .lock()
            .map_err(|_| SinkError::Unavailable("match history lock poisoned".to_string()))
    }
}

impl MatchSink for InMemoryMatchSink {
    fn record_suggestion(
        &self,
        suggestion: &MatchSuggestion,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        self.push(MatchRecord::Suggestion {
            recorded_at,
            suggestion: suggestion.clone(),
        })
    }

    fn record_assignments(
        &self,
        run: &AssignmentRun,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), SinkError> {
        self.pool
            .commit_run(run)
            .map_err(|err| SinkError::Unavailable(err.to_string()))?;
        self.push(MatchRecord::Assignments {
            recorded_at,
            run: run.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_match::matching::{CriteriaConfig, MatchingService, SuggestionPolicy};

    fn mentor(id: &str, seniority_years: f64, age: u32) -> MentorCandidate {
        MentorCandidate {
            id: CandidateId::from(id),
            seniority_years,
            age,
            department: Some("eng".to_string()),
            available: true,
            current_mentees: 0,
        }
    }

    fn mentee(id: &str, available: bool) -> MenteeCandidate {
        MenteeCandidate {
            id: CandidateId::from(id),
            seniority_years: 1.0,
            age: 27,
            department: None,
            available,
        }
    }

    #[test]
    fn unmatched_listing_skips_unavailable_mentees() {
        let pool = InMemoryCandidatePool::default();
        pool.replace_mentees(vec![mentee("e-1", true), mentee("e-2", false)])
            .expect("pool writable");

        let listed = pool.list_unmatched_mentees().expect("pool readable");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, CandidateId::from("e-1"));
        assert!(pool
            .get_mentee(&CandidateId::from("e-2"))
            .expect("pool readable")
            .is_some());
    }

    #[test]
    fn missing_roster_path_fails_seeding() {
        let result = InMemoryCandidatePool::from_rosters(
            Some(Path::new("/nonexistent/mentors.csv")),
            None,
        );
        assert!(matches!(result, Err(AppError::Roster(_))));
    }

    #[test]
    fn repeated_assignment_runs_do_not_reassign_or_overload() {
        let pool = InMemoryCandidatePool::default();
        pool.replace_mentors(vec![mentor("m-1", 6.0, 36)])
            .expect("pool writable");
        pool.replace_mentees(vec![mentee("e-1", true), mentee("e-2", true)])
            .expect("pool writable");
        let sink = InMemoryMatchSink::new(pool.clone());
        let mut criteria = CriteriaConfig::default();
        criteria.workload_penalty.max_concurrent_mentees = 1;
        let service = MatchingService::new(
            Arc::new(pool.clone()),
            Arc::new(sink.clone()),
            criteria,
            SuggestionPolicy::default(),
        )
        .expect("service builds");

        let first = service.assign_unmatched(None).expect("first run");
        assert_eq!(first.pairs.len(), 1);
        assert_eq!(first.pairs[0].mentee_id, CandidateId::from("e-1"));
        assert_eq!(first.unmatched, vec![CandidateId::from("e-2")]);

        let second = service.assign_unmatched(None).expect("second run");
        assert!(second.pairs.is_empty());
        assert_eq!(second.unmatched, vec![CandidateId::from("e-2")]);

        let mentors = pool
            .list_available_mentors(&MentorFilter::default())
            .expect("pool readable");
        assert_eq!(mentors[0].current_mentees, 1);
        assert_eq!(sink.history().expect("history readable").len(), 2);
    }

    #[test]
    fn replacing_mentees_resets_matched_state() {
        let pool = InMemoryCandidatePool::default();
        pool.replace_mentees(vec![mentee("e-1", true)])
            .expect("pool writable");
        let run = AssignmentRun {
            pairs: vec![mentor_match::matching::CompatibilityResult {
                mentor_id: CandidateId::from("m-1"),
                mentee_id: CandidateId::from("e-1"),
                score: 90,
                mentor_workload: 0,
                breakdown: Vec::new(),
            }],
            unmatched: Vec::new(),
            workload: Default::default(),
        };
        pool.commit_run(&run).expect("pool writable");
        assert!(pool.list_unmatched_mentees().expect("readable").is_empty());

        pool.replace_mentees(vec![mentee("e-1", true)])
            .expect("pool writable");
        assert_eq!(pool.list_unmatched_mentees().expect("readable").len(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let sink = InMemoryMatchSink::new(InMemoryCandidatePool::default());
        let suggestion = MatchSuggestion {
            mentee_id: CandidateId::from("e-1"),
            pass: mentor_match::matching::MatchPass::Strict,
            results: Vec::new(),
        };

        for _ in 0..HISTORY_LIMIT + 5 {
            sink.record_suggestion(&suggestion, Utc::now())
                .expect("sink writable");
        }

        assert_eq!(sink.history().expect("readable").len(), HISTORY_LIMIT);
    }
}

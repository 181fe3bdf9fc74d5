mod criteria;
mod eligibility;
mod scoring;
mod workload;

pub use criteria::{
    AgeGapCriterion, AgeGapUpdate, CriteriaConfig, CriteriaError, CriteriaUpdate,
    DepartmentCriterion, DepartmentUpdate, Dimension, NormalizedCriteria, SeniorityCriterion,
    SeniorityUpdate, WorkloadCriterion, WorkloadUpdate,
};
pub use eligibility::{check_eligibility, is_eligible, Ineligibility};
pub use scoring::score;
pub use workload::WorkloadLedger;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{
    validate_mentee, validate_mentees, validate_mentors, CandidateId, MenteeCandidate,
    MentorCandidate,
};
use super::MatchingError;

/// Which eligibility pass produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    Strict,
    /// Fallback at a lower threshold with half age credit up to the hard age-gap limit.
    Relaxed,
}

/// Contribution of a single dimension, kept for audit and UI transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub dimension: Dimension,
    pub points: f64,
    pub max_points: f64,
    pub notes: String,
}

/// Scored mentor/mentee pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub mentor_id: CandidateId,
    pub mentee_id: CandidateId,
    /// 0 to 100, rounded.
    pub score: u8,
    /// Mentor workload the score was computed at.
    pub mentor_workload: u32,
    pub breakdown: Vec<ScoreComponent>,
}

/// Ranked, non-binding suggestions for one mentee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    pub mentee_id: CandidateId,
    pub pass: MatchPass,
    pub results: Vec<CompatibilityResult>,
}

impl MatchSuggestion {
    pub fn is_relaxed(&self) -> bool {
        self.pass == MatchPass::Relaxed
    }
}

/// Result of a batch assignment: resolved pairs plus the run-local workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRun {
    pub pairs: Vec<CompatibilityResult>,
    /// Mentees left without an eligible mentor, in processing order.
    pub unmatched: Vec<CandidateId>,
    pub workload: WorkloadLedger,
}

/// Thresholds and caps governing suggestion mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionPolicy {
    pub max_suggestions: usize,
    pub min_score: u8,
    pub relaxed_min_score: u8,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            max_suggestions: 3,
            min_score: 50,
            relaxed_min_score: 30,
        }
    }
}

/// Stateless matcher applying one validated criteria set.
///
/// Each call owns its workload ledger, so a single engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    criteria: NormalizedCriteria,
    policy: SuggestionPolicy,
}

impl MatchingEngine {
    pub fn new(criteria: CriteriaConfig, policy: SuggestionPolicy) -> Result<Self, MatchingError> {
        let criteria = criteria.normalize()?;
        Ok(Self { criteria, policy })
    }

    pub fn criteria(&self) -> &NormalizedCriteria {
        &self.criteria
    }

    pub fn policy(&self) -> &SuggestionPolicy {
        &self.policy
    }

    /// Rank mentors for one mentee, falling back to a relaxed pass when the strict pass leaves
    /// nobody above the threshold.
    pub fn suggest(
        &self,
        mentee: &MenteeCandidate,
        mentors: &[MentorCandidate],
    ) -> Result<MatchSuggestion, MatchingError> {
        validate_mentee(mentee)?;
        validate_mentors(mentors)?;

        let ledger = WorkloadLedger::seeded(mentors);

        let mut pass = MatchPass::Strict;
        let mut results =
            self.scored_candidates(mentee, mentors, &ledger, pass, self.policy.min_score);

        if results.is_empty() {
            debug!(mentee = %mentee.id, "strict pass produced no suggestions; relaxing");
            pass = MatchPass::Relaxed;
            results = self.scored_candidates(
                mentee,
                mentors,
                &ledger,
                pass,
                self.policy.relaxed_min_score,
            );
        }

        rank(&mut results);
        results.truncate(self.policy.max_suggestions);

        Ok(MatchSuggestion {
            mentee_id: mentee.id.clone(),
            pass,
            results,
        })
    }

    /// Greedily assign one mentor per mentee, least-tenured mentees first.
    pub fn assign_all(
        &self,
        mentees: &[MenteeCandidate],
        mentors: &[MentorCandidate],
    ) -> Result<AssignmentRun, MatchingError> {
        validate_mentees(mentees)?;
        validate_mentors(mentors)?;

        let mut order: Vec<&MenteeCandidate> = mentees.iter().collect();
        order.sort_by(|left, right| {
            left.seniority_years
                .total_cmp(&right.seniority_years)
                .then_with(|| left.id.cmp(&right.id))
        });

        let mut workload = WorkloadLedger::seeded(mentors);
        let mut pairs = Vec::new();
        let mut unmatched = Vec::new();

        for mentee in order {
            let mut candidates =
                self.scored_candidates(mentee, mentors, &workload, MatchPass::Strict, 0);
            rank(&mut candidates);

            match candidates.into_iter().next() {
                Some(best) => {
                    let assigned = workload.increment(&best.mentor_id);
                    debug!(
                        mentee = %mentee.id,
                        mentor = %best.mentor_id,
                        score = best.score,
                        workload = assigned,
                        "mentor assigned"
                    );
                    pairs.push(best);
                }
                None => {
                    debug!(mentee = %mentee.id, "no eligible mentor");
                    unmatched.push(mentee.id.clone());
                }
            }
        }

        info!(
            mentees = mentees.len(),
            mentors = mentors.len(),
            assigned = pairs.len(),
            unmatched = unmatched.len(),
            "assignment run complete"
        );

        Ok(AssignmentRun {
            pairs,
            unmatched,
            workload,
        })
    }

    fn scored_candidates(
        &self,
        mentee: &MenteeCandidate,
        mentors: &[MentorCandidate],
        workload: &WorkloadLedger,
        pass: MatchPass,
        min_score: u8,
    ) -> Vec<CompatibilityResult> {
        mentors
            .iter()
            .filter_map(|mentor| {
                let current = workload.get(&mentor.id);
                if !is_eligible(mentor, mentee, current, &self.criteria, pass) {
                    return None;
                }
                let result = score(mentor, mentee, &self.criteria, current, pass);
                (result.score >= min_score).then_some(result)
            })
            .collect()
    }
}

/// Best first: score descending, then lighter mentor workload, then mentor id.
fn rank(results: &mut [CompatibilityResult]) {
    results.sort_by(compare_results);
}

fn compare_results(left: &CompatibilityResult, right: &CompatibilityResult) -> Ordering {
    right
        .score
        .cmp(&left.score)
        .then_with(|| left.mentor_workload.cmp(&right.mentor_workload))
        .then_with(|| left.mentor_id.cmp(&right.mentor_id))
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateId, MentorCandidate};

/// Mentee count per mentor for the duration of one engine call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkloadLedger {
    counts: BTreeMap<CandidateId, u32>,
}

impl WorkloadLedger {
    /// Start from the load each mentor already carries outside this run.
    pub fn seeded(mentors: &[MentorCandidate]) -> Self {
        let counts = mentors
            .iter()
            .map(|mentor| (mentor.id.clone(), mentor.current_mentees))
            .collect();
        Self { counts }
    }

    pub fn get(&self, mentor: &CandidateId) -> u32 {
        self.counts.get(mentor).copied().unwrap_or(0)
    }

    /// Record one more mentee for the mentor and return the new count.
    pub fn increment(&mut self, mentor: &CandidateId) -> u32 {
        let count = self.counts.entry(mentor.clone()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CandidateId, u32)> {
        self.counts.iter().map(|(id, count)| (id, *count))
    }
}

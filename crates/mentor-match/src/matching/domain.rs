use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::MatchingError;

/// Identifier wrapper shared by mentors and mentees.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Which side of the relationship a record belongs to, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSide {
    Mentor,
    Mentee,
}

impl CandidateSide {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateSide::Mentor => "mentor",
            CandidateSide::Mentee => "mentee",
        }
    }
}

impl fmt::Display for CandidateSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of a mentor as supplied by the candidate pool provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorCandidate {
    pub id: CandidateId,
    pub seniority_years: f64,
    pub age: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Mentees already assigned outside the current run.
    #[serde(default)]
    pub current_mentees: u32,
}

/// Snapshot of a mentee awaiting a pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenteeCandidate {
    pub id: CandidateId,
    pub seniority_years: f64,
    pub age: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Tenure in years when it is usable for scoring; negative or non-finite values are out of range.
pub(crate) fn usable_seniority(years: f64) -> Option<f64> {
    (years.is_finite() && years >= 0.0).then_some(years)
}

/// Age when it is usable for scoring; zero is treated as unknown.
pub(crate) fn usable_age(age: u32) -> Option<u32> {
    (age > 0).then_some(age)
}

/// Signed mentor-minus-mentee age difference, or `None` when either age is unusable.
pub(crate) fn age_difference(mentor: &MentorCandidate, mentee: &MenteeCandidate) -> Option<i64> {
    let mentor_age = usable_age(mentor.age)?;
    let mentee_age = usable_age(mentee.age)?;
    Some(i64::from(mentor_age) - i64::from(mentee_age))
}

pub(crate) fn same_department(mentor: &MentorCandidate, mentee: &MenteeCandidate) -> bool {
    match (mentor.department.as_deref(), mentee.department.as_deref()) {
        (Some(left), Some(right)) => {
            let left = left.trim();
            !left.is_empty() && left == right.trim()
        }
        _ => false,
    }
}

pub(crate) fn validate_mentors(mentors: &[MentorCandidate]) -> Result<(), MatchingError> {
    validate_ids(mentors.iter().map(|mentor| &mentor.id), CandidateSide::Mentor)
}

pub(crate) fn validate_mentees(mentees: &[MenteeCandidate]) -> Result<(), MatchingError> {
    validate_ids(mentees.iter().map(|mentee| &mentee.id), CandidateSide::Mentee)
}

pub(crate) fn validate_mentee(mentee: &MenteeCandidate) -> Result<(), MatchingError> {
    validate_ids(std::iter::once(&mentee.id), CandidateSide::Mentee)
}

fn validate_ids<'a, I>(ids: I, side: CandidateSide) -> Result<(), MatchingError>
where
    I: IntoIterator<Item = &'a CandidateId>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.0.trim().is_empty() {
            return Err(MatchingError::InvalidCandidate {
                side,
                reason: "missing identifier".to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(MatchingError::DuplicateCandidate {
                side,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

use serde::{Deserialize, Serialize};

use super::super::domain::{age_difference, usable_seniority, MenteeCandidate, MentorCandidate};
use super::criteria::NormalizedCriteria;
use super::MatchPass;

/// First hard gate a mentor failed for a given mentee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "gate")]
pub enum Ineligibility {
    Unavailable,
    InsufficientSeniority { required: f64, actual: f64 },
    NotOlderThanMentee,
    AtCapacity { workload: u32, cap: u32 },
    AgeGapTooWide { gap: i64, hard_max: u32 },
}

impl Ineligibility {
    pub fn summary(&self) -> String {
        match self {
            Ineligibility::Unavailable => "mentor marked unavailable".to_string(),
            Ineligibility::InsufficientSeniority { required, actual } => format!(
                "mentor tenure {:.1}y below required {:.1}y",
                actual, required
            ),
            Ineligibility::NotOlderThanMentee => "mentor is not older than mentee".to_string(),
            Ineligibility::AtCapacity { workload, cap } => {
                format!("mentor already has {workload} of {cap} mentees")
            }
            Ineligibility::AgeGapTooWide { gap, hard_max } => {
                format!("age gap {gap} exceeds hard limit {hard_max}")
            }
        }
    }
}

/// Apply the hard gates in order, reporting the first one that fails.
///
/// The gates are the same in both passes. The relaxed pass widens age-band credit up to the
/// hard limit when scoring; it never admits a gap beyond it.
pub fn check_eligibility(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    mentor_workload: u32,
    criteria: &NormalizedCriteria,
    _pass: MatchPass,
) -> Result<(), Ineligibility> {
    let config = criteria.config();

    if !mentor.available {
        return Err(Ineligibility::Unavailable);
    }

    let required = config.seniority.min_required;
    match usable_seniority(mentor.seniority_years) {
        Some(actual) if actual >= required => {}
        _ => {
            return Err(Ineligibility::InsufficientSeniority {
                required,
                actual: mentor.seniority_years,
            })
        }
    }

    let gap = match age_difference(mentor, mentee) {
        Some(gap) if gap > 0 => gap,
        _ => return Err(Ineligibility::NotOlderThanMentee),
    };

    let cap = criteria.max_concurrent_mentees();
    if mentor_workload >= cap {
        return Err(Ineligibility::AtCapacity {
            workload: mentor_workload,
            cap,
        });
    }

    if gap > i64::from(config.age_gap.hard_max) {
        return Err(Ineligibility::AgeGapTooWide {
            gap,
            hard_max: config.age_gap.hard_max,
        });
    }

    Ok(())
}

pub fn is_eligible(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    mentor_workload: u32,
    criteria: &NormalizedCriteria,
    pass: MatchPass,
) -> bool {
    check_eligibility(mentor, mentee, mentor_workload, criteria, pass).is_ok()
}

use super::super::domain::{
    age_difference, same_department, usable_seniority, MenteeCandidate, MentorCandidate,
};
use super::criteria::{Dimension, NormalizedCriteria};
use super::{CompatibilityResult, MatchPass, ScoreComponent};

/// Score one mentor against one mentee.
///
/// Total for every structurally valid input: out-of-range attributes contribute zero points to
/// their dimension instead of failing.
pub fn score(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    criteria: &NormalizedCriteria,
    mentor_workload: u32,
    pass: MatchPass,
) -> CompatibilityResult {
    let breakdown = vec![
        seniority_component(mentor, mentee, criteria),
        age_gap_component(mentor, mentee, criteria, pass),
        department_component(mentor, mentee, criteria),
        workload_component(criteria, mentor_workload),
    ];

    let earned: f64 = breakdown.iter().map(|component| component.points).sum();
    let percentage = (100.0 * earned / criteria.total_weight()).round();

    CompatibilityResult {
        mentor_id: mentor.id.clone(),
        mentee_id: mentee.id.clone(),
        score: percentage.clamp(0.0, 100.0) as u8,
        mentor_workload,
        breakdown,
    }
}

fn seniority_component(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    criteria: &NormalizedCriteria,
) -> ScoreComponent {
    let settings = &criteria.config().seniority;
    let max_points = criteria.max_points(Dimension::Seniority);

    let (points, notes) = match (
        usable_seniority(mentor.seniority_years),
        usable_seniority(mentee.seniority_years),
    ) {
        (Some(mentor_years), Some(mentee_years)) => {
            let gap = mentor_years - mentee_years;
            match settings.min_acceptable_difference {
                Some(min_gap) if gap < min_gap => (
                    0.0,
                    format!("tenure gap {gap:.1}y below minimum {min_gap:.1}y"),
                ),
                _ => {
                    let counted = match settings.max_acceptable_difference {
                        Some(max_gap) => mentor_years.min(mentee_years + max_gap),
                        None => mentor_years,
                    };
                    (
                        (counted * 2.0).min(max_points),
                        format!("mentor tenure {mentor_years:.1}y (counted {counted:.1}y)"),
                    )
                }
            }
        }
        _ => (0.0, "tenure out of range".to_string()),
    };

    ScoreComponent {
        dimension: Dimension::Seniority,
        points,
        max_points,
        notes,
    }
}

fn age_gap_component(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    criteria: &NormalizedCriteria,
    pass: MatchPass,
) -> ScoreComponent {
    let band = &criteria.config().age_gap;
    let max_points = criteria.max_points(Dimension::AgeGap);

    let (points, notes) = match age_difference(mentor, mentee) {
        Some(diff) if diff > 0 => {
            let diff = diff as u64;
            if u64::from(band.ideal_min) <= diff && diff <= u64::from(band.ideal_max) {
                (max_points, format!("age gap {diff} within ideal band"))
            } else if pass == MatchPass::Relaxed && diff <= u64::from(band.hard_max) {
                (
                    max_points / 2.0,
                    format!("age gap {diff} accepted under relaxed band"),
                )
            } else {
                (0.0, format!("age gap {diff} outside ideal band"))
            }
        }
        Some(_) => (0.0, "mentor is not older than mentee".to_string()),
        None => (0.0, "age out of range".to_string()),
    };

    ScoreComponent {
        dimension: Dimension::AgeGap,
        points,
        max_points,
        notes,
    }
}

fn department_component(
    mentor: &MentorCandidate,
    mentee: &MenteeCandidate,
    criteria: &NormalizedCriteria,
) -> ScoreComponent {
    let max_points = criteria.max_points(Dimension::SameDepartment);
    let (points, notes) = if same_department(mentor, mentee) {
        (max_points, "same department".to_string())
    } else {
        (0.0, "different department".to_string())
    };

    ScoreComponent {
        dimension: Dimension::SameDepartment,
        points,
        max_points,
        notes,
    }
}

fn workload_component(criteria: &NormalizedCriteria, mentor_workload: u32) -> ScoreComponent {
    let max_points = criteria.max_points(Dimension::WorkloadPenalty);
    let cap = criteria.max_concurrent_mentees();
    let step = max_points / f64::from(cap);
    let points = (max_points - f64::from(mentor_workload) * step).max(0.0);

    ScoreComponent {
        dimension: Dimension::WorkloadPenalty,
        points,
        max_points,
        notes: format!("{mentor_workload} of {cap} mentee slots in use"),
    }
}

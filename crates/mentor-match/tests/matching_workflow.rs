use mentor_match::matching::{
    CandidateId, CriteriaConfig, Dimension, MatchPass, MatchingEngine, MenteeCandidate,
    MentorCandidate, SuggestionPolicy,
};

fn mentor(id: &str, seniority_years: f64, age: u32, department: &str) -> MentorCandidate {
    MentorCandidate {
        id: CandidateId::from(id),
        seniority_years,
        age,
        department: Some(department.to_string()),
        available: true,
        current_mentees: 0,
    }
}

fn mentee(id: &str, seniority_years: f64, age: u32, department: &str) -> MenteeCandidate {
    MenteeCandidate {
        id: CandidateId::from(id),
        seniority_years,
        age,
        department: Some(department.to_string()),
        available: true,
    }
}

fn default_engine() -> MatchingEngine {
    MatchingEngine::new(CriteriaConfig::default(), SuggestionPolicy::default())
        .expect("default criteria are valid")
}

#[test]
fn age_gap_past_ideal_band_keeps_seniority_and_department_credit() {
    let engine = default_engine();
    let mentors = vec![mentor("m-1", 5.0, 40, "eng")];

    let suggestion = engine
        .suggest(&mentee("e-1", 1.0, 28, "eng"), &mentors)
        .expect("suggest succeeds");

    assert_eq!(suggestion.pass, MatchPass::Strict);
    assert_eq!(suggestion.results.len(), 1);
    let result = &suggestion.results[0];
    assert_eq!(result.score, 57);

    let points = |dimension: Dimension| {
        result
            .breakdown
            .iter()
            .find(|component| component.dimension == dimension)
            .map(|component| component.points)
            .expect("dimension present")
    };
    assert_eq!(points(Dimension::Seniority), 10.0);
    assert_eq!(points(Dimension::AgeGap), 0.0);
    assert_eq!(points(Dimension::SameDepartment), 20.0);
    assert_eq!(points(Dimension::WorkloadPenalty), 10.0);
}

#[test]
fn least_tenured_mentee_wins_a_single_slot() {
    let mut criteria = CriteriaConfig::default();
    criteria.workload_penalty.max_concurrent_mentees = 1;
    let engine = MatchingEngine::new(criteria, SuggestionPolicy::default()).expect("valid");
    let mentors = vec![mentor("m-1", 8.0, 45, "eng")];
    let mentees = vec![mentee("e-senior", 2.0, 36, "eng"), mentee("e-junior", 1.0, 35, "eng")];

    let run = engine.assign_all(&mentees, &mentors).expect("run completes");

    assert_eq!(run.pairs.len(), 1);
    assert_eq!(run.pairs[0].mentee_id, CandidateId::from("e-junior"));
    assert_eq!(run.pairs[0].mentor_id, CandidateId::from("m-1"));
    assert_eq!(run.unmatched, vec![CandidateId::from("e-senior")]);
}

#[test]
fn younger_mentor_is_never_suggested() {
    let engine = default_engine();
    let mentors = vec![mentor("m-young", 15.0, 30, "eng")];

    let suggestion = engine
        .suggest(&mentee("e-1", 0.0, 31, "eng"), &mentors)
        .expect("suggest succeeds");
    assert!(suggestion.results.is_empty());

    let run = engine
        .assign_all(&[mentee("e-1", 0.0, 31, "eng")], &mentors)
        .expect("run completes");
    assert!(run.pairs.is_empty());
    assert_eq!(run.unmatched, vec![CandidateId::from("e-1")]);
}

#[test]
fn suggestions_are_reproducible() {
    let engine = default_engine();
    let mentors = vec![
        mentor("m-b", 6.0, 36, "eng"),
        mentor("m-a", 6.0, 36, "eng"),
        mentor("m-c", 5.0, 40, "ops"),
    ];
    let target = mentee("e-1", 0.5, 28, "eng");

    let first = engine.suggest(&target, &mentors).expect("suggest succeeds");
    let second = engine.suggest(&target, &mentors).expect("suggest succeeds");

    assert_eq!(first, second);
    let ids: Vec<_> = first
        .results
        .iter()
        .map(|result| result.mentor_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["m-a", "m-b"]);
}

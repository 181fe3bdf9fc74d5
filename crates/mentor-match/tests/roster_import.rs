use mentor_match::matching::{
    CandidateId, CriteriaConfig, MatchingEngine, SuggestionPolicy,
};
use mentor_match::roster::{RosterImportError, RosterImporter};

fn data_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(file)
}

#[test]
fn sample_rosters_import_cleanly() {
    let mentors = RosterImporter::mentors_from_path(data_path("mentors.csv")).expect("mentors");
    let mentees = RosterImporter::mentees_from_path(data_path("mentees.csv")).expect("mentees");

    assert_eq!(mentors.len(), 7);
    assert_eq!(mentees.len(), 5);
    let femi = mentors
        .iter()
        .find(|mentor| mentor.id == CandidateId::from("m-femi"))
        .expect("m-femi present");
    assert!(!femi.available);
    let gita = mentors
        .iter()
        .find(|mentor| mentor.id == CandidateId::from("m-gita"))
        .expect("m-gita present");
    assert_eq!(gita.current_mentees, 3);
}

#[test]
fn imported_rosters_feed_a_full_assignment_run() {
    let mentors = RosterImporter::mentors_from_path(data_path("mentors.csv")).expect("mentors");
    let mentees = RosterImporter::mentees_from_path(data_path("mentees.csv")).expect("mentees");
    let engine = MatchingEngine::new(CriteriaConfig::default(), SuggestionPolicy::default())
        .expect("valid criteria");

    let run = engine.assign_all(&mentees, &mentors).expect("run completes");

    assert_eq!(run.pairs.len() + run.unmatched.len(), mentees.len());
    assert!(run.unmatched.contains(&CandidateId::from("e-lena")));
    for pair in &run.pairs {
        assert_ne!(pair.mentor_id, CandidateId::from("m-femi"));
        assert_ne!(pair.mentor_id, CandidateId::from("m-gita"));
        assert_ne!(pair.mentor_id, CandidateId::from("m-elif"));
    }
}

#[test]
fn missing_roster_file_is_an_io_error() {
    assert!(matches!(
        RosterImporter::mentors_from_path(data_path("absent.csv")),
        Err(RosterImportError::Io(_))
    ));
}

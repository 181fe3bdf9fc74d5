use crate::infra::{InMemoryCandidatePool, InMemoryMatchSink};
use clap::Args;
use mentor_match::config::AppConfig;
use mentor_match::error::AppError;
use mentor_match::matching::{
    AssignmentRun, CandidateId, CompatibilityResult, CriteriaUpdate, MatchSuggestion,
    MatchingService, MentorFilter,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SuggestArgs {
    /// Mentor roster CSV export
    #[arg(long)]
    pub(crate) mentors: PathBuf,
    /// Mentee roster CSV export
    #[arg(long)]
    pub(crate) mentees: PathBuf,
    /// Identifier of the mentee to rank mentors for
    #[arg(long)]
    pub(crate) mentee: String,
    /// Only consider mentors from this department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// JSON file with partial criteria overrides
    #[arg(long)]
    pub(crate) criteria: Option<PathBuf>,
    /// Print the raw JSON payload instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AssignArgs {
    /// Mentor roster CSV export
    #[arg(long)]
    pub(crate) mentors: PathBuf,
    /// Mentee roster CSV export
    #[arg(long)]
    pub(crate) mentees: PathBuf,
    /// JSON file with partial criteria overrides
    #[arg(long)]
    pub(crate) criteria: Option<PathBuf>,
    /// Print the raw JSON payload instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

type RosterService = MatchingService<InMemoryCandidatePool, InMemoryMatchSink>;

pub(crate) fn run_suggest(args: SuggestArgs) -> Result<(), AppError> {
    let service = roster_service(&args.mentors, &args.mentees)?;
    let overrides = load_criteria_update(args.criteria.as_deref())?;
    let filter = MentorFilter {
        department: args.department,
        min_seniority: None,
    };

    let suggestion = service.suggest_for(
        &CandidateId::from(args.mentee.as_str()),
        &filter,
        overrides.as_ref(),
    )?;

    if args.json {
        println!("{}", to_json(&suggestion)?);
    } else {
        print!("{}", render_suggestion(&suggestion));
    }
    Ok(())
}

pub(crate) fn run_assign(args: AssignArgs) -> Result<(), AppError> {
    let service = roster_service(&args.mentors, &args.mentees)?;
    let overrides = load_criteria_update(args.criteria.as_deref())?;

    let run = service.assign_unmatched(overrides.as_ref())?;

    if args.json {
        println!("{}", to_json(&run)?);
    } else {
        print!("{}", render_assignments(&run));
    }
    Ok(())
}

fn roster_service(mentors: &Path, mentees: &Path) -> Result<RosterService, AppError> {
    let config = AppConfig::load()?;
    let pool = InMemoryCandidatePool::from_rosters(Some(mentors), Some(mentees))?;
    let sink = InMemoryMatchSink::new(pool.clone());
    let service = MatchingService::new(
        Arc::new(pool),
        Arc::new(sink),
        config.matching.criteria,
        config.matching.policy,
    )?;
    Ok(service)
}

pub(crate) fn load_criteria_update(path: Option<&Path>) -> Result<Option<CriteriaUpdate>, AppError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map(Some).map_err(|err| {
        AppError::InvalidInput(format!(
            "criteria file {} is not valid JSON: {err}",
            path.display()
        ))
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::InvalidInput(format!("failed to serialize output: {err}")))
}

pub(crate) fn render_suggestion(suggestion: &MatchSuggestion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Mentor suggestions for {}", suggestion.mentee_id);
    if suggestion.is_relaxed() {
        let _ = writeln!(
            out,
            "No mentor cleared the strict pass; showing relaxed age-gap matches."
        );
    }
    if suggestion.results.is_empty() {
        let _ = writeln!(out, "- no eligible mentor");
        return out;
    }
    for (rank, result) in suggestion.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | score {} | current mentees {}",
            rank + 1,
            result.mentor_id,
            result.score,
            result.mentor_workload
        );
        render_breakdown(&mut out, result);
    }
    out
}

pub(crate) fn render_assignments(run: &AssignmentRun) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Assignment run: {} paired, {} unmatched",
        run.pairs.len(),
        run.unmatched.len()
    );
    for pair in &run.pairs {
        let _ = writeln!(
            out,
            "- {} -> {} (score {})",
            pair.mentee_id, pair.mentor_id, pair.score
        );
    }
    if !run.unmatched.is_empty() {
        let ids: Vec<&str> = run.unmatched.iter().map(CandidateId::as_str).collect();
        let _ = writeln!(out, "Unmatched: {}", ids.join(", "));
    }
    let _ = writeln!(out, "Mentor load after run:");
    for (mentor_id, count) in run.workload.iter() {
        let _ = writeln!(out, "- {mentor_id}: {count}");
    }
    out
}

fn render_breakdown(out: &mut String, result: &CompatibilityResult) {
    for component in &result.breakdown {
        let _ = writeln!(
            out,
            "   {:<16} {:>5.1} / {:<5.1} {}",
            component.dimension.label(),
            component.points,
            component.max_points,
            component.notes
        );
    }
}

//! Spreadsheet ingestion that adapts HR roster exports into candidate snapshots.
//!
//! Expected headers: `id,seniority_years,age,department` with optional `available` and
//! `current_mentees` columns. Blank optional cells fall back to defaults.

mod parser;

use crate::matching::{CandidateId, MenteeCandidate, MentorCandidate};
use std::io::Read;
use std::path::Path;

use parser::RosterRow;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: '{}' is not a valid value for {}",
                line, value, field
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn mentors_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<MentorCandidate>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::mentors_from_reader(file)
    }

    pub fn mentees_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<MenteeCandidate>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::mentees_from_reader(file)
    }

    pub fn mentors_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<MentorCandidate>, RosterImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(|(line, row)| mentor_from_row(line, row))
            .collect()
    }

    pub fn mentees_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<MenteeCandidate>, RosterImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(|(line, row)| mentee_from_row(line, row))
            .collect()
    }
}

fn mentor_from_row(line: u64, row: RosterRow) -> Result<MentorCandidate, RosterImportError> {
    let available = availability(line, row.available.as_deref())?;
    let current_mentees = match row.current_mentees.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| RosterImportError::InvalidField {
                line,
                field: "current_mentees",
                value: raw.to_string(),
            })?,
        None => 0,
    };

    Ok(MentorCandidate {
        id: CandidateId(row.id),
        seniority_years: row.seniority_years,
        age: row.age,
        department: row.department,
        available,
        current_mentees,
    })
}

fn mentee_from_row(line: u64, row: RosterRow) -> Result<MenteeCandidate, RosterImportError> {
    let available = availability(line, row.available.as_deref())?;

    Ok(MenteeCandidate {
        id: CandidateId(row.id),
        seniority_years: row.seniority_years,
        age: row.age,
        department: row.department,
        available,
    })
}

fn availability(line: u64, raw: Option<&str>) -> Result<bool, RosterImportError> {
    match raw {
        Some(raw) => parser::parse_flag(raw).ok_or_else(|| RosterImportError::InvalidField {
            line,
            field: "available",
            value: raw.to_string(),
        }),
        None => Ok(true),
    }
}

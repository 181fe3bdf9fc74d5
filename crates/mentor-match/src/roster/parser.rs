use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One spreadsheet row before it is split into a mentor or mentee.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    pub(crate) id: String,
    pub(crate) seniority_years: f64,
    pub(crate) age: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) department: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) available: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) current_mentees: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<(u64, RosterRow)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, csv::Position::line);
        let mut row: RosterRow = record.deserialize(Some(&headers))?;
        row.id = clean_text(&row.id);
        row.department = row.department.as_deref().map(clean_text);
        rows.push((line, row));
    }

    Ok(rows)
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "oui" => Some(true),
        "false" | "no" | "n" | "0" | "non" => Some(false),
        _ => None,
    }
}

fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

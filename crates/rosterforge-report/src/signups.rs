//! Signup sheet ingestion.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rosterforge_core::{Player, Role};
use serde::Deserialize;

use crate::ReportError;

/// Columns every signup sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Name", "Skill", "Position", "Captain", "Avoid"];

#[derive(Debug, Deserialize)]
struct SignupRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Skill")]
    skill: f64,
    #[serde(rename = "Position")]
    position: u32,
    #[serde(rename = "Captain")]
    captain: u8,
    #[serde(rename = "Avoid")]
    avoid: Option<String>,
}

/// Reads players from a signup CSV file.
///
/// # Errors
///
/// See [`parse_signups`]; also fails if the file cannot be opened.
pub fn read_signups(path: impl AsRef<Path>) -> Result<Vec<Player>, ReportError> {
    let file = File::open(path)?;
    parse_signups(file)
}

/// Parses players from signup CSV data.
///
/// Fields are trimmed, a blank `Avoid` means no avoidance and `Captain` must
/// be 0 or 1. Extra columns are ignored. Roster-level checks (unique names,
/// known roles, team shape) are left to
/// [`Roster::new`](rosterforge_core::Roster::new).
///
/// # Examples
///
/// ```
/// use rosterforge_report::parse_signups;
///
/// let data = "Name,Skill,Position,Captain,Avoid\n Ana ,31.5,1,1,\nBo,28,2,0,Ana\n";
/// let players = parse_signups(data.as_bytes()).unwrap();
///
/// assert_eq!(players[0].name(), "Ana");
/// assert!(players[0].is_captain());
/// assert_eq!(players[0].avoid(), None);
/// assert_eq!(players[1].avoid(), Some("Ana"));
/// ```
pub fn parse_signups<R: Read>(reader: R) -> Result<Vec<Player>, ReportError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::MissingColumns(missing));
    }

    let mut players = Vec::new();
    for (row, record) in reader.deserialize::<SignupRecord>().enumerate() {
        let record = record?;
        if record.captain > 1 {
            return Err(ReportError::Invalid(format!(
                "row {}: Captain must be 0 or 1 (got {})",
                row + 1,
                record.captain
            )));
        }
        let mut player = Player::new(record.name, record.skill, Role::new(record.position))
            .with_captain(record.captain == 1);
        if let Some(avoid) = record.avoid.filter(|a| !a.is_empty()) {
            player = player.with_avoid(avoid);
        }
        players.push(player);
    }
    Ok(players)
}

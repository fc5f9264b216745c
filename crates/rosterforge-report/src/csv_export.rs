//! CSV export of team assignments.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rosterforge_model::Assignment;
use serde::Serialize;

use crate::ReportError;

#[derive(Debug, Serialize)]
struct AssignmentRecord<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Skill")]
    skill: f64,
    #[serde(rename = "Position")]
    position: u32,
    #[serde(rename = "Captain")]
    captain: u8,
    #[serde(rename = "Avoid")]
    avoid: &'a str,
    #[serde(rename = "Team")]
    team: usize,
}

/// CSV exporter for assignments.
///
/// Writes the signup columns in roster order plus a 1-based `Team` column.
pub struct AssignmentsCsv;

impl AssignmentsCsv {
    /// Writes assignments as CSV to a writer.
    pub fn write<W: Write>(assignment: &Assignment, writer: W) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_writer(writer);
        for assigned in &assignment.players {
            let player = &assigned.player;
            writer.serialize(AssignmentRecord {
                name: player.name(),
                skill: player.skill(),
                position: player.role().id(),
                captain: u8::from(player.is_captain()),
                avoid: player.avoid().unwrap_or(""),
                team: assigned.team,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Exports assignments to a CSV string.
    pub fn to_string(assignment: &Assignment) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        Self::write(assignment, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ReportError::Invalid(e.to_string()))
    }

    /// Exports assignments to a CSV file.
    pub fn to_file(assignment: &Assignment, path: impl AsRef<Path>) -> Result<(), ReportError> {
        Self::write(assignment, File::create(path)?)
    }
}

//! Plain-text run summary.

use std::fmt::Write as _;

use rosterforge_model::Diagnostics;

/// Plain-text summary of a balance: status, warnings, target and one line
/// per team.
///
/// # Example
///
/// ```
/// use rosterforge_model::{Diagnostics, ObjectiveBreakdown, SolveStatus, TeamDiagnostics};
/// use rosterforge_report::TextSummary;
///
/// let diagnostics = Diagnostics {
///     status: SolveStatus::Optimal,
///     teams: vec![TeamDiagnostics { label: 1, score: 35.0, deviation: 0.0, captains: 1 }],
///     target_score: 35.0,
///     total_captains: 1,
///     warnings: vec![],
///     objective: ObjectiveBreakdown::default(),
/// };
///
/// let text = TextSummary::to_string(&diagnostics);
/// assert!(text.contains("Solver Status: OPTIMAL"));
/// assert!(text.contains("Team 1: score=35.00 (dev=0.00), captains=1"));
/// ```
pub struct TextSummary;

impl TextSummary {
    pub fn to_string(diagnostics: &Diagnostics) -> String {
        let mut output = String::new();
        writeln!(output, "Solver Status: {}", diagnostics.status).unwrap();
        for warning in &diagnostics.warnings {
            writeln!(output, "Warning: {}", warning).unwrap();
        }
        writeln!(output, "Target weighted score: {:.2}", diagnostics.target_score).unwrap();
        for team in &diagnostics.teams {
            writeln!(
                output,
                "  Team {}: score={:.2} (dev={:.2}), captains={}",
                team.label, team.score, team.deviation, team.captains
            )
            .unwrap();
        }
        writeln!(
            output,
            "Captains: {} | Conflicts: {} | Objective: {:.2}",
            diagnostics.total_captains,
            diagnostics.objective.conflicts,
            diagnostics.objective.objective
        )
        .unwrap();
        output
    }
}

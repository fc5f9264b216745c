//! Markdown roster report.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rosterforge_core::Role;
use rosterforge_model::{AssignedPlayer, Assignment};

/// Roles averaged as "core" in the team summary line.
const CORE_ROLES: [u32; 3] = [1, 2, 3];
/// Roles averaged as "support" in the team summary line.
const SUPPORT_ROLES: [u32; 2] = [4, 5];

/// Markdown roster generator.
///
/// One section per team with a role-sorted table and an averages line.
///
/// # Example
///
/// ```
/// use rosterforge_model::{
///     AssignedPlayer, Assignment, Diagnostics, ObjectiveBreakdown, SolveStatus,
/// };
/// use rosterforge_core::{Player, Role};
/// use rosterforge_report::MarkdownReport;
///
/// let assignment = Assignment {
///     players: vec![AssignedPlayer {
///         player: Player::new("Ana", 31.0, Role::new(1)).with_captain(true),
///         team: 1,
///     }],
///     diagnostics: Diagnostics {
///         status: SolveStatus::Optimal,
///         teams: vec![],
///         target_score: 31.0,
///         total_captains: 1,
///         warnings: vec![],
///         objective: ObjectiveBreakdown::default(),
///     },
/// };
///
/// let md = MarkdownReport::to_string(&assignment);
/// assert!(md.contains("## Team 1"));
/// assert!(md.contains("| 1 | Ana | 31 | ✅ |"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates the Markdown roster.
    pub fn to_string(assignment: &Assignment) -> String {
        let mut output = String::new();

        let mut labels: Vec<usize> = assignment.players.iter().map(|a| a.team).collect();
        labels.sort_unstable();
        labels.dedup();

        for label in labels {
            let mut members: Vec<&AssignedPlayer> = assignment.members(label).collect();
            members.sort_by(|a, b| {
                a.player
                    .role()
                    .cmp(&b.player.role())
                    .then_with(|| a.player.name().cmp(b.player.name()))
            });

            writeln!(output, "## Team {}", label).unwrap();
            writeln!(output).unwrap();
            writeln!(output, "| Role | Name | MMR | Captain |").unwrap();
            writeln!(output, "|-----:|------|----:|:-------:|").unwrap();
            for member in &members {
                let player = &member.player;
                writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    player.role(),
                    player.name(),
                    player.skill().trunc(),
                    if player.is_captain() { "✅" } else { "" }
                )
                .unwrap();
            }
            writeln!(output).unwrap();

            let mut averages = vec![format!("All: {:.1}", average(&members, |_| true))];
            if members.iter().any(|m| in_roles(m.player.role(), &CORE_ROLES)) {
                averages.push(format!(
                    "Core (1-3): {:.1}",
                    average(&members, |r| in_roles(r, &CORE_ROLES))
                ));
            }
            if members.iter().any(|m| in_roles(m.player.role(), &SUPPORT_ROLES)) {
                averages.push(format!(
                    "Support (4-5): {:.1}",
                    average(&members, |r| in_roles(r, &SUPPORT_ROLES))
                ));
            }
            writeln!(output, "**Averages** {}", averages.join(" | ")).unwrap();
            writeln!(output).unwrap();
        }

        output
    }

    /// Writes the Markdown roster to a file.
    pub fn to_file(assignment: &Assignment, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(assignment))
    }

    /// Writes the Markdown roster to a writer.
    pub fn write<W: Write>(assignment: &Assignment, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(assignment).as_bytes())
    }
}

fn in_roles(role: Role, ids: &[u32]) -> bool {
    ids.contains(&role.id())
}

fn average(members: &[&AssignedPlayer], include: impl Fn(Role) -> bool) -> f64 {
    let skills: Vec<f64> = members
        .iter()
        .filter(|m| include(m.player.role()))
        .map(|m| m.player.skill())
        .collect();
    if skills.is_empty() {
        0.0
    } else {
        skills.iter().sum::<f64>() / skills.len() as f64
    }
}

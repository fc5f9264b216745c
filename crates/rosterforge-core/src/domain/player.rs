//! Player records.

use super::Role;

/// A signed-up player. Immutable once loaded.
///
/// # Examples
///
/// ```
/// use rosterforge_core::{Player, Role};
///
/// let player = Player::new("Ana", 3150.0, Role::new(2))
///     .with_captain(true)
///     .with_avoid("Bo");
///
/// assert_eq!(player.name(), "Ana");
/// assert!(player.is_captain());
/// assert_eq!(player.avoid(), Some("Bo"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    skill: f64,
    role: Role,
    is_captain: bool,
    avoid: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, skill: f64, role: Role) -> Self {
        Self {
            name: name.into(),
            skill,
            role,
            is_captain: false,
            avoid: None,
        }
    }

    pub fn with_captain(mut self, is_captain: bool) -> Self {
        self.is_captain = is_captain;
        self
    }

    /// Declares that this player prefers not to share a team with `other`.
    pub fn with_avoid(mut self, other: impl Into<String>) -> Self {
        self.avoid = Some(other.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skill(&self) -> f64 {
        self.skill
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_captain(&self) -> bool {
        self.is_captain
    }

    pub fn avoid(&self) -> Option<&str> {
        self.avoid.as_deref()
    }
}

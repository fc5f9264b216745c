//! RosterForge Core - Roster types and errors for team balancing
//!
//! This crate provides the validated input contract consumed by the model
//! builder:
//! - [`Player`] and [`Role`] records
//! - [`Roster`], which checks uniqueness, role coverage and team divisibility
//! - Captain policies, objective weights, role weights and presets
//! - The [`RosterForgeError`] taxonomy shared by every crate
//!
//! # Example
//!
//! ```
//! use rosterforge_core::{Player, Role, Roster};
//!
//! let roles = [Role::new(1), Role::new(2)];
//! let players = vec![
//!     Player::new("Ana", 10.0, Role::new(1)),
//!     Player::new("Bo", 20.0, Role::new(1)).with_captain(true),
//!     Player::new("Cy", 15.0, Role::new(2)),
//!     Player::new("Di", 25.0, Role::new(2)).with_captain(true),
//! ];
//!
//! let roster = Roster::new(players, &roles, None).unwrap();
//! assert_eq!(roster.team_count(), 2);
//! assert_eq!(roster.captain_count(), 2);
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    AvoidancePair, CaptainPolicy, CaptainRule, ObjectiveWeights, Player, Preset, Role,
    RoleWeights, Roster,
};
pub use error::{Result, RosterForgeError};

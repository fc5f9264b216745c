//! Shared test fixtures for RosterForge crates.
//!
//! - [`roster`] - hand-written rosters and seeded random rosters
//! - [`engine`] - scripted solver engines
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use rosterforge_test::{four_player_roster, RandomRoster};
//!
//! let roster = four_player_roster();
//! assert_eq!(roster.team_count(), 2);
//!
//! let generated = RandomRoster::new(3, 2).roster(7);
//! assert_eq!(generated.len(), 6);
//! ```

pub mod engine;
pub mod roster;

pub use engine::ScriptedEngine;
pub use roster::{
    four_player_roster, four_player_roster_with_captains, four_players, roles, roster_with,
    RandomRoster,
};

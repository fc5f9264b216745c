//! Domain types for team balancing.

mod player;
mod policy;
mod role;
mod roster;

#[cfg(test)]
mod tests;

pub use player::Player;
pub use policy::{CaptainPolicy, CaptainRule, ObjectiveWeights, Preset};
pub use role::{Role, RoleWeights};
pub use roster::{AvoidancePair, Roster};

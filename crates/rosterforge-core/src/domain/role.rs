//! Roles and per-role skill weights.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, RosterForgeError};

/// A position slot that every team must fill exactly once.
///
/// Roles are small integer identifiers (the default configuration uses 1..=5).
///
/// # Examples
///
/// ```
/// use rosterforge_core::Role;
///
/// let carry = Role::new(1);
/// assert_eq!(carry.id(), 1);
/// assert_eq!(carry.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(u32);

impl Role {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Role(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Role {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Role)
    }
}

// Roles appear both as values and as map keys. YAML keeps integer keys while
// TOML only has string keys, so deserialization accepts either form.
#[cfg(feature = "serde")]
impl serde::Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::{self, Visitor};

        struct RoleVisitor;

        impl Visitor<'_> for RoleVisitor {
            type Value = Role;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer role id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Role, E> {
                u32::try_from(v)
                    .map(Role)
                    .map_err(|_| E::custom(format!("role id {} is out of range", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Role, E> {
                if v < 0 {
                    return Err(E::custom(format!("role id {} is negative", v)));
                }
                self.visit_u64(v as u64)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Role, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid role id '{}'", v)))
            }
        }

        deserializer.deserialize_any(RoleVisitor)
    }
}

/// Skill multipliers per role.
///
/// Roles without an explicit entry weigh 1.0.
///
/// # Examples
///
/// ```
/// use rosterforge_core::{Role, RoleWeights};
///
/// let weights = RoleWeights::new().with_weight(Role::new(1), 1.5);
/// assert_eq!(weights.weight(Role::new(1)), 1.5);
/// assert_eq!(weights.weight(Role::new(2)), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleWeights {
    weights: BTreeMap<Role, f64>,
}

impl RoleWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, role: Role, weight: f64) -> Self {
        self.weights.insert(role, weight);
        self
    }

    /// Returns the multiplier for `role`, defaulting to 1.0.
    pub fn weight(&self, role: Role) -> f64 {
        self.weights.get(&role).copied().unwrap_or(1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, f64)> + '_ {
        self.weights.iter().map(|(r, w)| (*r, *w))
    }

    /// Checks that every weighted role is declared and every weight is finite.
    pub fn validate(&self, roles: &[Role]) -> Result<()> {
        for (role, weight) in &self.weights {
            if !roles.contains(role) {
                return Err(RosterForgeError::Config(format!(
                    "role weight given for undeclared role {}",
                    role
                )));
            }
            if !weight.is_finite() {
                return Err(RosterForgeError::Config(format!(
                    "role weight for role {} is not a finite number",
                    role
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(Role, f64)> for RoleWeights {
    fn from_iter<I: IntoIterator<Item = (Role, f64)>>(iter: I) -> Self {
        RoleWeights {
            weights: iter.into_iter().collect(),
        }
    }
}

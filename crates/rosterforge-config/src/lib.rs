//! Configuration system for RosterForge.
//!
//! Load run configuration from YAML or TOML files. Every key is optional and
//! falls back to the defaults of [`RosterConfig::default`].
//!
//! # Examples
//!
//! Load configuration from a YAML string:
//!
//! ```
//! use rosterforge_config::RosterConfig;
//! use std::time::Duration;
//!
//! let config = RosterConfig::from_yaml_str(r#"
//!     run_name: friday_league
//!     num_teams: 4
//!     captain_policy: at_least_one
//!     captain_hard: true
//!     role_weights:
//!       1: 1.2
//!     presets:
//!       Ana: 2
//!     termination:
//!       seconds_spent_limit: 10
//! "#).unwrap();
//!
//! assert_eq!(config.run_name, "friday_league");
//! assert_eq!(config.num_teams, Some(4));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.balance_weight, 1.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rosterforge_config::RosterConfig;
//!
//! let config = RosterConfig::load("missing.yaml").unwrap_or_default();
//! assert_eq!(config.random_seed, 42);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rosterforge_core::{CaptainPolicy, ObjectiveWeights, Preset, Role, RoleWeights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the effective configuration written into each run directory.
pub const EFFECTIVE_CONFIG_FILE: &str = "used_config.yaml";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RosterConfig {
    /// Name of the run; also the output sub-directory.
    pub run_name: String,

    /// Root directory for run outputs.
    pub output_root: PathBuf,

    /// Number of teams. Inferred from the per-role player count when unset.
    pub num_teams: Option<usize>,

    /// Declared roles; every team gets exactly one player of each.
    pub roles: Vec<Role>,

    /// Skill multiplier per role. Missing roles weigh 1.0.
    pub role_weights: BTreeMap<Role, f64>,

    /// One of `none`, `at_least_one`, `separate`.
    pub captain_policy: String,

    /// Enforce the captain policy as a hard constraint.
    pub captain_hard: bool,

    pub conflict_weight: f64,
    pub balance_weight: f64,
    pub captain_weight: f64,

    /// Player name to 1-based team label.
    pub presets: BTreeMap<String, usize>,

    /// Seed handed to the solver engine.
    pub random_seed: u64,

    /// Integer factor applied to weighted skills before modeling.
    pub scale_factor: i64,

    /// Number of search workers requested from the solver engine.
    pub worker_count: usize,

    /// Termination configuration.
    pub termination: TerminationConfig,

    /// Absolute path of the signups file; only recorded in effective configs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signups_csv: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            run_name: "team_run".to_string(),
            output_root: PathBuf::from("./outputs"),
            num_teams: None,
            roles: (1..=5).map(Role::new).collect(),
            role_weights: BTreeMap::new(),
            captain_policy: "none".to_string(),
            captain_hard: false,
            conflict_weight: 1.0,
            balance_weight: 1.0,
            captain_weight: 5.0,
            presets: BTreeMap::new(),
            random_seed: 42,
            scale_factor: 100,
            worker_count: 8,
            termination: TerminationConfig::default(),
            signups_csv: None,
        }
    }
}

impl RosterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension
    /// (`.toml` is TOML, anything else is YAML).
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string. An empty document yields the
    /// defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roles.is_empty() {
            return Err(ConfigError::Invalid("roles must not be empty".into()));
        }
        if self.scale_factor < 1 {
            return Err(ConfigError::Invalid(format!(
                "scale_factor must be at least 1 (got {})",
                self.scale_factor
            )));
        }
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid("worker_count must be at least 1".into()));
        }
        if self.num_teams == Some(0) {
            return Err(ConfigError::Invalid("num_teams must be positive".into()));
        }
        Ok(())
    }

    pub fn with_run_name(mut self, name: impl Into<String>) -> Self {
        self.run_name = name.into();
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_num_teams(mut self, num_teams: usize) -> Self {
        self.num_teams = Some(num_teams);
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self.role_weights.retain(|role, _| self.roles.contains(role));
        self
    }

    pub fn with_captain_policy(mut self, policy: impl Into<String>, hard: bool) -> Self {
        self.captain_policy = policy.into();
        self.captain_hard = hard;
        self
    }

    pub fn with_preset(mut self, player: impl Into<String>, team: usize) -> Self {
        self.presets.insert(player.into(), team);
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Parses the captain policy name together with its hardness flag.
    pub fn captain_policy(&self) -> rosterforge_core::Result<CaptainPolicy> {
        CaptainPolicy::parse(&self.captain_policy, self.captain_hard)
    }

    pub fn role_weights(&self) -> RoleWeights {
        self.role_weights.iter().map(|(r, w)| (*r, *w)).collect()
    }

    pub fn objective_weights(&self) -> ObjectiveWeights {
        ObjectiveWeights::new(self.balance_weight, self.conflict_weight, self.captain_weight)
    }

    pub fn presets(&self) -> Vec<Preset> {
        self.presets
            .iter()
            .map(|(name, team)| Preset::new(name.clone(), *team))
            .collect()
    }

    /// Output directory of this run: `output_root/run_name`.
    pub fn run_dir(&self) -> PathBuf {
        self.output_root.join(&self.run_name)
    }

    /// Serializes this configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the effective configuration, including the absolute path of the
    /// signups file, into `dir` and returns the written path.
    pub fn save_effective(
        &self,
        dir: impl AsRef<Path>,
        signups: impl AsRef<Path>,
    ) -> Result<PathBuf, ConfigError> {
        let signups = signups.as_ref();
        let absolute = fs::canonicalize(signups).unwrap_or_else(|_| signups.to_path_buf());
        let effective = Self {
            signups_csv: Some(absolute),
            ..self.clone()
        };
        let path = dir.as_ref().join(EFFECTIVE_CONFIG_FILE);
        fs::write(&path, effective.to_yaml_string()?)?;
        Ok(path)
    }
}

/// Termination configuration.
///
/// Defaults to a 30 second limit when the section is absent; a present
/// section only carries the limits it names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    #[serde(default)]
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    #[serde(default)]
    pub minutes_spent_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(30),
            minutes_spent_limit: None,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

//! Module configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use crate::rules::RuleVariant;

/// Delay between a strike and the fresh round that follows it
pub const DEFAULT_STRIKE_DELAY: Duration = Duration::from_secs(1);

/// Verbosity level for module log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only solves and strikes
    Minimal = 1,
    /// Normal - chosen phrase, expected rule and presses (default)
    #[default]
    Normal = 2,
    /// Verbose - stage progress, LED changes and timer activity
    Verbose = 3,
}

/// Settings for one puzzle module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Validation semantics
    pub variant: RuleVariant,
    /// Stages that must be cleared before the module is solved
    pub max_stages: u32,
    /// How long the module stays locked after a strike
    pub strike_delay: Duration,
    /// Seed for deterministic rounds (entropy-seeded when absent)
    pub seed: Option<u64>,
    pub verbosity: VerbosityLevel,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig {
            variant: RuleVariant::default(),
            max_stages: 1,
            strike_delay: DEFAULT_STRIKE_DELAY,
            seed: None,
            verbosity: VerbosityLevel::default(),
        }
    }
}

impl ModuleConfig {
    /// Default settings for a rule variant
    pub fn new(variant: RuleVariant) -> Self {
        ModuleConfig {
            variant,
            ..ModuleConfig::default()
        }
    }

    /// Set the number of stages (at least one)
    pub fn with_max_stages(mut self, max_stages: u32) -> Self {
        self.max_stages = max_stages.max(1);
        self
    }

    /// Set the lockout after a strike
    pub fn with_strike_delay(mut self, delay: Duration) -> Self {
        self.strike_delay = delay;
        self
    }

    /// Seed the round generator for reproducible rounds
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the module log verbosity
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }
}

//! Engine configuration.
//!
//! Selects the scheduling strategy and its parameters from TOML, so runs
//! can be tuned without code changes.
//!
//! # Examples
//!
//! ```
//! use u_staffing::config::{EngineConfig, StrategyKind};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     strategy = "sliding_window"
//!     index_order = "descending"
//!
//!     [sliding_window]
//!     batch_size = 20
//!
//!     [sliding_window.retry]
//!     type = "until_stable"
//!     max_passes = 8
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyKind::SlidingWindow);
//! assert_eq!(config.build_strategy().unwrap().name(), "sliding_window");
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use u_staffing::config::EngineConfig;
//!
//! let config = EngineConfig::load("staffing.toml").unwrap_or_default();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::index::IndexOrder;
use crate::scheduler::{
    DayByDay, GlobalRanked, RetryPolicy, SlidingWindow, Strategy, DEFAULT_BATCH_SIZE,
};
use crate::staffing::{FillerConfig, RoleFiller};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid TOML or does not match the schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A parameter is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which strategy orders the projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Rank once, attempt each project once.
    GlobalRanked,
    /// Overlapping windows with bounded retries.
    #[default]
    SlidingWindow,
    /// Virtual clock, one commitment per day.
    DayByDay,
}

/// Main engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Strategy to run.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Skill index sort direction.
    #[serde(default)]
    pub index_order: IndexOrder,

    /// Allow one-level-short contributors under a mentor.
    #[serde(default = "default_mentoring")]
    pub mentoring: bool,

    /// Sliding-window settings.
    #[serde(default)]
    pub sliding_window: SlidingWindowConfig,

    /// Day-by-day settings.
    #[serde(default)]
    pub day_by_day: DayByDayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            index_order: IndexOrder::default(),
            mentoring: default_mentoring(),
            sliding_window: SlidingWindowConfig::default(),
            day_by_day: DayByDayConfig::default(),
        }
    }
}

fn default_mentoring() -> bool {
    FillerConfig::default().mentoring
}

/// Sliding-window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlidingWindowConfig {
    /// Window length.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Passes per window.
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            retry: RetryPolicy::default(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Day-by-day settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DayByDayConfig {
    /// Ranked projects tried per day.
    #[serde(default = "default_attempts_per_day")]
    pub attempts_per_day: usize,
}

impl Default for DayByDayConfig {
    fn default() -> Self {
        Self {
            attempts_per_day: default_attempts_per_day(),
        }
    }
}

fn default_attempts_per_day() -> usize {
    1
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the skill index sort direction.
    pub fn with_index_order(mut self, order: IndexOrder) -> Self {
        self.index_order = order;
        self
    }

    /// Enables or disables mentoring.
    pub fn with_mentoring(mut self, mentoring: bool) -> Self {
        self.mentoring = mentoring;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sliding_window.batch_size == 0 {
            return Err(ConfigError::Invalid("sliding_window.batch_size must be >= 1".into()));
        }
        if self.sliding_window.retry.max_passes() == 0 {
            return Err(ConfigError::Invalid("sliding_window.retry needs at least one pass".into()));
        }
        if self.day_by_day.attempts_per_day == 0 {
            return Err(ConfigError::Invalid("day_by_day.attempts_per_day must be >= 1".into()));
        }
        Ok(())
    }

    /// Role filler for these settings.
    pub fn role_filler(&self) -> RoleFiller {
        RoleFiller::with_config(FillerConfig {
            mentoring: self.mentoring,
        })
    }

    /// Builds the configured strategy.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        self.validate()?;
        let filler = self.role_filler();

        let strategy: Box<dyn Strategy> = match self.strategy {
            StrategyKind::GlobalRanked => Box::new(
                GlobalRanked::new()
                    .with_index_order(self.index_order)
                    .with_filler(filler),
            ),
            StrategyKind::SlidingWindow => Box::new(
                SlidingWindow::new()
                    .with_batch_size(self.sliding_window.batch_size)
                    .with_retry(self.sliding_window.retry)
                    .with_index_order(self.index_order)
                    .with_filler(filler),
            ),
            StrategyKind::DayByDay => Box::new(
                DayByDay::new()
                    .with_attempts_per_day(self.day_by_day.attempts_per_day)
                    .with_index_order(self.index_order)
                    .with_filler(filler),
            ),
        };
        Ok(strategy)
    }
}

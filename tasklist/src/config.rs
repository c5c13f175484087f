//! Configuration management for the task list binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Parsing is written against a key lookup so it can be exercised without
//! touching the process environment.

use crate::render::{RenderMode, UnknownRenderMode, DEFAULT_PROGRESS_WIDTH};
use serde::{Deserialize, Serialize};
use std::env;
use tasklist_runtime::{StoreConfig, DEFAULT_MAX_FEEDBACK_ACTIONS};
use thiserror::Error;

/// Log filter used when neither `TASKLIST_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "tasklist=info,tasklist_runtime=info";

/// Accepted progress bar widths
pub const PROGRESS_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 1..=200;

/// Smallest accepted feedback bound; `add` feeds back two actions
pub const MIN_FEEDBACK_ACTIONS: usize = 2;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `TASKLIST_RENDER` is not a known mode
    #[error("TASKLIST_RENDER: {0}")]
    RenderMode(#[from] UnknownRenderMode),

    /// A numeric variable could not be parsed
    #[error("{key}: `{value}` is not a valid number")]
    InvalidNumber {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// A value parsed but is out of range
    #[error("{key}: {message}")]
    OutOfRange {
        /// Variable name
        key: &'static str,
        /// What was wrong
        message: String,
    },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `tracing` filter directive
    pub log_filter: String,
    /// How the session is drawn
    pub render_mode: RenderMode,
    /// Width of the text progress bar
    pub progress_width: usize,
    /// Feedback actions allowed per store `send`
    pub max_feedback_actions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            render_mode: RenderMode::default(),
            progress_width: DEFAULT_PROGRESS_WIDTH,
            max_feedback_actions: DEFAULT_MAX_FEEDBACK_ACTIONS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset and empty variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let log_filter = get("TASKLIST_LOG")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or(defaults.log_filter);

        let render_mode = match get("TASKLIST_RENDER") {
            Some(value) => value.parse()?,
            None => defaults.render_mode,
        };

        let progress_width = match get("TASKLIST_PROGRESS_WIDTH") {
            Some(value) => parse_number("TASKLIST_PROGRESS_WIDTH", &value)?,
            None => defaults.progress_width,
        };
        if !PROGRESS_WIDTH_RANGE.contains(&progress_width) {
            return Err(ConfigError::OutOfRange {
                key: "TASKLIST_PROGRESS_WIDTH",
                message: format!(
                    "must be between {} and {}, got {progress_width}",
                    PROGRESS_WIDTH_RANGE.start(),
                    PROGRESS_WIDTH_RANGE.end()
                ),
            });
        }

        let max_feedback_actions = match get("TASKLIST_MAX_FEEDBACK_ACTIONS") {
            Some(value) => parse_number("TASKLIST_MAX_FEEDBACK_ACTIONS", &value)?,
            None => defaults.max_feedback_actions,
        };
        if max_feedback_actions < MIN_FEEDBACK_ACTIONS {
            return Err(ConfigError::OutOfRange {
                key: "TASKLIST_MAX_FEEDBACK_ACTIONS",
                message: format!(
                    "must be at least {MIN_FEEDBACK_ACTIONS}, got {max_feedback_actions}"
                ),
            });
        }

        Ok(Self {
            log_filter,
            render_mode,
            progress_width,
            max_feedback_actions,
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

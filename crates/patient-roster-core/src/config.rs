//! Roster configuration.
//!
//! Resolved once when a roster is opened and then passed into the session, so page-size
//! choices, the pager width and the absent-field sentinel stay fixed for its lifetime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// Number of page buttons in the pager.
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// Text rendered in place of missing contact data.
pub const ABSENT_SENTINEL: &str = "N/A";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Roster configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RosterConfig {
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    pub page_window: usize,
    pub absent_sentinel: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
            absent_sentinel: ABSENT_SENTINEL.to_string(),
        }
    }
}

impl RosterConfig {
    /// Create a validated configuration.
    pub fn new(
        page_sizes: Vec<usize>,
        default_page_size: usize,
        page_window: usize,
        absent_sentinel: String,
    ) -> ConfigResult<Self> {
        let config = Self {
            page_sizes,
            default_page_size,
            page_window,
            absent_sentinel,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration. Missing keys take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::Invalid("page_sizes cannot be empty".into()));
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_sizes
            )));
        }
        if self.page_window == 0 {
            return Err(ConfigError::Invalid("page_window must be positive".into()));
        }
        if self.absent_sentinel.is_empty() {
            return Err(ConfigError::Invalid("absent_sentinel cannot be empty".into()));
        }
        Ok(())
    }

    pub fn allows_page_size(&self, page_size: usize) -> bool {
        self.page_sizes.contains(&page_size)
    }
}

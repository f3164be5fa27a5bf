//! Engine configuration.
//!
//! Loaded from TOML; every section and field has a default, so an empty
//! document is a valid configuration. Scoring constants are not
//! configurable.
//!
//! ```toml
//! [breakdown]
//! strategy = "external"
//!
//! [breakdown.external]
//! model = "gpt-4"
//!
//! [schedule]
//! holidays = ["2026-12-25"]
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::BusinessCalendar;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Task breakdown strategy selection.
    pub breakdown: BreakdownConfig,
    /// Subtask calendar layout.
    pub schedule: ScheduleConfig,
    /// Resource recommendation defaults.
    pub matching: MatchingConfig,
    /// Project insight defaults.
    pub insights: InsightsConfig,
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Which breakdown strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownStrategyKind {
    /// Keyword/type templates with speed adjustment.
    #[default]
    Rules,
    /// External LLM call, falling back to rules on failure.
    External,
}

/// Breakdown settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownConfig {
    /// Selected strategy.
    pub strategy: BreakdownStrategyKind,
    /// Settings for the external strategy.
    pub external: ExternalBreakdownConfig,
}

/// Settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalBreakdownConfig {
    /// Chat-completions URL.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExternalBreakdownConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

/// Calendar settings for subtask layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Skip Saturdays and Sundays.
    pub skip_weekends: bool,
    /// Additional non-working dates.
    pub holidays: Vec<NaiveDate>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            skip_weekends: true,
            holidays: Vec::new(),
        }
    }
}

impl ScheduleConfig {
    /// Builds the business calendar these settings describe.
    pub fn calendar(&self) -> BusinessCalendar {
        BusinessCalendar::with_weekends_skipped(self.skip_weekends)
            .with_holidays(self.holidays.iter().copied())
    }
}

/// Recommendation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Default number of ranked resources returned.
    pub top_n: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

/// Insight settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Maximum number of high-risk tasks listed.
    pub high_risk_limit: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self { high_risk_limit: 5 }
    }
}

//! Task breakdown strategies.
//!
//! Splits a task into an ordered list of subtasks with day estimates.
//! The rule-based strategy is always available; an external (LLM) strategy
//! can be selected by configuration and falls back to rules on failure.
//!
//! # Usage
//!
//! ```
//! use u_pm::breakdown::{breakdown_task, BreakdownRequest, BreakdownStrategy, RuleBasedBreakdown};
//!
//! let plan = breakdown_task("Build login API", "Dev", 5, 5);
//! assert_eq!(plan.len(), 6);
//! assert_eq!(plan[0].name, "API Design & Specification");
//!
//! let request = BreakdownRequest::new("Quarterly report", "Admin").with_profile(10, 5);
//! let plan = RuleBasedBreakdown.breakdown(&request).unwrap();
//! assert_eq!(plan.len(), 3);
//! ```

#[cfg(feature = "llm")]
mod external;
mod planner;
mod rules;

#[cfg(feature = "llm")]
pub use external::ExternalBreakdown;
pub use planner::BreakdownPlanner;
pub use rules::{adjust_for_speed, select_template, speed_factor, RuleBasedBreakdown, Template};

use std::fmt::Debug;

use crate::error::Result;
use crate::models::Subtask;

/// Baseline speed/quality score.
pub const BASELINE_SCORE: i32 = 5;

/// Input to a breakdown strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRequest {
    /// Task name; keyword cues are read from it.
    pub task_name: String,
    /// Task type tag.
    pub task_type: String,
    /// Speed score of the resource doing the work (1-10).
    pub resource_speed: i32,
    /// Quality score of the resource doing the work (1-10).
    pub resource_quality: i32,
}

impl BreakdownRequest {
    /// Creates a request for a baseline resource.
    pub fn new(task_name: impl Into<String>, task_type: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            task_type: task_type.into(),
            resource_speed: BASELINE_SCORE,
            resource_quality: BASELINE_SCORE,
        }
    }

    /// Sets the resource speed and quality.
    pub fn with_profile(mut self, speed: i32, quality: i32) -> Self {
        self.resource_speed = speed;
        self.resource_quality = quality;
        self
    }
}

/// A strategy that turns a task into a subtask plan.
pub trait BreakdownStrategy: Send + Sync + Debug {
    /// Strategy name (e.g., "rules", "external").
    fn name(&self) -> &'static str;

    /// Produces an ordered subtask plan.
    fn breakdown(&self, request: &BreakdownRequest) -> Result<Vec<Subtask>>;
}

/// Rule-based breakdown of a task, adjusted for the resource's speed.
///
/// Quality is accepted for interface parity with the external strategy
/// but does not change rule-based estimates.
pub fn breakdown_task(
    task_name: &str,
    task_type: &str,
    resource_speed: i32,
    resource_quality: i32,
) -> Vec<Subtask> {
    RuleBasedBreakdown::plan(
        &BreakdownRequest::new(task_name, task_type).with_profile(resource_speed, resource_quality),
    )
}

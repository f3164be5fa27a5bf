//! Strategy selection with rule-based fallback.

use std::sync::Arc;

use super::{BreakdownRequest, BreakdownStrategy, RuleBasedBreakdown};
use crate::config::{BreakdownConfig, BreakdownStrategyKind};
use crate::models::Subtask;

/// Runs the configured breakdown strategy.
///
/// If the primary strategy fails, the failure is logged and the
/// rule-based plan is returned instead, so planning never fails.
#[derive(Debug, Clone)]
pub struct BreakdownPlanner {
    primary: Arc<dyn BreakdownStrategy>,
}

impl BreakdownPlanner {
    /// Planner that only uses the rule-based strategy.
    pub fn rules() -> Self {
        Self {
            primary: Arc::new(RuleBasedBreakdown),
        }
    }

    /// Planner with a custom primary strategy.
    pub fn with_strategy<S: BreakdownStrategy + 'static>(strategy: S) -> Self {
        Self {
            primary: Arc::new(strategy),
        }
    }

    /// Builds the planner described by configuration.
    ///
    /// Selecting `external` without the `llm` feature compiled in logs a
    /// warning and uses rules.
    pub fn from_config(config: &BreakdownConfig) -> Self {
        match config.strategy {
            BreakdownStrategyKind::Rules => Self::rules(),
            #[cfg(feature = "llm")]
            BreakdownStrategyKind::External => {
                Self::with_strategy(super::ExternalBreakdown::new(config.external.clone()))
            }
            #[cfg(not(feature = "llm"))]
            BreakdownStrategyKind::External => {
                tracing::warn!("external breakdown requested but the `llm` feature is disabled; using rules");
                Self::rules()
            }
        }
    }

    /// Name of the primary strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Produces a subtask plan, falling back to rules on failure.
    pub fn plan(&self, request: &BreakdownRequest) -> Vec<Subtask> {
        match self.primary.breakdown(request) {
            Ok(plan) if !plan.is_empty() => plan,
            Ok(_) => {
                tracing::warn!(
                    strategy = self.primary.name(),
                    task = %request.task_name,
                    "strategy returned an empty plan, using rules"
                );
                RuleBasedBreakdown::plan(request)
            }
            Err(e) => {
                tracing::warn!(
                    strategy = self.primary.name(),
                    task = %request.task_name,
                    error = %e,
                    "breakdown failed, using rules"
                );
                RuleBasedBreakdown::plan(request)
            }
        }
    }
}

impl Default for BreakdownPlanner {
    fn default() -> Self {
        Self::rules()
    }
}

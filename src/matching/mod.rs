//! Resource scoring and recommendation.
//!
//! Candidate resources are scored by summing independent score components
//! (skill match, speed, quality, workload) and ranked by the raw total.
//!
//! # Usage
//!
//! ```
//! use u_pm::matching::{MatchRequest, ResourceMatcher};
//! use u_pm::models::{ProjectSnapshot, Resource};
//!
//! let snapshot = ProjectSnapshot::new()
//!     .with_resource(Resource::new("R1").with_skill("Python", 9).with_speed(8).with_quality(7))
//!     .with_resource(Resource::new("R2").with_skill("Python", 3));
//!
//! let ranked = ResourceMatcher::new(&snapshot)
//!     .recommend(&MatchRequest::new("Dev", vec!["Python".into()]).with_top_n(1));
//! assert_eq!(ranked[0].resource.id, "R1");
//! assert!((ranked[0].score - 88.0).abs() < 1e-10);
//! ```
//!
//! # Score Convention
//! **Higher score = better match.** Totals are not floored at zero: a
//! heavily loaded resource can score below zero and still rank correctly.

mod components;
mod engine;

pub use components::{QualityScore, SkillMatch, SpeedScore, TypeAffinity, WorkloadAdjustment};
pub use engine::{
    CompositeScorer, MatchRequest, ProfileRecommendation, ResourceMatch, ResourceMatcher,
    ResourceWorkload, SingleMatch,
};

use crate::models::Resource;
use std::fmt::Debug;

/// Per-resource inputs to score components.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Task type being staffed.
    pub task_type: &'a str,
    /// Skills the task needs.
    pub required_skills: &'a [String],
    /// Unfinished tasks the resource already holds.
    pub open_tasks: usize,
}

/// Points awarded by one component, with the reasons shown to a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    /// Points added (may be negative).
    pub points: f64,
    /// Human-readable explanations.
    pub reasons: Vec<String>,
}

impl Contribution {
    /// No points, no reasons.
    pub fn none() -> Self {
        Self::default()
    }

    /// Points with a single reason.
    pub fn new(points: f64, reason: impl Into<String>) -> Self {
        Self {
            points,
            reasons: vec![reason.into()],
        }
    }
}

/// One independent term of a resource's composite score.
pub trait ScoreComponent: Send + Sync + Debug {
    /// Component name (e.g., "skill", "workload").
    fn name(&self) -> &'static str;

    /// Scores a resource for the context.
    fn evaluate(&self, resource: &Resource, context: &MatchContext<'_>) -> Contribution;
}

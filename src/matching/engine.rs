//! Composite scoring and ranking of resources against a snapshot.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use super::components::{QualityScore, SkillMatch, SpeedScore, TypeAffinity, WorkloadAdjustment};
use super::{Contribution, MatchContext, ScoreComponent};
use crate::models::{ProjectSnapshot, Resource, Task, TaskStatus, TaskType};

/// What a task needs from a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest {
    /// Task type tag (e.g., "Dev").
    pub task_type: String,
    /// Skills the task needs.
    pub required_skills: Vec<String>,
    /// Number of candidates returned.
    pub top_n: usize,
}

impl MatchRequest {
    /// Request for the top 3 candidates.
    pub fn new(task_type: impl Into<String>, required_skills: Vec<String>) -> Self {
        Self {
            task_type: task_type.into(),
            required_skills,
            top_n: 3,
        }
    }

    /// Sets the number of candidates returned.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMatch {
    /// The candidate.
    pub resource: Resource,
    /// Raw composite score (may be negative, may exceed 100).
    pub score: f64,
    /// `min(score, 100)`. Not floored at zero.
    pub match_percentage: f64,
    /// Per-component explanations, in component order.
    pub reasons: Vec<String>,
    /// Open tasks currently held.
    pub current_workload: usize,
}

/// Best resource for a single task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleMatch {
    /// The candidate.
    pub resource: Resource,
    /// Score capped at 100.
    pub score: f64,
}

/// Suggestion based on the speed/quality profile alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecommendation {
    /// Suggested resource.
    pub resource_id: String,
    /// Nickname if set, otherwise name.
    pub display_name: String,
    /// Why it was suggested.
    pub reason: String,
}

/// Task load of one active resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceWorkload {
    /// Resource id.
    pub resource_id: String,
    /// Nickname if set, otherwise name.
    pub display_name: String,
    /// Assigned task ids, de-duplicated.
    pub task_ids: Vec<String>,
    /// Assigned task count.
    pub total: usize,
    /// Tasks at 0%.
    pub not_started: usize,
    /// Tasks strictly between 0% and 100%.
    pub in_progress: usize,
    /// Tasks at 100%.
    pub completed: usize,
}

/// Sums a list of score components.
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    components: Vec<Arc<dyn ScoreComponent>>,
}

impl CompositeScorer {
    /// Creates an empty scorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component.
    pub fn with_component<C: ScoreComponent + 'static>(mut self, component: C) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Skill match, speed ×2, quality ×2, workload.
    pub fn multi_skill() -> Self {
        Self::new()
            .with_component(SkillMatch)
            .with_component(SpeedScore::default())
            .with_component(QualityScore::default())
            .with_component(WorkloadAdjustment)
    }

    /// Task-type affinity ×5, speed ×2.5, quality ×2.5.
    pub fn single_task() -> Self {
        Self::new()
            .with_component(TypeAffinity::default())
            .with_component(SpeedScore::new(2.5))
            .with_component(QualityScore::new(2.5))
    }

    /// Names of the components, in evaluation order.
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Sums every component's contribution. The running total is not
    /// clamped.
    pub fn score(&self, resource: &Resource, context: &MatchContext<'_>) -> Contribution {
        self.components
            .iter()
            .fold(Contribution::none(), |mut acc, component| {
                let part = component.evaluate(resource, context);
                acc.points += part.points;
                acc.reasons.extend(part.reasons);
                acc
            })
    }
}

/// Recommends resources from a read-only snapshot.
///
/// # Example
/// ```
/// use u_pm::matching::ResourceMatcher;
/// use u_pm::models::{ProjectSnapshot, Resource, Task};
///
/// let snapshot = ProjectSnapshot::new()
///     .with_resource(Resource::new("R1").with_skill("Backend Dev", 8));
/// let task = Task::new("T1").with_type("Dev");
/// let best = ResourceMatcher::new(&snapshot).recommend_single(&task).unwrap();
/// assert_eq!(best.resource.id, "R1");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceMatcher<'a> {
    snapshot: &'a ProjectSnapshot,
}

impl<'a> ResourceMatcher<'a> {
    /// Creates a matcher over a snapshot.
    pub fn new(snapshot: &'a ProjectSnapshot) -> Self {
        Self { snapshot }
    }

    /// Ranks active resources for a request, best first.
    ///
    /// Sorted by raw score; equal scores keep snapshot order.
    pub fn recommend(&self, request: &MatchRequest) -> Vec<ResourceMatch> {
        let scorer = CompositeScorer::multi_skill();

        let mut ranked: Vec<ResourceMatch> = self
            .snapshot
            .active_resources()
            .map(|resource| {
                let open_tasks = self.snapshot.open_task_count(&resource.id);
                let context = MatchContext {
                    task_type: &request.task_type,
                    required_skills: &request.required_skills,
                    open_tasks,
                };
                let scored = scorer.score(resource, &context);
                tracing::debug!(
                    resource = %resource.id,
                    score = scored.points,
                    open_tasks,
                    "resource scored"
                );
                ResourceMatch {
                    resource: resource.clone(),
                    score: scored.points,
                    match_percentage: scored.points.min(100.0),
                    reasons: scored.reasons,
                    current_workload: open_tasks,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(request.top_n);
        ranked
    }

    /// Best resource for a task by type affinity and profile.
    ///
    /// Returns `None` when no resource is active.
    pub fn recommend_single(&self, task: &Task) -> Option<SingleMatch> {
        let scorer = CompositeScorer::single_task();
        let context = MatchContext {
            task_type: &task.task_type,
            required_skills: &[],
            open_tasks: 0,
        };

        let mut best: Option<SingleMatch> = None;
        for resource in self.snapshot.active_resources() {
            let score = scorer.score(resource, &context).points.min(100.0);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(SingleMatch {
                    resource: resource.clone(),
                    score,
                });
            }
        }

        if let Some(b) = &best {
            tracing::debug!(task = %task.id, resource = %b.resource.id, score = b.score, "single match");
        }
        best
    }

    /// Fastest resource for delivery work (`Dev`/`Fix`), otherwise the one
    /// with the highest quality score. Ties keep snapshot order.
    pub fn recommend_by_profile(&self, task_type: &str) -> Option<ProfileRecommendation> {
        let kind = TaskType::parse(task_type);
        let by_speed = kind.is_delivery();

        let key = |r: &Resource| if by_speed { r.speed_score } else { r.quality_score };
        let mut best: Option<&Resource> = None;
        for resource in self.snapshot.active_resources() {
            if best.map_or(true, |b| key(resource) > key(b)) {
                best = Some(resource);
            }
        }

        best.map(|resource| ProfileRecommendation {
            resource_id: resource.id.clone(),
            display_name: resource.display_name().to_string(),
            reason: format!(
                "System suggests {} for this {} task based on performance characteristics.",
                resource.display_name(),
                task_type
            ),
        })
    }

    /// Task counts per active resource, heaviest first.
    pub fn workload_report(&self) -> Vec<ResourceWorkload> {
        let mut report: Vec<ResourceWorkload> = self
            .snapshot
            .active_resources()
            .map(|resource| {
                let tasks = self.snapshot.resource_tasks(&resource.id);
                let count = |status: TaskStatus| tasks.iter().filter(|t| t.status() == status).count();
                ResourceWorkload {
                    resource_id: resource.id.clone(),
                    display_name: resource.display_name().to_string(),
                    task_ids: tasks.iter().map(|t| t.id.clone()).collect(),
                    total: tasks.len(),
                    not_started: count(TaskStatus::NotStarted),
                    in_progress: count(TaskStatus::InProgress),
                    completed: count(TaskStatus::Completed),
                }
            })
            .collect();

        report.sort_by(|a, b| b.total.cmp(&a.total));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskAssignment;

    fn busy_snapshot() -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R2").with_skill("Python", 3))
            .with_resource(
                Resource::new("R1")
                    .with_skill("Python", 9)
                    .with_speed(8)
                    .with_quality(7),
            );
        for i in 0..6 {
            snapshot = snapshot.with_task(Task::new(format!("T{i}")).with_assignee("R2"));
        }
        snapshot
    }

    #[test]
    fn test_recommend_ranks_documented_example() {
        let snapshot = busy_snapshot();
        let matcher = ResourceMatcher::new(&snapshot);

        let all = matcher.recommend(&MatchRequest::new("Dev", vec!["Python".into()]));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].resource.id, "R1");
        // 30 + 18 + 16 + 14 + 10
        assert!((all[0].score - 88.0).abs() < 1e-10);
        assert_eq!(all[0].current_workload, 0);
        assert_eq!(
            all[0].reasons,
            vec!["Python: 9/10", "Speed: 8/10", "Quality: 7/10", "Current tasks: 0"]
        );
        // 30 + 6 + 10 + 10 - 10
        assert!((all[1].score - 46.0).abs() < 1e-10);
        assert_eq!(all[1].current_workload, 6);

        let top = matcher.recommend(&MatchRequest::new("Dev", vec!["Python".into()]).with_top_n(1));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].resource.id, "R1");
    }

    #[test]
    fn test_negative_score_is_not_floored() {
        let mut snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R1").with_speed(0).with_quality(0))
            .with_resource(Resource::new("R2").with_speed(1).with_quality(0));
        for i in 0..6 {
            snapshot = snapshot
                .with_task(Task::new(format!("A{i}")).with_assignee("R1"))
                .with_task(Task::new(format!("B{i}")).with_assignee("R2"));
        }

        let ranked = ResourceMatcher::new(&snapshot).recommend(&MatchRequest::new("Dev", Vec::new()));
        // R2: 2 - 10 = -8, R1: -10. Percentages stay negative.
        assert_eq!(ranked[0].resource.id, "R2");
        assert!((ranked[0].score + 8.0).abs() < 1e-10);
        assert!((ranked[0].match_percentage + 8.0).abs() < 1e-10);
        assert!((ranked[1].match_percentage + 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let snapshot = ProjectSnapshot::new().with_resource(
            Resource::new("R1")
                .with_skill("Rust", 10)
                .with_speed(10)
                .with_quality(10),
        );
        let ranked = ResourceMatcher::new(&snapshot).recommend(&MatchRequest::new("Dev", vec!["Rust".into()]));
        // 30 + 20 + 20 + 20 + 10
        assert!((ranked[0].score - 100.0).abs() < 1e-10);

        let snapshot = ProjectSnapshot::new().with_resource(
            Resource::new("R1")
                .with_skill("Rust", 15)
                .with_speed(10)
                .with_quality(10),
        );
        let ranked = ResourceMatcher::new(&snapshot).recommend(&MatchRequest::new("Dev", vec!["Rust".into()]));
        assert!(ranked[0].score > 100.0);
        assert!((ranked[0].match_percentage - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_ties_keep_snapshot_order_and_inactive_skipped() {
        let snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("A"))
            .with_resource(Resource::new("Off").with_speed(10).deactivated())
            .with_resource(Resource::new("B"));
        let ranked = ResourceMatcher::new(&snapshot).recommend(&MatchRequest::new("Dev", Vec::new()));
        let ids: Vec<&str> = ranked.iter().map(|m| m.resource.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_workload_counts_open_deduplicated_tasks() {
        let snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R1"))
            .with_task(Task::new("T1").with_assignee("R1"))
            .with_task(Task::new("T2").with_progress(100.0).with_assignee("R1"))
            .with_task(Task::new("T3"))
            .with_assignment(TaskAssignment::new("T1", "R1"))
            .with_assignment(TaskAssignment::new("T3", "R1"));
        let ranked = ResourceMatcher::new(&snapshot).recommend(&MatchRequest::new("Dev", Vec::new()));
        // T1 (both forms, once) and T3; T2 is complete.
        assert_eq!(ranked[0].current_workload, 2);
        assert!((ranked[0].score - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_recommend_single() {
        let snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R1").with_skill("Design", 10))
            .with_resource(Resource::new("R2").with_skill("Backend Dev", 6));
        let task = Task::new("T1").with_type("Dev");
        let best = ResourceMatcher::new(&snapshot).recommend_single(&task).unwrap();
        // 6 × 5 + 5 × 2.5 + 5 × 2.5
        assert_eq!(best.resource.id, "R2");
        assert!((best.score - 55.0).abs() < 1e-10);

        let strong = ProjectSnapshot::new().with_resource(
            Resource::new("R1")
                .with_skill("dev", 10)
                .with_skill("devops", 10),
        );
        let best = ResourceMatcher::new(&strong).recommend_single(&task).unwrap();
        assert!((best.score - 100.0).abs() < 1e-10);

        let empty = ProjectSnapshot::new().with_resource(Resource::new("R1").deactivated());
        assert!(ResourceMatcher::new(&empty).recommend_single(&task).is_none());
    }

    #[test]
    fn test_recommend_by_profile() {
        let snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R1").with_name("Kim").with_speed(9).with_quality(4))
            .with_resource(
                Resource::new("R2")
                    .with_name("Lee")
                    .with_nickname("Sparrow")
                    .with_speed(4)
                    .with_quality(9),
            );
        let matcher = ResourceMatcher::new(&snapshot);

        let dev = matcher.recommend_by_profile("Dev").unwrap();
        assert_eq!(dev.resource_id, "R1");
        assert_eq!(dev.display_name, "Kim");

        let admin = matcher.recommend_by_profile("Admin").unwrap();
        assert_eq!(admin.resource_id, "R2");
        assert_eq!(admin.display_name, "Sparrow");
        assert_eq!(
            admin.reason,
            "System suggests Sparrow for this Admin task based on performance characteristics."
        );

        assert!(ResourceMatcher::new(&ProjectSnapshot::new())
            .recommend_by_profile("Dev")
            .is_none());
    }

    #[test]
    fn test_workload_report() {
        let snapshot = ProjectSnapshot::new()
            .with_resource(Resource::new("R1"))
            .with_resource(Resource::new("R2"))
            .with_resource(Resource::new("R3").deactivated())
            .with_task(Task::new("T1").with_assignee("R2"))
            .with_task(Task::new("T2").with_progress(40.0).with_assignee("R2"))
            .with_task(Task::new("T3").with_progress(100.0))
            .with_task(Task::new("T4").with_assignee("R3"))
            .with_assignment(TaskAssignment::new("T3", "R2"))
            .with_assignment(TaskAssignment::new("T1", "R2"));

        let report = ResourceMatcher::new(&snapshot).workload_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].resource_id, "R2");
        assert_eq!(report[0].task_ids, vec!["T1", "T2", "T3"]);
        assert_eq!(report[0].total, 3);
        assert_eq!(report[0].not_started, 1);
        assert_eq!(report[0].in_progress, 1);
        assert_eq!(report[0].completed, 1);
        assert_eq!(report[1].resource_id, "R1");
        assert_eq!(report[1].total, 0);
    }

    #[test]
    fn test_composite_component_names() {
        assert_eq!(
            CompositeScorer::multi_skill().component_names(),
            vec!["skill", "speed", "quality", "workload"]
        );
        assert_eq!(
            CompositeScorer::single_task().component_names(),
            vec!["type_affinity", "speed", "quality"]
        );
    }
}

//! Configured entry point for the web-request layer.
//!
//! [`Engine`] owns an [`EngineConfig`] and the breakdown/scheduling
//! strategies built from it. Every query takes a read-only
//! [`ProjectSnapshot`]; the only mutating call is
//! [`Engine::update_task_progress`], which works on a snapshot the caller
//! then persists.

use chrono::NaiveDate;

use crate::breakdown::{BreakdownPlanner, BreakdownRequest};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::insights::{self, ProjectInsight};
use crate::matching::{
    MatchRequest, ProfileRecommendation, ResourceMatch, ResourceMatcher, ResourceWorkload,
    SingleMatch,
};
use crate::models::{ProgressUpdate, ProjectSnapshot, Resource, ScheduledSubtask, Subtask, Task};
use crate::progress::{self, WeeklySnapshot};
use crate::risk::{RiskAssessment, RiskPredictor};
use crate::scheduler::SequentialScheduler;
use crate::validation::{self, ValidationResult};

/// The scoring and recommendation engine.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_pm::config::EngineConfig;
/// use u_pm::engine::Engine;
/// use u_pm::models::{Project, ProjectSnapshot, Task};
///
/// let engine = Engine::new(EngineConfig::default());
/// let mut snapshot = ProjectSnapshot::new()
///     .with_project(Project::new("P1"))
///     .with_task(Task::new("T1").with_project("P1").with_weight(3.0))
///     .with_task(Task::new("T2").with_project("P1").with_weight(1.0));
///
/// let update = engine.update_task_progress(&mut snapshot, "T1", 100.0).unwrap();
/// assert_eq!(update.project_progress, Some(75.0));
/// assert_eq!(engine.project_progress(&snapshot, "P1").unwrap(), 75.0);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    planner: BreakdownPlanner,
    scheduler: SequentialScheduler,
}

impl Engine {
    /// Builds an engine from configuration.
    pub fn new(config: EngineConfig) -> Self {
        let planner = BreakdownPlanner::from_config(&config.breakdown);
        let scheduler = SequentialScheduler::new(config.schedule.calendar());
        tracing::debug!(
            breakdown = planner.strategy_name(),
            skip_weekends = config.schedule.skip_weekends,
            holidays = config.schedule.holidays.len(),
            "engine configured"
        );
        Self {
            config,
            planner,
            scheduler,
        }
    }

    /// Replaces the breakdown planner.
    pub fn with_planner(mut self, planner: BreakdownPlanner) -> Self {
        self.planner = planner;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Weighted progress of a project's tasks.
    pub fn project_progress(&self, snapshot: &ProjectSnapshot, project_id: &str) -> Result<f64> {
        require_project(snapshot, project_id)?;
        Ok(progress::aggregate_progress(snapshot.project_tasks(project_id)))
    }

    /// Weighted planned progress of a project's tasks as of a date.
    pub fn planned_progress(
        &self,
        snapshot: &ProjectSnapshot,
        project_id: &str,
        as_of: NaiveDate,
    ) -> Result<f64> {
        require_project(snapshot, project_id)?;
        Ok(progress::planned_progress(snapshot.project_tasks(project_id), as_of))
    }

    /// Plan-vs-actual point for a project's weekly curve.
    pub fn weekly_snapshot(
        &self,
        snapshot: &ProjectSnapshot,
        project_id: &str,
        as_of: NaiveDate,
    ) -> Result<WeeklySnapshot> {
        require_project(snapshot, project_id)?;
        let tasks: Vec<&Task> = snapshot.project_tasks(project_id).collect();
        Ok(WeeklySnapshot::capture(project_id, &tasks, as_of))
    }

    /// Sets a task's progress and recomputes its project's aggregate.
    pub fn update_task_progress(
        &self,
        snapshot: &mut ProjectSnapshot,
        task_id: &str,
        progress: f64,
    ) -> Result<ProgressUpdate> {
        snapshot.update_task_progress(task_id, progress)
    }

    /// Subtask plan from the configured breakdown strategy.
    pub fn breakdown_task(
        &self,
        task_name: &str,
        task_type: &str,
        resource_speed: i32,
        resource_quality: i32,
    ) -> Vec<Subtask> {
        self.planner.plan(
            &BreakdownRequest::new(task_name, task_type)
                .with_profile(resource_speed, resource_quality),
        )
    }

    /// Lays subtasks out on the configured calendar.
    pub fn schedule(&self, subtasks: &[Subtask], start_date: NaiveDate) -> Vec<ScheduledSubtask> {
        self.scheduler.schedule(subtasks, start_date)
    }

    /// Breaks a task down for a resource's profile and schedules the plan.
    ///
    /// Without a resource, a baseline profile is used.
    pub fn plan_task(
        &self,
        task: &Task,
        resource: Option<&Resource>,
        start_date: NaiveDate,
    ) -> Vec<ScheduledSubtask> {
        let mut request = BreakdownRequest::new(task.name.as_str(), task.task_type.as_str());
        if let Some(r) = resource {
            request = request.with_profile(r.speed_score, r.quality_score);
        }
        let subtasks = self.planner.plan(&request);
        self.schedule(&subtasks, start_date)
    }

    /// Ranks resources for a task type and skill list. `top_n` defaults to
    /// the configured value.
    pub fn recommend_resources(
        &self,
        snapshot: &ProjectSnapshot,
        task_type: &str,
        required_skills: &[String],
        top_n: Option<usize>,
    ) -> Vec<ResourceMatch> {
        let request = MatchRequest::new(task_type, required_skills.to_vec())
            .with_top_n(top_n.unwrap_or(self.config.matching.top_n));
        ResourceMatcher::new(snapshot).recommend(&request)
    }

    /// Best single resource for a task.
    pub fn recommend_single(
        &self,
        snapshot: &ProjectSnapshot,
        task_id: &str,
    ) -> Result<Option<SingleMatch>> {
        let task = require_task(snapshot, task_id)?;
        Ok(ResourceMatcher::new(snapshot).recommend_single(task))
    }

    /// Profile-only suggestion for a task type.
    pub fn recommend_by_profile(
        &self,
        snapshot: &ProjectSnapshot,
        task_type: &str,
    ) -> Option<ProfileRecommendation> {
        ResourceMatcher::new(snapshot).recommend_by_profile(task_type)
    }

    /// Task counts per active resource.
    pub fn workload_report(&self, snapshot: &ProjectSnapshot) -> Vec<ResourceWorkload> {
        ResourceMatcher::new(snapshot).workload_report()
    }

    /// Risk of a task as of a date.
    pub fn predict_risk(
        &self,
        snapshot: &ProjectSnapshot,
        task_id: &str,
        today: NaiveDate,
    ) -> Result<RiskAssessment> {
        let task = require_task(snapshot, task_id)?;
        Ok(RiskPredictor::new(snapshot).assess(task, today))
    }

    /// Risk of a task as of the local date.
    pub fn predict_risk_now(&self, snapshot: &ProjectSnapshot, task_id: &str) -> Result<RiskAssessment> {
        self.predict_risk(snapshot, task_id, local_today())
    }

    /// Project health as of a date.
    pub fn generate_insights(
        &self,
        snapshot: &ProjectSnapshot,
        project_id: &str,
        today: NaiveDate,
    ) -> Result<ProjectInsight> {
        insights::generate_insights(snapshot, project_id, today, self.config.insights.high_risk_limit)
    }

    /// Project health as of the local date.
    pub fn generate_insights_now(
        &self,
        snapshot: &ProjectSnapshot,
        project_id: &str,
    ) -> Result<ProjectInsight> {
        self.generate_insights(snapshot, project_id, local_today())
    }

    /// Integrity check of a snapshot.
    pub fn validate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        validation::validate_snapshot(snapshot)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn require_project(snapshot: &ProjectSnapshot, project_id: &str) -> Result<()> {
    snapshot
        .project(project_id)
        .map(|_| ())
        .ok_or_else(|| EngineError::ProjectNotFound(project_id.to_string()))
}

fn require_task<'a>(snapshot: &'a ProjectSnapshot, task_id: &str) -> Result<&'a Task> {
    snapshot
        .task(task_id)
        .ok_or_else(|| EngineError::TaskNotFound(task_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, TaskAssignment};
    use crate::risk::RiskLevel;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn snapshot() -> ProjectSnapshot {
        ProjectSnapshot::new()
            .with_project(Project::new("P1").with_name("Portal"))
            .with_resource(
                Resource::new("R1")
                    .with_name("Kim")
                    .with_skill("Python", 9)
                    .with_skill("Backend Dev", 7)
                    .with_speed(8)
                    .with_quality(7),
            )
            .with_resource(Resource::new("R2").with_name("Lee").with_skill("Python", 3))
            .with_task(
                Task::new("T1")
                    .with_project("P1")
                    .with_name("Build login API")
                    .with_type("Dev")
                    .with_weight(3.0)
                    .with_plan(d(3, 2), d(3, 20))
                    .with_assignee("R1"),
            )
            .with_task(
                Task::new("T2")
                    .with_project("P1")
                    .with_name("Order laptops")
                    .with_type("Procurement")
                    .with_planned_end(d(3, 5)),
            )
            .with_assignment(TaskAssignment::new("T1", "R2"))
    }

    #[test]
    fn test_progress_queries() {
        let engine = Engine::default();
        let mut snapshot = snapshot();

        assert!((engine.project_progress(&snapshot, "P1").unwrap()).abs() < 1e-10);
        let update = engine.update_task_progress(&mut snapshot, "T2", 100.0).unwrap();
        assert!((update.old_progress).abs() < 1e-10);
        assert_eq!(update.project_progress, Some(25.0));
        assert!((engine.project_progress(&snapshot, "P1").unwrap() - 25.0).abs() < 1e-10);

        let weekly = engine.weekly_snapshot(&snapshot, "P1", d(3, 6)).unwrap();
        assert_eq!(weekly.week_number, 10);
        assert!((weekly.actual_acc - 25.0).abs() < 1e-10);

        assert!(engine.planned_progress(&snapshot, "P1", d(3, 20)).unwrap() > 99.9);
        assert!(matches!(
            engine.project_progress(&snapshot, "P9"),
            Err(EngineError::ProjectNotFound(_))
        ));
        assert!(matches!(
            engine.update_task_progress(&mut snapshot, "T1", 101.0),
            Err(EngineError::InvalidProgress { .. })
        ));
    }

    #[test]
    fn test_breakdown_and_schedule() {
        let engine = Engine::default();
        let plan = engine.breakdown_task("Build login API", "Dev", 5, 5);
        assert_eq!(plan.len(), 6);

        let scheduled = engine.schedule(&plan, d(3, 2));
        assert_eq!(scheduled.len(), 6);
        assert_eq!(scheduled[0].planned_start, d(3, 2));
        for pair in scheduled.windows(2) {
            assert!(pair[1].planned_start > pair[0].planned_end);
        }
    }

    #[test]
    fn test_plan_task_uses_resource_profile() {
        let engine = Engine::default();
        let snapshot = snapshot();
        let task = snapshot.task("T2").unwrap();

        let baseline = engine.plan_task(task, None, d(3, 2));
        let fast = engine.plan_task(task, snapshot.resource("R1"), d(3, 2));
        assert_eq!(baseline.len(), 5);
        assert_eq!(fast.len(), 5);
        assert!(fast.last().unwrap().planned_end <= baseline.last().unwrap().planned_end);
    }

    #[test]
    fn test_recommendations() {
        let engine = Engine::default();
        let snapshot = snapshot();

        let ranked = engine.recommend_resources(&snapshot, "Dev", &["Python".to_string()], None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].resource.id, "R1");

        let top = engine.recommend_resources(&snapshot, "Dev", &["Python".to_string()], Some(1));
        assert_eq!(top.len(), 1);

        let single = engine.recommend_single(&snapshot, "T1").unwrap().unwrap();
        assert_eq!(single.resource.id, "R1");
        assert!(matches!(
            engine.recommend_single(&snapshot, "T9"),
            Err(EngineError::TaskNotFound(_))
        ));

        let profile = engine.recommend_by_profile(&snapshot, "Fix").unwrap();
        assert_eq!(profile.resource_id, "R1");

        let report = engine.workload_report(&snapshot);
        assert_eq!(report[0].total, 1);
        assert_eq!(report[1].total, 1);
    }

    #[test]
    fn test_risk_and_insights() {
        let engine = Engine::default();
        let snapshot = snapshot();
        let today = d(3, 10);

        // Overdue by 5 days and unstaffed.
        let risk = engine.predict_risk(&snapshot, "T2", today).unwrap();
        assert_eq!(risk.score, 60);
        assert_eq!(risk.level, RiskLevel::High);

        let insight = engine.generate_insights(&snapshot, "P1", today).unwrap();
        assert_eq!(insight.total_tasks, 2);
        assert_eq!(insight.high_risk_count, 1);
        assert_eq!(insight.high_risk_tasks[0].task_id, "T2");

        assert!(engine.predict_risk_now(&snapshot, "T1").is_ok());
        assert!(engine.generate_insights_now(&snapshot, "P1").is_ok());
        assert!(matches!(
            engine.generate_insights(&snapshot, "P9", today),
            Err(EngineError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_config_drives_limits_and_calendar() {
        let config = EngineConfig::from_toml_str(
            "[schedule]\nskip_weekends = false\n\n[insights]\nhigh_risk_limit = 0\n",
        )
        .unwrap();
        let engine = Engine::new(config);

        // Thursday + 5 counted days, weekends included.
        let plan = engine.schedule(&[Subtask::new("A", 5.0)], d(3, 5));
        assert_eq!(plan[0].planned_end, d(3, 10));

        let insight = engine.generate_insights(&snapshot(), "P1", d(3, 10)).unwrap();
        assert_eq!(insight.high_risk_count, 1);
        assert!(insight.high_risk_tasks.is_empty());
    }

    #[test]
    fn test_validate() {
        let engine = Engine::default();
        assert!(engine.validate(&snapshot()).is_ok());
        let broken = snapshot().with_assignment(TaskAssignment::new("T1", "R9"));
        assert_eq!(engine.validate(&broken).unwrap_err().len(), 1);
    }
}

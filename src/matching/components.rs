//! Built-in score components.
//!
//! # Categories
//!
//! - **Fit**: `SkillMatch` (required skills), `TypeAffinity` (task type
//!   found in skill names)
//! - **Profile**: `SpeedScore`, `QualityScore`
//! - **Load**: `WorkloadAdjustment`

use super::{Contribution, MatchContext, ScoreComponent};
use crate::models::Resource;

/// Required-skill coverage and depth.
///
/// `matched / required × 30 + mean(matched levels) × 2`, counting only
/// skills the resource holds at level > 0. Zero matches score zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillMatch;

impl ScoreComponent for SkillMatch {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn evaluate(&self, resource: &Resource, context: &MatchContext<'_>) -> Contribution {
        let required = context.required_skills;
        if required.is_empty() || resource.skills.is_empty() {
            return Contribution::none();
        }

        let mut matched = 0usize;
        let mut total_level = 0i64;
        let mut reasons = Vec::new();
        for skill in required {
            let level = resource.skills.level(skill);
            if level > 0 {
                matched += 1;
                total_level += i64::from(level);
                reasons.push(format!("{skill}: {level}/10"));
            }
        }

        if matched == 0 {
            return Contribution::none();
        }

        let coverage = matched as f64 / required.len() as f64 * 30.0;
        let depth = total_level as f64 / matched as f64 * 2.0;
        Contribution {
            points: coverage + depth,
            reasons,
        }
    }
}

/// Skill levels of every skill whose name contains the task type
/// (case-insensitive), times `per_level`.
#[derive(Debug, Clone, Copy)]
pub struct TypeAffinity {
    /// Points per skill level.
    pub per_level: f64,
}

impl Default for TypeAffinity {
    fn default() -> Self {
        Self { per_level: 5.0 }
    }
}

impl ScoreComponent for TypeAffinity {
    fn name(&self) -> &'static str {
        "type_affinity"
    }

    fn evaluate(&self, resource: &Resource, context: &MatchContext<'_>) -> Contribution {
        let task_type = context.task_type.to_lowercase();
        if task_type.is_empty() {
            return Contribution::none();
        }

        let mut points = 0.0;
        let mut reasons = Vec::new();
        for (name, level) in resource.skills.iter() {
            if name.to_lowercase().contains(&task_type) {
                points += f64::from(level) * self.per_level;
                reasons.push(format!("{name}: {level}/10"));
            }
        }
        Contribution { points, reasons }
    }
}

/// Speed score times a multiplier.
#[derive(Debug, Clone, Copy)]
pub struct SpeedScore {
    /// Points per speed point.
    pub multiplier: f64,
}

impl SpeedScore {
    /// Creates the component.
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Default for SpeedScore {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl ScoreComponent for SpeedScore {
    fn name(&self) -> &'static str {
        "speed"
    }

    fn evaluate(&self, resource: &Resource, _context: &MatchContext<'_>) -> Contribution {
        if resource.speed_score == 0 {
            return Contribution::none();
        }
        Contribution::new(
            f64::from(resource.speed_score) * self.multiplier,
            format!("Speed: {}/10", resource.speed_score),
        )
    }
}

/// Quality score times a multiplier.
#[derive(Debug, Clone, Copy)]
pub struct QualityScore {
    /// Points per quality point.
    pub multiplier: f64,
}

impl QualityScore {
    /// Creates the component.
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Default for QualityScore {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl ScoreComponent for QualityScore {
    fn name(&self) -> &'static str {
        "quality"
    }

    fn evaluate(&self, resource: &Resource, _context: &MatchContext<'_>) -> Contribution {
        if resource.quality_score == 0 {
            return Contribution::none();
        }
        Contribution::new(
            f64::from(resource.quality_score) * self.multiplier,
            format!("Quality: {}/10", resource.quality_score),
        )
    }
}

/// Bonus or penalty from current open-task count.
///
/// | Open tasks | Points |
/// |-----------|--------|
/// | 0 | +10 |
/// | 1-2 | +5 |
/// | 3-5 | 0 |
/// | >5 | -10 |
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadAdjustment;

impl WorkloadAdjustment {
    /// Step function from open-task count to points.
    pub fn points(open_tasks: usize) -> f64 {
        match open_tasks {
            0 => 10.0,
            1..=2 => 5.0,
            3..=5 => 0.0,
            _ => -10.0,
        }
    }
}

impl ScoreComponent for WorkloadAdjustment {
    fn name(&self) -> &'static str {
        "workload"
    }

    fn evaluate(&self, _resource: &Resource, context: &MatchContext<'_>) -> Contribution {
        Contribution::new(
            Self::points(context.open_tasks),
            format!("Current tasks: {}", context.open_tasks),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(skills: &'a [String], open_tasks: usize) -> MatchContext<'a> {
        MatchContext {
            task_type: "Dev",
            required_skills: skills,
            open_tasks,
        }
    }

    #[test]
    fn test_skill_match_formula() {
        let required = vec!["Python".to_string(), "SQL".to_string(), "Go".to_string()];
        let r = Resource::new("R1").with_skill("Python", 9).with_skill("SQL", 6);
        let c = SkillMatch.evaluate(&r, &ctx(&required, 0));
        // 2/3 × 30 + (15/2) × 2 = 20 + 15 = 35
        assert!((c.points - 35.0).abs() < 1e-10);
        assert_eq!(c.reasons, vec!["Python: 9/10", "SQL: 6/10"]);
    }

    #[test]
    fn test_skill_match_zero_cases() {
        let required = vec!["Rust".to_string()];
        let r = Resource::new("R1").with_skill("Python", 9).with_skill("Rust", 0);
        assert_eq!(SkillMatch.evaluate(&r, &ctx(&required, 0)), Contribution::none());

        let none: Vec<String> = Vec::new();
        assert_eq!(SkillMatch.evaluate(&r, &ctx(&none, 0)), Contribution::none());

        let bare = Resource::new("R2");
        assert_eq!(SkillMatch.evaluate(&bare, &ctx(&required, 0)), Contribution::none());
    }

    #[test]
    fn test_type_affinity_substring() {
        let r = Resource::new("R1")
            .with_skill("Backend Dev", 8)
            .with_skill("devops", 4)
            .with_skill("Design", 9);
        let none: Vec<String> = Vec::new();
        let c = TypeAffinity::default().evaluate(&r, &ctx(&none, 0));
        // "dev" in "backend dev" and "devops": (8 + 4) × 5
        assert!((c.points - 60.0).abs() < 1e-10);

        let untyped = MatchContext {
            task_type: "",
            required_skills: &none,
            open_tasks: 0,
        };
        assert_eq!(TypeAffinity::default().evaluate(&r, &untyped), Contribution::none());
    }

    #[test]
    fn test_speed_and_quality() {
        let none: Vec<String> = Vec::new();
        let r = Resource::new("R1").with_speed(8).with_quality(7);
        let speed = SpeedScore::default().evaluate(&r, &ctx(&none, 0));
        let quality = QualityScore::default().evaluate(&r, &ctx(&none, 0));
        assert!((speed.points - 16.0).abs() < 1e-10);
        assert!((quality.points - 14.0).abs() < 1e-10);
        assert_eq!(speed.reasons, vec!["Speed: 8/10"]);
        assert_eq!(quality.reasons, vec!["Quality: 7/10"]);

        let scaled = SpeedScore::new(2.5).evaluate(&r, &ctx(&none, 0));
        assert!((scaled.points - 20.0).abs() < 1e-10);

        let zero = Resource::new("R2").with_speed(0);
        assert_eq!(SpeedScore::default().evaluate(&zero, &ctx(&none, 0)), Contribution::none());
    }

    #[test]
    fn test_workload_steps() {
        assert!((WorkloadAdjustment::points(0) - 10.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(1) - 5.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(2) - 5.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(3) - 0.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(5) - 0.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(6) + 10.0).abs() < 1e-10);
        assert!((WorkloadAdjustment::points(40) + 10.0).abs() < 1e-10);

        let none: Vec<String> = Vec::new();
        let c = WorkloadAdjustment.evaluate(&Resource::new("R1"), &ctx(&none, 4));
        assert_eq!(c.reasons, vec!["Current tasks: 4"]);
    }
}

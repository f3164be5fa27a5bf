//! Snapshot integrity checks.
//!
//! Scoring never fails on odd data, so problems in a snapshot would
//! otherwise surface only as surprising numbers. Run these checks where a
//! snapshot is assembled. Detects:
//! - Duplicate IDs
//! - Tasks pointing at missing projects or resources
//! - Assignments pointing at missing tasks or resources
//! - Progress outside 0..=100 and non-positive weights
//! - Planned windows that end before they start
//! - Speed/quality scores outside 1..=10

use crate::models::ProjectSnapshot;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A task or assignment references a resource that doesn't exist.
    InvalidResourceReference,
    /// An assignment references a task that doesn't exist.
    InvalidTaskReference,
    /// A task references a project that doesn't exist.
    InvalidProjectReference,
    /// Task progress outside 0..=100.
    ProgressOutOfRange,
    /// Task weight <= 0 (the task is left out of progress rollups).
    NonPositiveWeight,
    /// `planned_end` before `planned_start`.
    InvalidDateRange,
    /// Speed or quality score outside 1..=10.
    ScoreOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &ProjectSnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut project_ids = HashSet::new();
    for p in &snapshot.projects {
        if !project_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate project ID: {}", p.id),
            ));
        }
    }

    let mut resource_ids = HashSet::new();
    for r in &snapshot.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        for (label, score) in [("speed", r.speed_score), ("quality", r.quality_score)] {
            if !(1..=10).contains(&score) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ScoreOutOfRange,
                    format!("Resource '{}' has {label} score {score}, expected 1-10", r.id),
                ));
            }
        }
    }

    let mut task_ids = HashSet::new();
    for task in &snapshot.tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if !project_ids.contains(task.project_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProjectReference,
                format!("Task '{}' references unknown project '{}'", task.id, task.project_id),
            ));
        }

        if let Some(rid) = &task.assigned_resource {
            if !resource_ids.contains(rid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!("Task '{}' references unknown resource '{}'", task.id, rid),
                ));
            }
        }

        if !(0.0..=100.0).contains(&task.actual_progress) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ProgressOutOfRange,
                format!("Task '{}' has progress {}", task.id, task.actual_progress),
            ));
        }

        if task.weight.is_nan() || task.weight <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveWeight,
                format!("Task '{}' has weight {}", task.id, task.weight),
            ));
        }

        if let (Some(start), Some(end)) = (task.planned_start, task.planned_end) {
            if end < start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDateRange,
                    format!("Task '{}' ends ({end}) before it starts ({start})", task.id),
                ));
            }
        }
    }

    for a in &snapshot.assignments {
        if !task_ids.contains(a.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTaskReference,
                format!("Assignment references unknown task '{}'", a.task_id),
            ));
        }
        if !resource_ids.contains(a.resource_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!(
                    "Assignment of task '{}' references unknown resource '{}'",
                    a.task_id, a.resource_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

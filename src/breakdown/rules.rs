//! Rule-based breakdown templates.
//!
//! # Template selection
//!
//! 1. Start from the task-type template (unknown types use `Admin`).
//! 2. If the lowercase task name contains a keyword cue, that cue's
//!    template replaces the type template. Cues are tried in this order
//!    and the first match wins:
//!
//! | Cue | Template |
//! |-----|----------|
//! | `api`, `backend` | `Api` |
//! | `ui`, `frontend`, `interface` | `Frontend` |
//! | `database`, `db` | `Database` |
//! | `test`, `qa` | `Testing` |
//! | `deploy`, `release` | `Release` |
//!
//! Cues are plain substring tests, so "build" contains "ui".
//!
//! # Speed adjustment
//!
//! `factor = clamp(1.0 - (speed - 5) × 0.06, 0.5, 1.5)`; every estimate is
//! multiplied by the factor and rounded to one decimal. A nonzero estimate
//! never drops below 0.5 days.

use super::{BreakdownRequest, BreakdownStrategy, BASELINE_SCORE};
use crate::error::Result;
use crate::models::{Subtask, TaskType};

/// Named subtask templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Software development.
    Dev,
    /// Bug fix.
    Fix,
    /// Administrative work (also the fallback).
    Admin,
    /// Purchasing.
    Procurement,
    /// API / backend work.
    Api,
    /// UI / frontend work.
    Frontend,
    /// Database work.
    Database,
    /// Testing / QA.
    Testing,
    /// Deployment / release.
    Release,
}

const DEV: &[(&str, f64)] = &[
    ("Requirements Analysis", 1.0),
    ("Design & Architecture", 2.0),
    ("Implementation", 5.0),
    ("Unit Testing", 2.0),
    ("Code Review", 1.0),
    ("Integration Testing", 2.0),
    ("Documentation", 1.0),
];

const FIX: &[(&str, f64)] = &[
    ("Bug Investigation", 1.0),
    ("Root Cause Analysis", 1.0),
    ("Fix Implementation", 2.0),
    ("Testing & Verification", 1.0),
    ("Deployment", 0.5),
];

const ADMIN: &[(&str, f64)] = &[
    ("Planning & Preparation", 1.0),
    ("Execution", 2.0),
    ("Review & Documentation", 1.0),
];

const PROCUREMENT: &[(&str, f64)] = &[
    ("Vendor Research", 2.0),
    ("Quote Comparison", 1.0),
    ("PR/PO Creation", 1.0),
    ("Approval Process", 3.0),
    ("Order Confirmation", 1.0),
];

const API: &[(&str, f64)] = &[
    ("API Design & Specification", 1.0),
    ("Database Schema Design", 1.0),
    ("Endpoint Implementation", 3.0),
    ("Authentication & Authorization", 2.0),
    ("API Testing", 2.0),
    ("API Documentation", 1.0),
];

const FRONTEND: &[(&str, f64)] = &[
    ("UI/UX Design Mockup", 2.0),
    ("Component Development", 3.0),
    ("Styling & Responsiveness", 2.0),
    ("Integration with Backend", 2.0),
    ("Cross-browser Testing", 1.0),
];

const DATABASE: &[(&str, f64)] = &[
    ("Schema Design", 2.0),
    ("Migration Scripts", 1.0),
    ("Data Migration", 2.0),
    ("Performance Optimization", 1.0),
    ("Backup & Recovery Setup", 1.0),
];

const TESTING: &[(&str, f64)] = &[
    ("Test Plan Creation", 1.0),
    ("Test Case Development", 2.0),
    ("Test Execution", 3.0),
    ("Bug Reporting", 1.0),
    ("Regression Testing", 2.0),
];

const RELEASE: &[(&str, f64)] = &[
    ("Pre-deployment Checklist", 1.0),
    ("Staging Deployment", 1.0),
    ("Staging Testing", 1.0),
    ("Production Deployment", 1.0),
    ("Post-deployment Monitoring", 1.0),
];

/// Keyword cascade, in precedence order.
const KEYWORD_CUES: &[(&[&str], Template)] = &[
    (&["api", "backend"], Template::Api),
    (&["ui", "frontend", "interface"], Template::Frontend),
    (&["database", "db"], Template::Database),
    (&["test", "qa"], Template::Testing),
    (&["deploy", "release"], Template::Release),
];

impl Template {
    /// Unadjusted subtask estimates.
    pub fn steps(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Dev => DEV,
            Self::Fix => FIX,
            Self::Admin => ADMIN,
            Self::Procurement => PROCUREMENT,
            Self::Api => API,
            Self::Frontend => FRONTEND,
            Self::Database => DATABASE,
            Self::Testing => TESTING,
            Self::Release => RELEASE,
        }
    }

    /// Template for a task type.
    pub fn for_type(task_type: &TaskType) -> Self {
        match task_type {
            TaskType::Dev => Self::Dev,
            TaskType::Fix => Self::Fix,
            TaskType::Admin | TaskType::Other(_) => Self::Admin,
            TaskType::Procurement => Self::Procurement,
        }
    }

    /// Template for the first keyword cue found in a task name.
    pub fn for_name(task_name: &str) -> Option<Self> {
        let lower = task_name.to_lowercase();
        KEYWORD_CUES
            .iter()
            .find(|(cues, _)| cues.iter().any(|cue| lower.contains(cue)))
            .map(|(_, template)| *template)
    }
}

/// Picks the template for a task: keyword cue first, then task type.
pub fn select_template(task_name: &str, task_type: &str) -> Template {
    Template::for_name(task_name).unwrap_or_else(|| Template::for_type(&TaskType::parse(task_type)))
}

/// Duration multiplier for a resource speed score.
pub fn speed_factor(resource_speed: i32) -> f64 {
    (1.0 - f64::from(resource_speed - BASELINE_SCORE) * 0.06).clamp(0.5, 1.5)
}

/// Applies the speed factor to a plan.
pub fn adjust_for_speed(steps: &[(&str, f64)], resource_speed: i32) -> Vec<Subtask> {
    let factor = speed_factor(resource_speed);
    steps
        .iter()
        .map(|&(name, days)| Subtask::new(name, adjust_days(days, factor)))
        .collect()
}

fn adjust_days(original: f64, factor: f64) -> f64 {
    let adjusted = round_tenth(original * factor);
    if original > 0.0 && adjusted < 0.5 {
        0.5
    } else {
        adjusted
    }
}

#[inline]
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Template-driven breakdown. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedBreakdown;

impl RuleBasedBreakdown {
    /// Infallible form of [`BreakdownStrategy::breakdown`].
    pub fn plan(request: &BreakdownRequest) -> Vec<Subtask> {
        let template = select_template(&request.task_name, &request.task_type);
        tracing::debug!(
            task = %request.task_name,
            task_type = %request.task_type,
            ?template,
            factor = speed_factor(request.resource_speed),
            "rule-based breakdown"
        );
        adjust_for_speed(template.steps(), request.resource_speed)
    }
}

impl BreakdownStrategy for RuleBasedBreakdown {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn breakdown(&self, request: &BreakdownRequest) -> Result<Vec<Subtask>> {
        Ok(Self::plan(request))
    }
}

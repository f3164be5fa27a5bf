//! Transient subtask plans.
//!
//! Produced by the breakdown strategies and the sequential scheduler.
//! The engine never persists these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A planned step of a task with an estimated duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Step name.
    #[serde(rename = "subtask_name")]
    pub name: String,
    /// Estimated working days (may be fractional).
    pub estimated_days: f64,
}

impl Subtask {
    /// Creates a subtask.
    pub fn new(name: impl Into<String>, estimated_days: f64) -> Self {
        Self {
            name: name.into(),
            estimated_days,
        }
    }
}

/// A subtask placed on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSubtask {
    /// Step name.
    #[serde(rename = "subtask_name")]
    pub name: String,
    /// Estimated working days.
    pub estimated_days: f64,
    /// First day of work.
    pub planned_start: NaiveDate,
    /// Last day of work.
    pub planned_end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtask_wire_names() {
        let json = serde_json::to_value(Subtask::new("Execution", 2.0)).unwrap();
        assert_eq!(json["subtask_name"], "Execution");
        assert_eq!(json["estimated_days"], 2.0);

        let parsed: Subtask =
            serde_json::from_str(r#"{"subtask_name": "Review", "estimated_days": 1.5}"#).unwrap();
        assert_eq!(parsed, Subtask::new("Review", 1.5));
    }

    #[test]
    fn test_scheduled_dates_serialize_iso() {
        let s = ScheduledSubtask {
            name: "Execution".into(),
            estimated_days: 2.0,
            planned_start: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            planned_end: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["planned_start"], "2026-03-02");
        assert_eq!(json["planned_end"], "2026-03-04");
    }
}

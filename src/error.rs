//! Error types for the engine.
//!
//! Scoring itself never fails on well-typed input. Errors are limited to
//! caller-level lookups, progress mutation, configuration loading, and the
//! external breakdown strategy.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No project with this ID in the snapshot.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// No task with this ID in the snapshot.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Progress value outside 0..=100.
    #[error("Invalid progress {value} for task {task_id}: must be within 0..=100")]
    InvalidProgress { task_id: String, value: f64 },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// External breakdown strategy failed.
    #[error("Breakdown failed: {0}")]
    Breakdown(String),
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::ProjectNotFound("P1".into()).to_string(),
            "Project not found: P1"
        );
        assert_eq!(
            EngineError::InvalidProgress {
                task_id: "T1".into(),
                value: 120.0
            }
            .to_string(),
            "Invalid progress 120 for task T1: must be within 0..=100"
        );
    }

    #[test]
    fn test_toml_error_converts_to_config() {
        let err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        assert!(matches!(EngineError::from(err), EngineError::Config(_)));
    }
}

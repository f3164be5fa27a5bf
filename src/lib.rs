//! Scoring and recommendation engine for project tracking.
//!
//! Turns a read-only snapshot of projects, weighted tasks, resources and
//! assignments into progress figures, subtask plans, resource rankings,
//! task risk scores and project health verdicts. Every computation is a
//! pure function of the snapshot it is given; persistence stays with the
//! caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Resource`, `Project`,
//!   `ProjectSnapshot`, `Subtask`, `BusinessCalendar`
//! - **`progress`**: Weighted (value-based) project progress, planned
//!   progress, weekly plan-vs-actual points
//! - **`breakdown`**: Rule-based and external task breakdown strategies
//! - **`scheduler`**: Business-day sequential subtask layout
//! - **`matching`**: Composite resource scoring and recommendation
//! - **`risk`**: Per-task risk prediction
//! - **`insights`**: Project health rollup
//! - **`validation`**: Snapshot integrity checks
//! - **`config`**: TOML-loadable engine configuration
//! - **`engine`**: Configured facade over all of the above
//!
//! # Dependency order
//!
//! progress → matching → risk → insights; breakdown and scheduler are
//! independent leaves.
//!
//! # Features
//!
//! - `llm`: external breakdown over an OpenAI-compatible chat endpoint.

pub mod breakdown;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod matching;
pub mod models;
pub mod progress;
pub mod risk;
pub mod scheduler;
pub mod validation;

pub use engine::Engine;
pub use error::{EngineError, Result};

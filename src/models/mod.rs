//! Project domain models.
//!
//! Plain records handed to the engine by a persistence layer, plus the
//! transient subtask types produced by the breakdown and scheduling steps.
//! None of these types perform I/O.
//!
//! # Record Mappings
//!
//! | u-pm | Meaning |
//! |------|---------|
//! | Project | A body of work with a persisted progress figure |
//! | Task | Weighted unit of work with planned dates and actual progress |
//! | Resource | A person with a skill map and speed/quality profile |
//! | TaskAssignment | Multi-assign link between a task and a resource |
//! | ProjectSnapshot | Read-only view over all of the above |

mod calendar;
mod resource;
mod snapshot;
mod subtask;
mod task;

pub use calendar::BusinessCalendar;
pub use resource::{Resource, SkillMap};
pub use snapshot::{Project, ProgressUpdate, ProjectSnapshot, TaskAssignment};
pub use subtask::{ScheduledSubtask, Subtask};
pub use task::{Task, TaskStatus, TaskType};

//! Scheduling domain models.
//!
//! Provides the core data types for a sprint scheduling problem and its
//! solutions: tasks with do/verify estimates and dependencies, team members
//! with daily capacity, and schedules mapping tasks to members and hours.
//!
//! | Type | Sprint meaning |
//! |------|----------------|
//! | Task | Backlog item (do + verify hours) |
//! | TaskGraph | Validated, acyclic backlog |
//! | Resource | Team member |
//! | Schedule | Sprint plan |

mod graph;
mod resource;
mod schedule;
mod task;

pub use graph::TaskGraph;
pub use resource::{Resource, ResourcePool};
pub use schedule::{Schedule, ScheduleEntry, Violation, ViolationType};
pub use task::{Task, TaskId};

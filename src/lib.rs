//! Deterministic sprint scheduling and feasibility repair.
//!
//! Computes a reference schedule for a sprint backlog, turns an untrusted
//! (typically LLM-generated) plan into a feasible one, and measures how good
//! the plan was before repair.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskGraph`, `Resource`,
//!   `ResourcePool`, `Schedule`, `ScheduleEntry`
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   dependencies, hours, capacities)
//! - **`proposal`**: Shape detection and normalization of raw proposals
//! - **`scheduler`**: Baseline list scheduling, repair, and evaluation
//! - **`pipeline`**: The two end-to-end operations, [`schedule`] and
//!   [`repair_and_evaluate`]
//! - **`benchmark`**: Benchmark cases, per-case scoring, seeded case
//!   generation
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sprint_repair::config::EvaluationConfig;
//! use sprint_repair::models::{ResourcePool, Task};
//!
//! let tasks = vec![
//!     Task::new(0).with_hours(3.0, 1.0),
//!     Task::new(1).with_hours(2.0, 1.0).with_dependency(0),
//!     Task::new(2).with_hours(4.0, 1.0),
//! ];
//! let pool = ResourcePool::new().with_resource("m0", 8.0).with_resource("m1", 8.0);
//!
//! let baseline = sprint_repair::schedule(&tasks, &pool).unwrap();
//! let proposal = json!({"sprint_backlog": [
//!     {"task_id": 0, "assignee": "m0", "start": 0, "duration": 4},
//!     {"task_id": 1, "assignee": "nobody", "start": 1, "duration": 3},
//! ]});
//! let outcome = sprint_repair::repair_and_evaluate(
//!     &tasks,
//!     &pool,
//!     &proposal,
//!     baseline.makespan,
//!     &EvaluationConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.repaired.len(), 3);
//! assert_eq!(outcome.metrics.dependency_violations, 1);
//! ```
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod benchmark;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod proposal;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
pub use pipeline::{repair_and_evaluate, schedule, ProposalSource, RepairOutcome};

//! Baseline scheduling, proposal repair and evaluation.
//!
//! # Algorithm
//!
//! `BaselineScheduler` is a greedy earliest-finish list scheduler over the
//! graph's topological order. `ScheduleRepairer` walks the same order and
//! keeps whatever proposal choices are still valid, substituting the rest.
//! Both thread an explicit [`ResourceTimeline`] through every placement.
//!
//! # Metrics
//!
//! `ScheduleEvaluator` compares the raw proposal and its repair against the
//! baseline: coverage, dependency violations, makespan ratio, utilization
//! and feasibility.
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod baseline;
mod evaluate;
mod repair;
mod timeline;

pub use baseline::{BaselineSchedule, BaselineScheduler};
pub use evaluate::{MetricsRecord, ScheduleEvaluator};
pub use repair::ScheduleRepairer;
pub use timeline::{ResourceTimeline, Slot};

//! Deterministic baseline scheduler.
//!
//! # Algorithm
//!
//! Greedy list scheduling for the resource-constrained project scheduling
//! problem:
//! 1. Visit tasks in the graph's topological order.
//! 2. `earliest = max(finish of dependencies, 0)`.
//! 3. For each member, `start = max(next_free, earliest)` and
//!    `finish = start + duration`.
//! 4. Commit to the member with the earliest finish (pool order on ties).
//!
//! Not optimal. Identical inputs always give identical schedules, which is
//! what a benchmark reference needs.
//!
//! # Complexity
//! O(n * r + e) where n=tasks, r=members, e=dependency edges.
//!
//! # Reference
//! Kolisch (1996), "Serial and parallel resource-constrained project
//! scheduling methods revisited"

use serde::{Deserialize, Serialize};

use super::timeline::ResourceTimeline;
use crate::error::ScheduleError;
use crate::models::{ResourcePool, Schedule, ScheduleEntry, Task, TaskGraph};
use crate::validation::ensure_pool_usable;

/// A baseline schedule and its makespan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSchedule {
    /// One entry per graph task.
    pub schedule: Schedule,
    /// Latest finish (hours), 0 for an empty graph.
    pub makespan: f64,
}

/// Greedy earliest-finish list scheduler.
///
/// # Example
///
/// ```
/// use sprint_repair::models::{ResourcePool, Task, TaskGraph};
/// use sprint_repair::scheduler::BaselineScheduler;
///
/// let graph = TaskGraph::new(vec![
///     Task::new(0).with_hours(3.0, 1.0),
///     Task::new(1).with_hours(2.0, 1.0).with_dependency(0),
///     Task::new(2).with_hours(4.0, 1.0),
/// ])
/// .unwrap();
/// let pool = ResourcePool::new().with_resource("m0", 8.0).with_resource("m1", 8.0);
///
/// let baseline = BaselineScheduler::new().schedule(&graph, &pool).unwrap();
/// assert_eq!(baseline.makespan, 7.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineScheduler;

impl BaselineScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Schedules every task of `graph` on `pool`.
    ///
    /// # Errors
    /// [`ScheduleError::EmptyResourcePool`] when there are tasks but no
    /// members, [`ScheduleError::InvalidInput`] for a malformed pool.
    pub fn schedule(
        &self,
        graph: &TaskGraph,
        pool: &ResourcePool,
    ) -> Result<BaselineSchedule, ScheduleError> {
        ensure_pool_usable(pool, graph.len())?;

        let mut timeline = ResourceTimeline::new(pool);
        let mut schedule = Schedule::new();

        for task in graph.topological_order() {
            let earliest = dependencies_finish(task, &schedule);
            let Some(slot) = timeline.earliest_finish(earliest, task.duration()) else {
                return Err(ScheduleError::EmptyResourcePool(graph.len()));
            };
            let member = &pool.resources()[slot.resource];
            schedule.insert(ScheduleEntry::new(task.id, &member.id, slot.start, task.duration()));
            timeline.commit(slot);
        }

        let makespan = schedule.makespan();
        tracing::debug!(tasks = graph.len(), makespan, "baseline scheduled");
        Ok(BaselineSchedule { schedule, makespan })
    }
}

/// Latest finish among a task's already-scheduled dependencies, 0 if none.
pub(crate) fn dependencies_finish(task: &Task, schedule: &Schedule) -> f64 {
    task.dependencies
        .iter()
        .filter_map(|&d| schedule.get(d))
        .map(|e| e.finish)
        .fold(0.0, f64::max)
}

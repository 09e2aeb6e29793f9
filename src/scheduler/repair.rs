//! Feasibility repair of normalized proposals.
//!
//! # Algorithm
//!
//! Visits tasks in the graph's topological order with a fresh
//! [`ResourceTimeline`]. For each task:
//! 1. `earliest` = latest finish among its dependencies (all already placed).
//! 2. Assignee: the proposal's, if valid; else the least-loaded member.
//! 3. Duration: the proposal's (validated or canonical); else canonical.
//! 4. Start: without a proposed start, `max(next_free, earliest)`. With one,
//!    the first gap on the assignee at or after `max(proposed, earliest)`.
//! 5. Commit.
//!
//! The output always covers every task exactly once, respects every
//! dependency and never overlaps two tasks on one member. A proposal that is
//! already feasible comes back unchanged.

use super::baseline::dependencies_finish;
use super::timeline::{ResourceTimeline, Slot};
use crate::error::ScheduleError;
use crate::models::{ResourcePool, Schedule, ScheduleEntry, TaskGraph};
use crate::proposal::NormalizedProposal;
use crate::validation::ensure_pool_usable;

/// Turns a partial, possibly infeasible proposal into a feasible schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleRepairer;

impl ScheduleRepairer {
    /// Creates a repairer.
    pub fn new() -> Self {
        Self
    }

    /// Repairs `proposal` against `graph` and `pool`.
    ///
    /// # Errors
    /// Only for an unusable pool; proposal problems are always absorbed.
    pub fn repair(
        &self,
        graph: &TaskGraph,
        pool: &ResourcePool,
        proposal: &NormalizedProposal,
    ) -> Result<Schedule, ScheduleError> {
        ensure_pool_usable(pool, graph.len())?;

        let mut timeline = ResourceTimeline::new(pool);
        let mut schedule = Schedule::new();

        for task in graph.topological_order() {
            let earliest = dependencies_finish(task, &schedule);
            let proposed = proposal.get(task.id);

            let assigned = proposed
                .and_then(|p| p.assignee.as_deref())
                .and_then(|a| pool.index_of(a));
            let Some(resource) = assigned.or_else(|| timeline.least_loaded()) else {
                return Err(ScheduleError::EmptyResourcePool(graph.len()));
            };
            let duration = proposed.map_or_else(|| task.duration(), |p| p.duration);

            let slot: Slot = match proposed.and_then(|p| p.start) {
                Some(start) => timeline.first_fit(resource, start.max(earliest), duration),
                None => timeline.append(resource, earliest, duration),
            };

            if let Some(p) = proposed {
                if assigned.is_none() {
                    tracing::debug!(
                        task_id = task.id,
                        "assignee substituted with least-loaded member"
                    );
                }
                if p.start.is_some_and(|s| s != slot.start) {
                    tracing::debug!(
                        task_id = task.id,
                        proposed = ?p.start,
                        repaired = slot.start,
                        "start moved to restore feasibility"
                    );
                }
            } else {
                tracing::debug!(task_id = task.id, "task missing from proposal, backfilled");
            }

            let member = &pool.resources()[slot.resource];
            schedule.insert(ScheduleEntry::new(task.id, &member.id, slot.start, duration));
            timeline.commit(slot);
        }

        Ok(schedule)
    }
}

//! Schedule (solution) model.
//!
//! A schedule maps each task to one team member and one time interval.
//! Entries are keyed by task id, so iteration and serialization order are
//! deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ResourcePool, TaskGraph, TaskId};

/// A task-resource-time assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Assigned task.
    pub task_id: TaskId,
    /// Assigned team member.
    pub assignee: String,
    /// Start time (hours).
    pub start: f64,
    /// Duration (hours).
    pub duration: f64,
    /// Finish time: `start + duration`.
    pub finish: f64,
}

impl ScheduleEntry {
    /// Creates an entry; `finish` is derived.
    pub fn new(task_id: TaskId, assignee: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            task_id,
            assignee: assignee.into(),
            start,
            duration,
            finish: start + duration,
        }
    }

    /// Whether two entries' `[start, finish)` intervals intersect.
    pub fn overlaps(&self, other: &ScheduleEntry) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

/// A complete or partial schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: BTreeMap<TaskId, ScheduleEntry>,
}

/// A broken schedule invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related task id.
    pub task_id: TaskId,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Task started before a dependency finished.
    PrecedenceViolation,
    /// Two tasks overlap on the same member.
    ResourceOverlap,
    /// Task assigned to a member outside the pool.
    UnknownResource,
    /// Graph task has no entry.
    MissingTask,
}

impl Violation {
    fn new(violation_type: ViolationType, task_id: TaskId, message: String) -> Self {
        Self {
            violation_type,
            task_id,
            message,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry for the same task.
    pub fn insert(&mut self, entry: ScheduleEntry) {
        self.entries.insert(entry.task_id, entry);
    }

    /// Entry for a task.
    pub fn get(&self, task_id: TaskId) -> Option<&ScheduleEntry> {
        self.entries.get(&task_id)
    }

    /// Whether the task has an entry.
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.entries.contains_key(&task_id)
    }

    /// Entries in ascending task id order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Makespan: latest finish across all entries, 0 when empty.
    pub fn makespan(&self) -> f64 {
        self.entries.values().map(|e| e.finish).fold(0.0, f64::max)
    }

    /// Entries assigned to a member, sorted by start.
    pub fn entries_for_resource(&self, resource_id: &str) -> Vec<&ScheduleEntry> {
        let mut entries: Vec<&ScheduleEntry> = self
            .entries
            .values()
            .filter(|e| e.assignee == resource_id)
            .collect();
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));
        entries
    }

    /// Total hours assigned to a member.
    pub fn assigned_hours(&self, resource_id: &str) -> f64 {
        self.entries
            .values()
            .filter(|e| e.assignee == resource_id)
            .map(|e| e.duration)
            .sum()
    }

    /// Checks coverage, dependency ordering, membership and non-overlap.
    ///
    /// Returns every violation found; an empty result means the schedule is
    /// feasible for `graph` on `pool`.
    pub fn violations(&self, graph: &TaskGraph, pool: &ResourcePool) -> Vec<Violation> {
        let mut violations = Vec::new();

        for task in graph.tasks() {
            let Some(entry) = self.get(task.id) else {
                violations.push(Violation::new(
                    ViolationType::MissingTask,
                    task.id,
                    format!("Task {} is not scheduled", task.id),
                ));
                continue;
            };
            for &dep in &task.dependencies {
                if let Some(dep_entry) = self.get(dep) {
                    if entry.start < dep_entry.finish {
                        violations.push(Violation::new(
                            ViolationType::PrecedenceViolation,
                            task.id,
                            format!(
                                "Task {} starts at {} before dependency {} finishes at {}",
                                task.id, entry.start, dep, dep_entry.finish
                            ),
                        ));
                    }
                }
            }
        }

        for entry in self.entries.values() {
            if !pool.contains(&entry.assignee) {
                violations.push(Violation::new(
                    ViolationType::UnknownResource,
                    entry.task_id,
                    format!(
                        "Task {} assigned to unknown member '{}'",
                        entry.task_id, entry.assignee
                    ),
                ));
            }
        }

        for id in pool.ids() {
            let entries = self.entries_for_resource(id);
            for pair in entries.windows(2) {
                if pair[0].overlaps(pair[1]) {
                    violations.push(Violation::new(
                        ViolationType::ResourceOverlap,
                        pair[1].task_id,
                        format!(
                            "Tasks {} and {} overlap on '{}'",
                            pair[0].task_id, pair[1].task_id, id
                        ),
                    ));
                }
            }
        }

        violations
    }

    /// Whether the schedule has no violations.
    pub fn is_feasible(&self, graph: &TaskGraph, pool: &ResourcePool) -> bool {
        self.violations(graph, pool).is_empty()
    }
}

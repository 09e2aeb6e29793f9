//! Task dependency graph.
//!
//! Validates the task list and computes a topological order once, at
//! construction. Both the baseline scheduler and the repairer visit tasks in
//! this order, so their choices line up task for task.
//!
//! # Algorithm
//! Kahn's algorithm with a FIFO queue. The queue is seeded with the
//! zero in-degree tasks in declaration order, and dependents are released in
//! declaration order, so the result is fully determined by the input list.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks", CACM 5(11)

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Task, TaskId};
use crate::error::ScheduleError;
use crate::validation::validate_tasks;

/// An immutable, acyclic set of tasks.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
    order: Vec<usize>,
}

impl TaskGraph {
    /// Builds and validates a graph.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidInput`] for duplicate ids, unknown
    ///   dependencies or bad work estimates.
    /// - [`ScheduleError::CycleDetected`] if the dependencies are cyclic.
    ///
    /// Repeated dependencies are collapsed to their first occurrence.
    pub fn new(mut tasks: Vec<Task>) -> Result<Self, ScheduleError> {
        validate_tasks(&tasks).map_err(ScheduleError::InvalidInput)?;
        for task in &mut tasks {
            let mut seen = HashSet::new();
            task.dependencies.retain(|d| seen.insert(*d));
        }

        let index: HashMap<TaskId, usize> =
            tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

        // dependency → dependents
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        let mut in_degree: Vec<usize> = vec![0; tasks.len()];
        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                if let Some(&d) = index.get(dep) {
                    adj[d].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> =
            (0..tasks.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(tasks.len());
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &next in &adj[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() < tasks.len() {
            let stuck: Vec<TaskId> = tasks
                .iter()
                .zip(&in_degree)
                .filter(|&(_, &d)| d > 0)
                .map(|(t, _)| t.id)
                .collect();
            tracing::warn!(tasks = ?stuck, "dependency cycle detected");
            return Err(ScheduleError::CycleDetected(stuck));
        }

        Ok(Self {
            tasks,
            index,
            order,
        })
    }

    /// Tasks in declaration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    /// Whether a task with this id exists.
    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in topological order (every task after all its dependencies).
    pub fn topological_order(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().map(|&i| &self.tasks[i])
    }

    /// Dependency edges `(dependency, dependent)` in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (TaskId, TaskId)> + '_ {
        self.tasks
            .iter()
            .flat_map(|t| t.dependencies.iter().map(move |&d| (d, t.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(graph: &TaskGraph) -> Vec<TaskId> {
        graph.topological_order().map(|t| t.id).collect()
    }

    #[test]
    fn test_topological_order_respects_dependencies() {
        let graph = TaskGraph::new(vec![
            Task::new(0).with_hours(4.0, 0.0),
            Task::new(1).with_hours(3.0, 0.0).with_dependency(0),
            Task::new(2).with_hours(5.0, 0.0),
        ])
        .unwrap();
        // FIFO: roots 0, 2 first, then 1 once 0 is released.
        assert_eq!(ids(&graph), vec![0, 2, 1]);
    }

    #[test]
    fn test_order_when_dependents_declared_first() {
        let graph = TaskGraph::new(vec![
            Task::new(5).with_hours(1.0, 0.0).with_dependency(7),
            Task::new(7).with_hours(1.0, 0.0),
            Task::new(6).with_hours(1.0, 0.0).with_dependency(5).with_dependency(7),
        ])
        .unwrap();
        assert_eq!(ids(&graph), vec![7, 5, 6]);
    }

    #[test]
    fn test_two_cycle_rejected() {
        let err = TaskGraph::new(vec![
            Task::new(0).with_hours(1.0, 0.0).with_dependency(1),
            Task::new(1).with_hours(1.0, 0.0).with_dependency(0),
        ])
        .unwrap_err();
        assert_eq!(err, ScheduleError::CycleDetected(vec![0, 1]));
    }

    #[test]
    fn test_cycle_reports_only_stuck_tasks() {
        // 0 is free; 1 → 2 → 3 → 1 is a cycle; 4 hangs off the cycle.
        let err = TaskGraph::new(vec![
            Task::new(0).with_hours(1.0, 0.0),
            Task::new(1).with_hours(1.0, 0.0).with_dependency(3).with_dependency(0),
            Task::new(2).with_hours(1.0, 0.0).with_dependency(1),
            Task::new(3).with_hours(1.0, 0.0).with_dependency(2),
            Task::new(4).with_hours(1.0, 0.0).with_dependency(3),
        ])
        .unwrap_err();
        assert_eq!(err, ScheduleError::CycleDetected(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_invalid_input_rejected_before_sorting() {
        let err = TaskGraph::new(vec![Task::new(0).with_hours(1.0, 0.0).with_dependency(9)])
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn test_repeated_dependency_is_one_edge() {
        let graph = TaskGraph::new(vec![
            Task::new(0).with_hours(1.0, 0.0),
            Task::new(1)
                .with_hours(1.0, 0.0)
                .with_dependency(0)
                .with_dependency(0),
        ])
        .unwrap();
        assert_eq!(graph.get(1).map(|t| t.dependencies.clone()), Some(vec![0]));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(ids(&graph), vec![0, 1]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = TaskGraph::new(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.topological_order().count(), 0);
    }

    #[test]
    fn test_lookup_and_edges() {
        let graph = TaskGraph::new(vec![
            Task::new(10).with_hours(1.0, 0.0),
            Task::new(11).with_hours(1.0, 0.0).with_dependency(10),
        ])
        .unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(11));
        assert!(!graph.contains(12));
        assert_eq!(graph.get(11).map(|t| t.dependencies.clone()), Some(vec![10]));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(10, 11)]);
    }
}

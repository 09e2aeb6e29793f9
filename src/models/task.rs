//! Task model.
//!
//! A task is a unit of sprint work with a "do" phase and a "verify" phase,
//! scheduled as one contiguous block on a single team member.
//!
//! # Time Representation
//! All times are in hours relative to the sprint start (t=0).

use serde::{Deserialize, Serialize};

/// Task identifier, unique within a [`TaskGraph`](super::TaskGraph).
pub type TaskId = i64;

/// A task to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Human-readable title (display only).
    #[serde(default)]
    pub title: String,
    /// Hours of implementation work.
    #[serde(alias = "do", default)]
    pub do_hours: f64,
    /// Hours of verification work.
    #[serde(alias = "verify", default)]
    pub verify_hours: f64,
    /// IDs of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Enclosing task, if this is a subtask. Informational only.
    #[serde(default)]
    pub parent: Option<TaskId>,
}

impl Task {
    /// Creates a new task with no work and no dependencies.
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            title: String::new(),
            do_hours: 0.0,
            verify_hours: 0.0,
            dependencies: Vec::new(),
            parent: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the do/verify hours.
    pub fn with_hours(mut self, do_hours: f64, verify_hours: f64) -> Self {
        self.do_hours = do_hours;
        self.verify_hours = verify_hours;
        self
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, id: TaskId) -> Self {
        self.dependencies.push(id);
        self
    }

    /// Sets the parent task.
    pub fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Canonical duration: `do_hours + verify_hours`.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.do_hours + self.verify_hours
    }

    /// Whether this task is a subtask of another.
    pub fn is_subtask(&self) -> bool {
        self.parent.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(3)
            .with_title("Login form")
            .with_hours(4.0, 1.5)
            .with_dependency(1)
            .with_dependency(2)
            .with_parent(0);

        assert_eq!(task.id, 3);
        assert_eq!(task.title, "Login form");
        assert_eq!(task.dependencies, vec![1, 2]);
        assert_eq!(task.parent, Some(0));
        assert!(task.is_subtask());
        assert!((task.duration() - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_task_deserialize_case_file_names() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Task_4",
            "do": 6,
            "verify": 2,
            "dependencies": [0, 1],
            "parent": null
        }))
        .unwrap();

        assert_eq!(task.id, 4);
        assert!((task.duration() - 8.0).abs() < 1e-10);
        assert_eq!(task.dependencies, vec![0, 1]);
        assert!(!task.is_subtask());
    }

    #[test]
    fn test_task_deserialize_defaults() {
        let task: Task = serde_json::from_str(r#"{"id": 1, "do_hours": 2.5}"#).unwrap();
        assert_eq!(task.title, "");
        assert!(task.dependencies.is_empty());
        assert!((task.duration() - 2.5).abs() < 1e-10);
    }
}

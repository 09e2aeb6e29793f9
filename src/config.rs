//! Tunable parameters for evaluation and case generation.
//!
//! Both types deserialize with defaults for missing fields, so a partial
//! JSON document (or `{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Parameters of [`ScheduleEvaluator`](crate::scheduler::ScheduleEvaluator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Hours in one calendar day, used to turn a makespan into days of
    /// member capacity.
    pub hours_per_day: f64,
    /// Slack (hours) allowed before a dependency overlap counts as a
    /// violation.
    pub tolerance: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 24.0,
            tolerance: 1e-6,
        }
    }
}

impl EvaluationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hours per day.
    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = hours;
        self
    }

    /// Sets the dependency tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Parameters of [`CaseGenerator`](crate::benchmark::CaseGenerator).
///
/// Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Minimum and maximum team size.
    pub team_size: (usize, usize),
    /// Daily capacities a member may be given.
    pub capacity_choices: Vec<f64>,
    /// Minimum and maximum number of top-level tasks.
    pub task_count: (usize, usize),
    /// Range of "do" hours for top-level tasks.
    pub do_hours: (u32, u32),
    /// Range of "verify" hours for top-level tasks.
    pub verify_hours: (u32, u32),
    /// Chance that a top-level task is split into subtasks.
    pub subtask_probability: f64,
    /// Maximum subtasks per split task.
    pub max_subtasks: usize,
    /// Chance that a task receives dependencies on earlier tasks.
    pub dependency_probability: f64,
    /// Maximum dependencies per task.
    pub max_dependencies: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            team_size: (2, 4),
            capacity_choices: vec![4.0, 6.0, 8.0],
            task_count: (4, 8),
            do_hours: (2, 8),
            verify_hours: (1, 4),
            subtask_probability: 0.3,
            max_subtasks: 2,
            dependency_probability: 0.35,
            max_dependencies: 2,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the team size range.
    pub fn with_team_size(mut self, min: usize, max: usize) -> Self {
        self.team_size = (min, max);
        self
    }

    /// Sets the top-level task count range.
    pub fn with_task_count(mut self, min: usize, max: usize) -> Self {
        self.task_count = (min, max);
        self
    }

    /// Sets the subtask probability.
    pub fn with_subtask_probability(mut self, p: f64) -> Self {
        self.subtask_probability = p;
        self
    }

    /// Sets the dependency probability.
    pub fn with_dependency_probability(mut self, p: f64) -> Self {
        self.dependency_probability = p;
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

//! Input validation for scheduling problems.
//!
//! Checks structural integrity of tasks and resources before scheduling.
//! Detects:
//! - Duplicate IDs
//! - Dependencies on missing tasks (or on the task itself)
//! - Negative, non-finite or zero-length work estimates
//! - Non-positive member capacities
//!
//! Cycle detection is not done here: it falls out of the topological sort
//! in [`TaskGraph::new`](crate::models::TaskGraph::new).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{ResourcePool, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task depends on a task that doesn't exist.
    InvalidDependency,
    /// A task depends on itself.
    SelfDependency,
    /// Do/verify hours are negative or not finite.
    InvalidHours,
    /// A task's total duration is not positive.
    InvalidDuration,
    /// A member's daily capacity is not a positive finite number.
    InvalidCapacity,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task list.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Every dependency refers to another existing task
/// 3. Hours are finite and non-negative
/// 4. Every task has positive total duration
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    for task in tasks {
        for &dep in &task.dependencies {
            if dep == task.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    format!("Task {} depends on itself", task.id),
                ));
            } else if !task_ids.contains(&dep) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDependency,
                    format!("Task {} references unknown dependency {}", task.id, dep),
                ));
            }
        }

        let hours_ok = [task.do_hours, task.verify_hours]
            .iter()
            .all(|h| h.is_finite() && *h >= 0.0);
        if !hours_ok {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "Task {} has invalid hours (do={}, verify={})",
                    task.id, task.do_hours, task.verify_hours
                ),
            ));
        } else if task.duration() <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Task {} has no work to schedule", task.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a resource pool.
///
/// Checks for duplicate member keys and non-positive capacities. An empty
/// pool is valid here; whether it is usable depends on the task count.
pub fn validate_pool(pool: &ResourcePool) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for r in pool.resources() {
        if !ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if !(r.daily_capacity_hours.is_finite() && r.daily_capacity_hours > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!(
                    "Resource '{}' has invalid daily capacity {}",
                    r.id, r.daily_capacity_hours
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates tasks and pool together, collecting every issue.
pub fn validate_input(tasks: &[Task], pool: &ResourcePool) -> ValidationResult {
    let mut errors = validate_tasks(tasks).err().unwrap_or_default();
    errors.extend(validate_pool(pool).err().unwrap_or_default());
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Ensures `pool` can host `task_count` tasks.
pub(crate) fn ensure_pool_usable(
    pool: &ResourcePool,
    task_count: usize,
) -> Result<(), ScheduleError> {
    validate_pool(pool).map_err(ScheduleError::InvalidInput)?;
    if pool.is_empty() && task_count > 0 {
        return Err(ScheduleError::EmptyResourcePool(task_count));
    }
    Ok(())
}

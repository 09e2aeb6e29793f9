//! Error types for scheduling operations.
//!
//! Only structural problems with the scheduling problem itself are errors.
//! Problems with a proposal are never errors: they are resolved by
//! substitution during normalization and repair.

use thiserror::Error;

use crate::models::TaskId;
use crate::validation::ValidationError;

/// Fatal conditions that prevent any schedule from being produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The dependency graph contains a cycle. Carries the ids that could not
    /// be placed in topological order.
    #[error("dependency cycle detected among tasks {0:?}")]
    CycleDetected(Vec<TaskId>),

    /// Tasks exist but there is nobody to assign them to.
    #[error("resource pool is empty but {0} task(s) need scheduling")]
    EmptyResourcePool(usize),

    /// Graph or pool failed structural validation.
    #[error("invalid scheduling input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScheduleError {
    /// Whether this error is a dependency cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected(_))
    }
}

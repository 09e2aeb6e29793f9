//! The two engine operations, end to end.
//!
//! - [`schedule`]: tasks + pool → baseline schedule and makespan.
//! - [`repair_and_evaluate`]: tasks + pool + raw proposal + baseline
//!   makespan → repaired schedule and metrics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EvaluationConfig;
use crate::error::ScheduleError;
use crate::models::{ResourcePool, Schedule, Task, TaskGraph};
use crate::proposal::ProposalNormalizer;
use crate::scheduler::{
    BaselineSchedule, BaselineScheduler, MetricsRecord, ScheduleEvaluator, ScheduleRepairer,
};

/// Where the repaired schedule's choices came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSource {
    /// At least one proposal entry was usable.
    Model,
    /// Nothing was salvaged; the schedule is a full repair.
    Fallback,
}

/// Result of [`repair_and_evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOutcome {
    /// Feasible schedule covering every task.
    pub repaired: Schedule,
    /// Quality of the proposal.
    pub metrics: MetricsRecord,
    /// Whether the proposal contributed anything.
    pub source: ProposalSource,
}

/// Builds the graph and computes the baseline schedule.
///
/// # Errors
/// `CycleDetected`, `InvalidInput`, or `EmptyResourcePool`.
pub fn schedule(tasks: &[Task], pool: &ResourcePool) -> Result<BaselineSchedule, ScheduleError> {
    let graph = TaskGraph::new(tasks.to_vec())?;
    BaselineScheduler::new().schedule(&graph, pool)
}

/// Normalizes, repairs and evaluates a raw proposal.
///
/// # Errors
/// Only for a problem that cannot be scheduled at all (cycle, invalid
/// input, empty pool). Proposal defects never produce errors.
pub fn repair_and_evaluate(
    tasks: &[Task],
    pool: &ResourcePool,
    raw: &Value,
    baseline_makespan: f64,
    config: &EvaluationConfig,
) -> Result<RepairOutcome, ScheduleError> {
    let graph = TaskGraph::new(tasks.to_vec())?;
    repair_and_evaluate_graph(&graph, pool, raw, baseline_makespan, config)
}

/// [`repair_and_evaluate`] over an already-built graph.
pub fn repair_and_evaluate_graph(
    graph: &TaskGraph,
    pool: &ResourcePool,
    raw: &Value,
    baseline_makespan: f64,
    config: &EvaluationConfig,
) -> Result<RepairOutcome, ScheduleError> {
    let proposal = ProposalNormalizer::new(graph, pool).normalize(raw);
    let source = if proposal.is_empty() {
        tracing::warn!("proposal contained no usable entries, repairing from scratch");
        ProposalSource::Fallback
    } else {
        ProposalSource::Model
    };

    let repaired = ScheduleRepairer::new().repair(graph, pool, &proposal)?;
    let metrics = ScheduleEvaluator::with_config(config.clone()).evaluate(
        graph,
        pool,
        &proposal,
        &repaired,
        baseline_makespan,
    );

    Ok(RepairOutcome {
        repaired,
        metrics,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_tasks() -> Vec<Task> {
        vec![
            Task::new(0).with_hours(3.0, 1.0),
            Task::new(1).with_hours(2.0, 1.0).with_dependency(0),
            Task::new(2).with_hours(4.0, 1.0),
        ]
    }

    fn two_members() -> ResourcePool {
        ResourcePool::new().with_resource("m0", 8.0).with_resource("m1", 8.0)
    }

    #[test]
    fn test_schedule_scenario() {
        let baseline = schedule(&scenario_tasks(), &two_members()).unwrap();
        assert_eq!(baseline.makespan, 7.0);
        assert_eq!(baseline.schedule.len(), 3);
    }

    #[test]
    fn test_schedule_cycle() {
        let tasks = vec![
            Task::new(0).with_hours(1.0, 0.0).with_dependency(1),
            Task::new(1).with_hours(1.0, 0.0).with_dependency(0),
        ];
        let err = schedule(&tasks, &two_members()).unwrap_err();
        assert!(err.is_cycle());
        let config = EvaluationConfig::new();
        let err =
            repair_and_evaluate(&tasks, &two_members(), &json!([]), 0.0, &config).unwrap_err();
        assert!(err.is_cycle());
    }

    #[test]
    fn test_repair_and_evaluate_bad_proposal() {
        let raw = json!({"sprint_backlog": [
            {"task_id": 0, "assignee": "m0", "start": 0, "duration": 4},
            {"task_id": 1, "assignee": "somebody", "start": 1, "duration": 3},
        ]});
        let config = EvaluationConfig::new();
        let out =
            repair_and_evaluate(&scenario_tasks(), &two_members(), &raw, 7.0, &config).unwrap();

        assert_eq!(out.source, ProposalSource::Model);
        assert_eq!(out.repaired.len(), 3);
        assert!(out.repaired.get(1).unwrap().start >= out.repaired.get(0).unwrap().finish);
        // Raw proposal starts task 1 at 1, before task 0 finishes at 4.
        assert_eq!(out.metrics.dependency_violations, 1);
        assert!(!out.metrics.feasible);
        assert!((out.metrics.task_coverage - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(out.metrics.makespan_ratio, Some(1.0));
    }

    #[test]
    fn test_unrecognized_proposal_falls_back() {
        let out = repair_and_evaluate(
            &scenario_tasks(),
            &two_members(),
            &json!("I'd rather not"),
            7.0,
            &EvaluationConfig::new(),
        )
        .unwrap();
        assert_eq!(out.source, ProposalSource::Fallback);
        assert_eq!(out.repaired.len(), 3);
        assert_eq!(out.metrics.task_coverage, 0.0);
    }

    #[test]
    fn test_outcome_serializes() {
        let config = EvaluationConfig::new();
        let raw = json!([]);
        let out =
            repair_and_evaluate(&scenario_tasks(), &two_members(), &raw, 7.0, &config).unwrap();
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["source"], "fallback");
        assert_eq!(v["repaired"]["2"]["task_id"], 2);
        assert_eq!(v["metrics"]["baseline_makespan"], 7.0);
    }

    #[test]
    fn test_huge_proposed_times_stay_finite() {
        let raw = json!({"sprint_backlog": [
            {"task_id": 0, "assignee": "m0", "start": 1.7e308, "duration": 1e308},
            {"task_id": 1, "assignee": "m0", "start": 1e308, "duration": 3},
        ]});
        let config = EvaluationConfig::new();
        let out =
            repair_and_evaluate(&scenario_tasks(), &two_members(), &raw, 7.0, &config).unwrap();

        assert!(out.repaired.entries().all(|e| e.start.is_finite() && e.finish.is_finite()));
        assert_eq!(out.metrics.model_makespan, 7.0);
        assert_eq!(out.metrics.makespan_ratio, Some(1.0));

        let text = serde_json::to_string(&out.repaired).unwrap();
        let back: Schedule = serde_json::from_str(&text).unwrap();
        assert_eq!(back, out.repaired);
    }
}

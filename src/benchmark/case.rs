//! Benchmark cases and per-case scoring.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::EvaluationConfig;
use crate::models::{ResourcePool, Schedule, Task, TaskGraph};
use crate::pipeline::{repair_and_evaluate_graph, ProposalSource};
use crate::proposal::extract_json;
use crate::scheduler::{BaselineScheduler, MetricsRecord};

/// Planning constraints sent to the generator along with a case.
pub const PROMPT_NOTES: &str = "All schedules must respect task dependencies: no task may start \
before its dependencies finish. Each team member cannot be assigned more hours than their daily \
capacity multiplied by the number of days spanned by the schedule. Combine do+verify into a \
single contiguous block.";

/// One scheduling problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkCase {
    /// Team members and their daily capacity, in tie-break order.
    pub team: ResourcePool,
    /// Backlog.
    pub tasks: Vec<Task>,
}

impl BenchmarkCase {
    /// Creates a case.
    pub fn new(team: ResourcePool, tasks: Vec<Task>) -> Self {
        Self { team, tasks }
    }

    /// JSON prompt payload: the case plus [`PROMPT_NOTES`].
    pub fn prompt(&self) -> String {
        json!({
            "team": self.team,
            "tasks": self.tasks,
            "notes": PROMPT_NOTES,
        })
        .to_string()
    }
}

/// Everything measured for one case.
///
/// When the case itself cannot be scheduled, `baseline_makespan` is
/// infinite, `error` says why, and the other fields are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Baseline makespan, `INFINITY` when unavailable.
    pub baseline_makespan: f64,
    /// Repaired schedule.
    pub repaired: Option<Schedule>,
    /// Proposal metrics.
    pub metrics: Option<MetricsRecord>,
    /// Whether the proposal contributed.
    pub source: Option<ProposalSource>,
    /// Why the case could not be scheduled.
    pub error: Option<String>,
}

impl CaseReport {
    fn failed(error: impl ToString) -> Self {
        Self {
            baseline_makespan: f64::INFINITY,
            repaired: None,
            metrics: None,
            source: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether the case was scored.
    pub fn is_evaluated(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Scores raw generator output for a case.
pub fn run_case_text(case: &BenchmarkCase, output: &str, config: &EvaluationConfig) -> CaseReport {
    run_case(case, &extract_json(output), config)
}

/// Scores a raw proposal for a case. Never fails: unschedulable cases are
/// reported through [`CaseReport::error`].
pub fn run_case(case: &BenchmarkCase, raw: &Value, config: &EvaluationConfig) -> CaseReport {
    let graph = match TaskGraph::new(case.tasks.clone()) {
        Ok(graph) => graph,
        Err(err) => {
            tracing::warn!(%err, "case cannot be scheduled");
            return CaseReport::failed(err);
        }
    };

    let baseline = match BaselineScheduler::new().schedule(&graph, &case.team) {
        Ok(baseline) => baseline,
        Err(err) => {
            tracing::warn!(%err, "baseline failed");
            return CaseReport::failed(err);
        }
    };

    match repair_and_evaluate_graph(&graph, &case.team, raw, baseline.makespan, config) {
        Ok(outcome) => {
            tracing::info!(
                baseline = baseline.makespan,
                model = outcome.metrics.model_makespan,
                feasible = outcome.metrics.feasible,
                source = ?outcome.source,
                "case evaluated"
            );
            CaseReport {
                baseline_makespan: baseline.makespan,
                repaired: Some(outcome.repaired),
                metrics: Some(outcome.metrics),
                source: Some(outcome.source),
                error: None,
            }
        }
        Err(err) => {
            let mut report = CaseReport::failed(err);
            report.baseline_makespan = baseline.makespan;
            report
        }
    }
}

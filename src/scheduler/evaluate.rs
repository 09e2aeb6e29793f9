//! Proposal quality metrics.
//!
//! Compares a proposal against the baseline, looking at the raw proposal
//! for internal consistency and at the repaired schedule for makespan and
//! utilization.
//!
//! # Metrics
//!
//! | Metric | Definition | Source |
//! |--------|-----------|--------|
//! | Task coverage | salvaged tasks / all tasks | raw proposal |
//! | Dependency violations | edges where `start(t) < finish(d)` | raw proposal |
//! | Model makespan | latest finish | repaired schedule |
//! | Makespan ratio | model / baseline | repaired schedule |
//! | Avg member utilization | mean capped utilization, in % | repaired schedule |
//! | Feasible | no violations, no double-booking, no member over capacity | raw proposal |
//!
//! Utilization of a member is `assigned_hours / ((makespan / hours_per_day)
//! * daily_capacity)`, capped at 1.0. The capacity check behind `feasible`
//! allows `daily_capacity` hours per calendar day the raw proposal spans.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EvaluationConfig;
use crate::models::{Resource, ResourcePool, Schedule, TaskGraph};
use crate::proposal::NormalizedProposal;

/// Comparative quality of one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Baseline makespan (hours).
    pub baseline_makespan: f64,
    /// Repaired schedule makespan (hours).
    pub model_makespan: f64,
    /// `model / baseline`; `None` when the baseline is zero or unavailable.
    pub makespan_ratio: Option<f64>,
    /// Dependency edges the raw proposal itself breaks.
    pub dependency_violations: usize,
    /// Fraction of tasks the raw proposal covered usefully (0..1).
    pub task_coverage: f64,
    /// Mean capped member utilization of the repaired schedule (0..100).
    pub avg_member_utilization: f64,
    /// Per-member capped utilization of the repaired schedule (0..1).
    pub utilization_by_member: BTreeMap<String, f64>,
    /// Whether the raw proposal was consistent and within capacity.
    pub feasible: bool,
}

/// Computes [`MetricsRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEvaluator {
    config: EvaluationConfig,
}

impl ScheduleEvaluator {
    /// Creates an evaluator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with explicit settings.
    pub fn with_config(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Evaluates a proposal.
    ///
    /// # Arguments
    /// * `proposal` - The normalized proposal, before repair.
    /// * `repaired` - The repaired schedule.
    /// * `baseline_makespan` - Reference makespan from the baseline.
    pub fn evaluate(
        &self,
        graph: &TaskGraph,
        pool: &ResourcePool,
        proposal: &NormalizedProposal,
        repaired: &Schedule,
        baseline_makespan: f64,
    ) -> MetricsRecord {
        let task_coverage = if graph.is_empty() {
            0.0
        } else {
            proposal.len() as f64 / graph.len() as f64
        };

        let dependency_violations = self.dependency_violations(graph, proposal);

        let model_makespan = repaired.makespan();
        let makespan_ratio = (baseline_makespan.is_finite() && baseline_makespan > 0.0)
            .then(|| model_makespan / baseline_makespan);

        let utilization_by_member: BTreeMap<String, f64> = pool
            .resources()
            .iter()
            .map(|r| {
                let u = self.utilization(repaired.assigned_hours(&r.id), model_makespan, r);
                (r.id.clone(), u)
            })
            .collect();
        let avg_member_utilization = if pool.is_empty() {
            0.0
        } else {
            utilization_by_member.values().sum::<f64>() / pool.len() as f64 * 100.0
        };

        let feasible = dependency_violations == 0
            && !self.raw_double_booked(pool, proposal)
            && self.raw_within_capacity(pool, proposal);

        MetricsRecord {
            baseline_makespan,
            model_makespan,
            makespan_ratio,
            dependency_violations,
            task_coverage,
            avg_member_utilization,
            utilization_by_member,
            feasible,
        }
    }

    /// Edges `(d, t)` where both ends have a proposed start and `t` starts
    /// before `d` finishes.
    fn dependency_violations(&self, graph: &TaskGraph, proposal: &NormalizedProposal) -> usize {
        graph
            .edges()
            .filter(|&(dep, task)| {
                let dep_finish = proposal.get(dep).and_then(|e| e.finish());
                let start = proposal.get(task).and_then(|e| e.start);
                match (dep_finish, start) {
                    (Some(finish), Some(start)) => start < finish - self.config.tolerance,
                    _ => false,
                }
            })
            .count()
    }

    /// Capped utilization over a horizon, 0 when nothing is available.
    fn utilization(&self, hours: f64, horizon: f64, member: &Resource) -> f64 {
        let available = horizon / self.config.hours_per_day * member.daily_capacity_hours;
        if available > 0.0 {
            (hours / available).min(1.0)
        } else {
            0.0
        }
    }

    /// Whether any member has two timed raw entries that overlap.
    fn raw_double_booked(&self, pool: &ResourcePool, proposal: &NormalizedProposal) -> bool {
        pool.ids().any(|id| {
            let mut spans: Vec<(f64, f64)> = proposal
                .iter()
                .filter(|(_, e)| e.assignee.as_deref() == Some(id))
                .filter_map(|(_, e)| Some((e.start?, e.finish()?)))
                .collect();
            spans.sort_by(|a, b| a.0.total_cmp(&b.0));
            let clash = spans
                .windows(2)
                .any(|w| w[1].0 < w[0].1 - self.config.tolerance);
            if clash {
                tracing::debug!(member = id, "proposal double-books member");
            }
            clash
        })
    }

    /// Whether no member carries more hours in the raw proposal than its
    /// daily capacity times the calendar days the proposal spans.
    fn raw_within_capacity(&self, pool: &ResourcePool, proposal: &NormalizedProposal) -> bool {
        let horizon = proposal
            .iter()
            .filter_map(|(_, e)| e.finish())
            .fold(0.0, f64::max);
        let days = (horizon / self.config.hours_per_day).ceil();

        pool.resources().iter().all(|r| {
            let hours: f64 = proposal
                .iter()
                .filter(|(_, e)| e.assignee.as_deref() == Some(r.id.as_str()))
                .map(|(_, e)| e.duration)
                .sum();
            let available = days * r.daily_capacity_hours;
            let ok = hours <= available + self.config.tolerance;
            if !ok {
                tracing::debug!(
                    member = %r.id,
                    hours,
                    available,
                    "proposal exceeds member capacity"
                );
            }
            ok
        })
    }
}

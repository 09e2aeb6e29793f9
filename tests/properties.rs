//! Property-based tests for scheduling and repair using proptest.
//!
//! Properties verified:
//! - Repair covers every task, respects dependencies, never overlaps work
//! - The baseline is deterministic
//! - Repairing an already repaired schedule changes nothing
//! - Cyclic inputs are rejected by both operations

use proptest::prelude::*;
use proptest::sample::Index;
use serde_json::{json, Value};
use sprint_repair::config::EvaluationConfig;
use sprint_repair::models::{ResourcePool, Schedule, Task, TaskGraph, TaskId};
use sprint_repair::proposal::ProposalNormalizer;
use sprint_repair::scheduler::ScheduleRepairer;
use sprint_repair::{repair_and_evaluate, schedule};

const EPS: f64 = 1e-9;

type TaskSpec = (u32, u32, Vec<Index>);
type EntrySpec = (Index, Option<Index>, Option<f64>, Option<f64>);

/// Acyclic backlogs: dependencies only point at lower ids.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((1u32..8, 0u32..4, prop::collection::vec(any::<Index>(), 0..3)), 1..12)
        .prop_map(|specs: Vec<TaskSpec>| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (do_hours, verify_hours, deps))| {
                    let id = i as TaskId;
                    let mut task =
                        Task::new(id).with_hours(f64::from(do_hours), f64::from(verify_hours));
                    if i > 0 {
                        let mut deps: Vec<TaskId> =
                            deps.iter().map(|d| d.index(i) as TaskId).collect();
                        deps.sort_unstable();
                        deps.dedup();
                        task.dependencies = deps;
                    }
                    task
                })
                .collect()
        })
}

fn arb_pool() -> impl Strategy<Value = ResourcePool> {
    prop::collection::vec(prop::sample::select(vec![4.0, 6.0, 8.0]), 1..4).prop_map(|caps| {
        caps.into_iter()
            .enumerate()
            .fold(ResourcePool::new(), |pool, (i, c)| pool.with_resource(format!("m{i}"), c))
    })
}

/// Partially broken flat proposals: unknown ids, unknown members, missing
/// or negative fields, overlaps.
fn arb_entries() -> impl Strategy<Value = Vec<EntrySpec>> {
    prop::collection::vec(
        (
            any::<Index>(),
            prop::option::of(any::<Index>()),
            prop::option::of(0.0f64..40.0),
            prop::option::of(-2.0f64..10.0),
        ),
        0..15,
    )
}

fn junk_proposal(tasks: &[Task], pool: &ResourcePool, entries: &[EntrySpec]) -> Value {
    let ids: Vec<String> = pool.ids().map(str::to_string).collect();
    let backlog: Vec<Value> = entries
        .iter()
        .map(|(task, member, start, duration)| {
            let mut entry = json!({"task_id": task.index(tasks.len() + 2)});
            if let Some(member) = member {
                // One slot past the pool is an unknown member.
                let name = ids
                    .get(member.index(ids.len() + 1))
                    .cloned()
                    .unwrap_or_else(|| "contractor".to_string());
                entry["assignee"] = json!(name);
            }
            if let Some(start) = start {
                entry["start"] = json!(start);
            }
            if let Some(duration) = duration {
                entry["duration"] = json!(duration);
            }
            entry
        })
        .collect();
    json!({"sprint_backlog": backlog})
}

/// Flat-shape rendering of a schedule, built from the stored floats.
fn as_proposal(schedule: &Schedule) -> Value {
    let backlog: Vec<Value> = schedule
        .entries()
        .map(|e| {
            json!({
                "task_id": e.task_id,
                "assignee": e.assignee,
                "start": e.start,
                "duration": e.duration,
            })
        })
        .collect();
    json!({"sprint_backlog": backlog})
}

fn assert_feasible(
    tasks: &[Task],
    pool: &ResourcePool,
    repaired: &Schedule,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(repaired.len(), tasks.len());
    for task in tasks {
        let entry = repaired.get(task.id);
        prop_assert!(entry.is_some(), "task {} missing", task.id);
        let Some(entry) = entry else { continue };
        prop_assert!(pool.contains(&entry.assignee));
        prop_assert!(entry.start >= 0.0);
        for &dep in &task.dependencies {
            let Some(dep_entry) = repaired.get(dep) else {
                return Err(TestCaseError::fail(format!("dependency {dep} missing")));
            };
            prop_assert!(
                dep_entry.finish <= entry.start + EPS,
                "task {} starts at {} before {} finishes at {}",
                task.id,
                entry.start,
                dep,
                dep_entry.finish
            );
        }
    }
    for id in pool.ids() {
        let entries = repaired.entries_for_resource(id);
        for pair in entries.windows(2) {
            prop_assert!(
                pair[0].finish <= pair[1].start + EPS,
                "tasks {} and {} overlap on {}",
                pair[0].task_id,
                pair[1].task_id,
                id
            );
        }
    }
    Ok(())
}

// ==========================================================================
// PROPERTY: Repair always yields a feasible, complete schedule
// ==========================================================================

proptest! {
    #[test]
    fn prop_repair_is_feasible(
        tasks in arb_tasks(),
        pool in arb_pool(),
        entries in arb_entries(),
    ) {
        let raw = junk_proposal(&tasks, &pool, &entries);
        let baseline = schedule(&tasks, &pool).unwrap();
        let config = EvaluationConfig::default();
        let outcome =
            repair_and_evaluate(&tasks, &pool, &raw, baseline.makespan, &config).unwrap();

        assert_feasible(&tasks, &pool, &outcome.repaired)?;
        let metrics = &outcome.metrics;
        prop_assert!((0.0..=1.0).contains(&metrics.task_coverage));
        prop_assert!((0.0..=100.0).contains(&metrics.avg_member_utilization));
        prop_assert!(metrics.makespan_ratio.is_some());
        if metrics.dependency_violations > 0 {
            prop_assert!(!metrics.feasible);
        }
    }

    #[test]
    fn prop_baseline_is_feasible(tasks in arb_tasks(), pool in arb_pool()) {
        let baseline = schedule(&tasks, &pool).unwrap();
        assert_feasible(&tasks, &pool, &baseline.schedule)?;
        prop_assert!((baseline.makespan - baseline.schedule.makespan()).abs() < EPS);
    }
}

// ==========================================================================
// PROPERTY: Determinism
// ==========================================================================

proptest! {
    #[test]
    fn prop_baseline_is_deterministic(tasks in arb_tasks(), pool in arb_pool()) {
        let a = schedule(&tasks, &pool).unwrap();
        let b = schedule(&tasks, &pool).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn prop_repair_is_idempotent(
        tasks in arb_tasks(),
        pool in arb_pool(),
        entries in arb_entries(),
    ) {
        let graph = TaskGraph::new(tasks.clone()).unwrap();
        let repairer = ScheduleRepairer::new();
        let normalizer = ProposalNormalizer::new(&graph, &pool);

        let raw = junk_proposal(&tasks, &pool, &entries);
        let first = repairer.repair(&graph, &pool, &normalizer.normalize(&raw)).unwrap();
        let second = repairer
            .repair(&graph, &pool, &normalizer.normalize(&as_proposal(&first)))
            .unwrap();
        prop_assert_eq!(first, second);
    }
}

// ==========================================================================
// PROPERTY: Cycles are rejected
// ==========================================================================

proptest! {
    #[test]
    fn prop_cycle_rejected(tasks in arb_tasks(), pool in arb_pool()) {
        prop_assume!(tasks.len() >= 2);
        let mut tasks = tasks;
        let last = tasks.len() as TaskId - 1;
        // Make the first task wait on the last one, then chain the rest.
        tasks[0].dependencies.push(last);
        for i in 1..tasks.len() {
            let prev = i as TaskId - 1;
            if !tasks[i].dependencies.contains(&prev) {
                tasks[i].dependencies.push(prev);
            }
        }

        prop_assert!(TaskGraph::new(tasks.clone()).unwrap_err().is_cycle());
        prop_assert!(schedule(&tasks, &pool).unwrap_err().is_cycle());
        let err = repair_and_evaluate(&tasks, &pool, &json!([]), 0.0, &EvaluationConfig::default())
            .unwrap_err();
        prop_assert!(err.is_cycle());
    }
}

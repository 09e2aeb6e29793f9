//! Seeded random benchmark cases.
//!
//! Dependencies only ever point at lower ids, so every generated case is
//! acyclic.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::case::BenchmarkCase;
use crate::config::GeneratorConfig;
use crate::models::{Resource, ResourcePool, Task, TaskId};

const DEFAULT_CAPACITY: f64 = 8.0;

/// Deterministic case generator: the same seed and configuration always
/// yield the same sequence of cases.
#[derive(Debug, Clone)]
pub struct CaseGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl CaseGenerator {
    /// Creates a generator.
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates the next case.
    pub fn generate(&mut self) -> BenchmarkCase {
        let team = self.team();
        let tasks = self.tasks();
        tracing::debug!(members = team.len(), tasks = tasks.len(), "generated case");
        BenchmarkCase::new(team, tasks)
    }

    /// Generates `count` cases.
    pub fn generate_many(&mut self, count: usize) -> Vec<BenchmarkCase> {
        (0..count).map(|_| self.generate()).collect()
    }

    fn team(&mut self) -> ResourcePool {
        let (min, max) = self.config.team_size;
        let size = self.rng.random_range(min.max(1)..=max.max(min).max(1));
        (0..size)
            .map(|i| {
                let capacity = self
                    .config
                    .capacity_choices
                    .choose(&mut self.rng)
                    .copied()
                    .filter(|c| c.is_finite() && *c > 0.0)
                    .unwrap_or(DEFAULT_CAPACITY);
                Resource::new(format!("member_{i}"), capacity)
            })
            .collect()
    }

    fn tasks(&mut self) -> Vec<Task> {
        let (min, max) = self.config.task_count;
        let count = self.rng.random_range(min..=max.max(min));
        let mut tasks: Vec<Task> = Vec::new();

        for t in 0..count {
            let id = tasks.len() as TaskId;
            let do_hours = self.hours(self.config.do_hours);
            let verify_hours = self.hours(self.config.verify_hours);
            let mut task = Task::new(id)
                .with_title(format!("Task_{t}"))
                .with_hours(do_hours, verify_hours);
            task.dependencies = self.dependencies(id);
            tasks.push(task);

            if self.config.max_subtasks > 0 && self.chance(self.config.subtask_probability) {
                let subtasks = self.rng.random_range(1..=self.config.max_subtasks);
                for s in 0..subtasks {
                    let sub_id = tasks.len() as TaskId;
                    let mut sub = Task::new(sub_id)
                        .with_title(format!("Task_{t}_sub{s}"))
                        .with_hours(halved(do_hours), halved(verify_hours))
                        .with_parent(id);
                    sub.dependencies = self.dependencies(sub_id);
                    tasks.push(sub);
                }
            }
        }
        tasks
    }

    fn hours(&mut self, (min, max): (u32, u32)) -> f64 {
        f64::from(self.rng.random_range(min..=max.max(min)))
    }

    /// Up to `max_dependencies` distinct lower ids, sorted.
    fn dependencies(&mut self, id: TaskId) -> Vec<TaskId> {
        if id == 0
            || self.config.max_dependencies == 0
            || !self.chance(self.config.dependency_probability)
        {
            return Vec::new();
        }
        let candidates: Vec<TaskId> = (0..id).collect();
        let limit = self.config.max_dependencies.min(candidates.len());
        let amount = self.rng.random_range(1..=limit);
        let mut deps: Vec<TaskId> = candidates
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect();
        deps.sort_unstable();
        deps
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }
}

fn halved(hours: f64) -> f64 {
    (hours / 2.0).floor().max(1.0)
}

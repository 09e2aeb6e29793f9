//! Normalization of untrusted schedule proposals.
//!
//! A proposal comes from an external generator and may be malformed,
//! partial, or reference tasks and members that do not exist. The
//! normalizer turns any JSON value into a [`NormalizedProposal`]: a partial
//! mapping from known task ids to whatever assignee, start and duration could
//! be salvaged. It never fails.
//!
//! # Rules
//!
//! | Field | Accepted when | Otherwise |
//! |-------|---------------|-----------|
//! | task id | integer naming a graph task | entry dropped |
//! | duration | positive number up to [`MAX_PROPOSED_HOURS`] | task's canonical duration |
//! | assignee | names a pool member (after sub-plan remapping) | unset |
//! | start | non-negative number up to [`MAX_PROPOSED_HOURS`] | unset |

mod extract;
mod fields;
mod shape;

pub use extract::extract_json;
pub use shape::{ProposalShape, FLAT_KEYS, NESTED_KEYS};

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{ResourcePool, TaskGraph, TaskId};

const TASK_ID_KEYS: [&str; 2] = ["task_id", "id"];
const ASSIGNEE_KEYS: [&str; 2] = ["assignee", "member"];
const START_KEYS: [&str; 1] = ["start"];
const DURATION_KEYS: [&str; 2] = ["duration", "hours"];

/// Largest proposed start or duration taken at face value. Keeps every
/// repaired time finite however large the proposed numbers are.
pub const MAX_PROPOSED_HOURS: f64 = 1.0e6;

/// What survived normalization for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedEntry {
    /// Canonical member key, if the proposal named a valid one.
    pub assignee: Option<String>,
    /// Proposed start (hours), if valid.
    pub start: Option<f64>,
    /// Proposed duration, or the task's canonical duration.
    pub duration: f64,
}

impl ProposedEntry {
    /// Proposed finish, when a start was given.
    pub fn finish(&self) -> Option<f64> {
        self.start.map(|s| s + self.duration)
    }
}

/// A partial, validated mapping `task_id → ProposedEntry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedProposal {
    entries: BTreeMap<TaskId, ProposedEntry>,
}

impl NormalizedProposal {
    /// Creates an empty proposal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any earlier one for the same task.
    pub fn insert(&mut self, task_id: TaskId, entry: ProposedEntry) {
        self.entries.insert(task_id, entry);
    }

    /// Entry for a task.
    pub fn get(&self, task_id: TaskId) -> Option<&ProposedEntry> {
        self.entries.get(&task_id)
    }

    /// Entries in ascending task id order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &ProposedEntry)> {
        self.entries.iter().map(|(&id, e)| (id, e))
    }

    /// Number of salvaged tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was salvaged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Local member name → canonical member key, declared by a sub-plan.
type MemberTable = HashMap<String, String>;

/// Decodes raw proposals against one graph and pool.
#[derive(Debug, Clone, Copy)]
pub struct ProposalNormalizer<'a> {
    graph: &'a TaskGraph,
    pool: &'a ResourcePool,
}

impl<'a> ProposalNormalizer<'a> {
    /// Creates a normalizer for a problem.
    pub fn new(graph: &'a TaskGraph, pool: &'a ResourcePool) -> Self {
        Self { graph, pool }
    }

    /// Normalizes generator output text (see [`extract_json`]).
    pub fn normalize_text(&self, text: &str) -> NormalizedProposal {
        self.normalize(&extract_json(text))
    }

    /// Normalizes a raw proposal value.
    pub fn normalize(&self, raw: &Value) -> NormalizedProposal {
        let shape = ProposalShape::detect(raw);
        let mut out = NormalizedProposal::new();

        match shape {
            ProposalShape::Flat(items) => {
                for item in items {
                    self.record(None, item, None, &mut out);
                }
            }
            ProposalShape::Nested(plans) => {
                for plan in plans {
                    self.sub_plan(plan, &mut out);
                }
            }
            ProposalShape::Keyed(map) => {
                for (key, item) in map {
                    self.record(fields::parse_task_id(key), item, None, &mut out);
                }
            }
            ProposalShape::Unrecognized => {
                tracing::warn!("unrecognized proposal shape, falling back to full repair");
            }
        }

        tracing::debug!(
            shape = shape.label(),
            salvaged = out.len(),
            tasks = self.graph.len(),
            "normalized proposal"
        );
        out
    }

    fn sub_plan(&self, plan: &Value, out: &mut NormalizedProposal) {
        let Some(plan) = plan.as_object() else {
            tracing::debug!("skipping non-object sub-plan");
            return;
        };
        let members = plan.get("members").map(member_table).unwrap_or_default();
        let Some(tasks) = plan.get("tasks").and_then(Value::as_array) else {
            tracing::debug!(
                plan = plan.get("name").and_then(fields::name).unwrap_or("?"),
                "sub-plan has no task list"
            );
            return;
        };
        for item in tasks {
            self.record(None, item, Some(&members), out);
        }
    }

    fn record(
        &self,
        key_id: Option<TaskId>,
        item: &Value,
        members: Option<&MemberTable>,
        out: &mut NormalizedProposal,
    ) {
        let Some(record) = item.as_object() else {
            tracing::debug!("dropping non-object proposal record");
            return;
        };
        let id = key_id.or_else(|| fields::field(record, &TASK_ID_KEYS).and_then(fields::task_id));
        let Some(task) = id.and_then(|id| self.graph.get(id)) else {
            tracing::debug!(task_id = ?id, "dropping record for unknown task");
            return;
        };

        let duration = fields::field(record, &DURATION_KEYS)
            .and_then(fields::positive)
            .filter(|d| *d <= MAX_PROPOSED_HOURS)
            .unwrap_or_else(|| task.duration());
        let start = fields::field(record, &START_KEYS)
            .and_then(fields::non_negative)
            .filter(|s| *s <= MAX_PROPOSED_HOURS);
        let assignee = self.assignee(record, members);

        out.insert(
            task.id,
            ProposedEntry {
                assignee,
                start,
                duration,
            },
        );
    }

    fn assignee(
        &self,
        record: &Map<String, Value>,
        members: Option<&MemberTable>,
    ) -> Option<String> {
        let name = fields::field(record, &ASSIGNEE_KEYS).and_then(fields::name)?;
        let canonical = members
            .and_then(|table| table.get(name))
            .map(String::as_str)
            .unwrap_or(name);
        if self.pool.contains(canonical) {
            Some(canonical.to_string())
        } else {
            tracing::debug!(assignee = name, "ignoring unknown assignee");
            None
        }
    }
}

/// Reads a sub-plan member table: `{local: canonical}` or
/// `[{name, member}, ...]`.
fn member_table(value: &Value) -> MemberTable {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(local, canonical)| {
                Some((local.trim().to_string(), fields::name(canonical)?.to_string()))
            })
            .collect(),
        Value::Array(rows) => rows
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|row| {
                let local = fields::field(row, &["name", "alias"]).and_then(fields::name)?;
                let canonical = fields::field(row, &["member", "key"]).and_then(fields::name)?;
                Some((local.to_string(), canonical.to_string()))
            })
            .collect(),
        _ => MemberTable::new(),
    }
}

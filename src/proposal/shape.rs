//! Proposal shape detection.
//!
//! Generators disagree on how to lay out "the same" schedule. Detection
//! probes for characteristic top-level keys and picks one of a closed set of
//! shapes. Anything that matches none of them is [`ProposalShape::Unrecognized`].

use serde_json::{Map, Value};

use super::fields;

/// Top-level keys holding a flat list of records, probed in order.
pub const FLAT_KEYS: [&str; 3] = ["sprint_backlog", "backlog", "schedule"];

/// Top-level keys holding a list of sub-plans, probed in order.
pub const NESTED_KEYS: [&str; 2] = ["sprints", "plans"];

/// A recognized proposal layout, borrowing from the raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProposalShape<'a> {
    /// `[{task_id, assignee, start, duration}, ...]`, bare or under one of
    /// [`FLAT_KEYS`].
    Flat(&'a [Value]),
    /// Sub-plans under one of [`NESTED_KEYS`], each with `tasks` and an
    /// optional local `members` table.
    Nested(&'a [Value]),
    /// `{"<task_id>": {assignee, start, duration}, ...}`, the serialized form
    /// of a [`Schedule`](crate::models::Schedule).
    Keyed(&'a Map<String, Value>),
    /// Nothing usable.
    Unrecognized,
}

impl<'a> ProposalShape<'a> {
    /// Probes `raw` for a known shape.
    pub fn detect(raw: &'a Value) -> Self {
        match raw {
            Value::Array(items) => Self::Flat(items),
            Value::Object(map) => {
                if let Some(items) = first_array(map, &FLAT_KEYS) {
                    Self::Flat(items)
                } else if let Some(plans) = first_array(map, &NESTED_KEYS) {
                    Self::Nested(plans)
                } else if is_keyed(map) {
                    Self::Keyed(map)
                } else {
                    Self::Unrecognized
                }
            }
            _ => Self::Unrecognized,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Nested(_) => "nested",
            Self::Keyed(_) => "keyed",
            Self::Unrecognized => "unrecognized",
        }
    }
}

fn first_array<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn is_keyed(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .iter()
            .all(|(k, v)| fields::parse_task_id(k).is_some() && v.is_object())
}

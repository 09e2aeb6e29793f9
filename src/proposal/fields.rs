//! Field validators for untrusted proposal records.
//!
//! Each validator returns `None` when the value cannot be used; callers pick
//! the fallback.

use serde_json::{Map, Value};

use crate::models::TaskId;

/// First present value among `keys`.
pub(crate) fn field<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| record.get(*k).filter(|v| !v.is_null()))
}

/// Finite number from a JSON number or numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Strictly positive finite number.
pub(crate) fn positive(value: &Value) -> Option<f64> {
    number(value).filter(|n| *n > 0.0)
}

/// Non-negative finite number.
pub(crate) fn non_negative(value: &Value) -> Option<f64> {
    number(value).filter(|n| *n >= 0.0)
}

/// Integer task id from a JSON integer, an integral float or a numeric
/// string.
pub(crate) fn task_id(value: &Value) -> Option<TaskId> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as TaskId)
        }),
        Value::String(s) => parse_task_id(s),
        _ => None,
    }
}

/// Integer task id from text, such as a map key.
pub(crate) fn parse_task_id(s: &str) -> Option<TaskId> {
    s.trim().parse::<TaskId>().ok()
}

/// Non-empty trimmed string.
pub(crate) fn name(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

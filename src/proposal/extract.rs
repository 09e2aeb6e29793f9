//! Recovery of a JSON document from free-form generator output.
//!
//! Text generators often wrap their JSON in prose, reasoning traces or code
//! fences. Extraction tries the whole text first, then the widest
//! `{ ... }` span. Anything else yields `Value::Null`, which normalizes to
//! an empty proposal.

use serde_json::Value;

/// Extracts a JSON value from generator output.
pub fn extract_json(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    if let Ok(value) = serde_json::from_str(text) {
        return value;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if close > open => {
            serde_json::from_str(&text[open..=close]).unwrap_or_else(|err| {
                tracing::debug!(%err, "no parseable JSON object in generator output");
                Value::Null
            })
        }
        _ => Value::Null,
    }
}

//! Stock rule kinds.

mod callback;
mod compare;
mod length;
mod pattern;
mod presence;

pub use callback::Callback;
pub use compare::{Compare, Operator};
pub use length::Length;
pub use pattern::Pattern;
pub use presence::{Empty, Nonempty, Required};

use serde_json::Value;

/// Number of non-empty items in a value.
///
/// Scalars count as one item when non-empty; `Null` and the empty string
/// count as zero; arrays and objects count their items recursively.
/// Numbers and booleans are never empty, so `0` and `false` each count.
pub(crate) fn nonempty_count(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::String(s) => u64::from(!s.is_empty()),
        Value::Bool(_) | Value::Number(_) => 1,
        Value::Array(items) => items.iter().map(nonempty_count).sum(),
        Value::Object(map) => map.values().map(nonempty_count).sum(),
    }
}

/// Length of a value: characters for strings, items for arrays and
/// objects. `None` for values without a length.
pub(crate) fn value_len(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => Some(s.chars().count() as u64),
        Value::Array(items) => Some(items.len() as u64),
        Value::Object(map) => Some(map.len() as u64),
        _ => None,
    }
}

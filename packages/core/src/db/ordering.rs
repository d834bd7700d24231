//! Sort keys and the total order used for query results
//!
//! Stores sort `find_where` results by the requested keys and then by record
//! identity, so every result list has a stable, total order even when the
//! order field ties or is missing.

use crate::behaviors::TreeNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// One ascending `ORDER BY` term of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
}

impl SortKey {
    /// Sort by `field`, smallest value first
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Rank of a JSON value's type: missing/null < bool < number < string < array < object
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Compare two field values
///
/// Values of different types order by type rank. Arrays and objects compare
/// equal to each other of the same type and are left to the identity tie-break.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compare two records by `keys`, then by identity ascending
pub fn compare_records<R: TreeNode>(a: &R, b: &R, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_values(a.field(&key.field), b.field(&key.field));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id().cmp(b.id())
}

/// Sort records in place by `keys` with the identity tie-break
pub fn sort_records<R: TreeNode>(records: &mut [R], keys: &[SortKey]) {
    records.sort_by(|a, b| compare_records(a, b, keys));
}

/// Whether a field value satisfies an equality condition
///
/// A `null` condition also matches a missing field.
pub fn field_matches(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual, expected) {
        (None, Value::Null) => true,
        (None, _) => false,
        (Some(actual), expected) => actual == expected,
    }
}

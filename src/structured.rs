//! First tier of AP resolution: figures already recorded in the stats store

use crate::month::MonthKey;
use crate::store::{coerce_int, StatsStore};
use serde_json::Value;

/// Look up the AP spent in `month`.
///
/// A precomputed `YYYY-MM-akashi-ap` value always wins, even when it is zero or
/// not a number (which reads as zero). Otherwise a non-empty
/// `YYYY-MM-akashi-ap-entries` list is summed. `None` means the store has
/// nothing to say and the next tier should be tried.
pub fn lookup_ap(store: &StatsStore, month: &MonthKey) -> Option<i64> {
    if let Some(value) = store.get(&month.akashi_ap_key()) {
        return Some(coerce_int(value).unwrap_or(0));
    }

    match store.get(&month.akashi_ap_entries_key()) {
        Some(Value::Array(entries)) if !entries.is_empty() => Some(sum_entries(entries)),
        _ => None,
    }
}

/// Sum itemized entries: bare numbers or objects carrying an `amount` field.
/// Entries that do not coerce to an integer are skipped.
pub fn sum_entries(entries: &[Value]) -> i64 {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(fields) => fields.get("amount").map_or(Some(0), coerce_int),
            other => coerce_int(other),
        })
        .fold(0i64, i64::saturating_add)
}

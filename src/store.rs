//! Read-only access to the monthly stats JSON document
//!
//! The document is written by the automation process and may be missing,
//! half-written or of the wrong shape when we read it. Loading never fails:
//! anything unusable is an empty store.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Top-level mapping of the stats document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatsStore {
    entries: Map<String, Value>,
}

impl StatsStore {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Best-effort load: missing, unreadable or malformed files yield an empty store
    pub fn load(path: &Path) -> Self {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Stats file not found");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read stats file");
                return Self::default();
            }
        };

        Self::from_slice(&bytes).unwrap_or_else(|| {
            warn!(path = %path.display(), "Stats file is not a JSON object, ignoring");
            Self::default()
        })
    }

    /// Parse a JSON document. `null` counts as an empty store; other non-object
    /// documents and invalid JSON give `None`.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(entries)) => Some(Self { entries }),
            Ok(Value::Null) => Some(Self::default()),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Invalid stats JSON");
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Integer stored under `key`, or 0 when missing or not coercible
    pub fn int_or_zero(&self, key: &str) -> i64 {
        self.get(key).and_then(coerce_int).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

/// Lenient integer conversion for values written by a dynamically typed producer.
///
/// Integers pass through, floats truncate toward zero, booleans are 0/1 and
/// strings are trimmed then parsed as a signed decimal integer.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

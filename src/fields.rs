//! Field-value sentinels and write payloads.
//!
//! A write payload mixes plain values with *sentinel instructions* that are
//! resolved against the current stored document just before the write hits
//! disk. The sentinel itself is never persisted; what lands in the file is
//! always the resolved plain value.
//!
//! Keys in a payload may be dotted (`"profile.age"`), addressing nested
//! objects. Intermediate objects are created as needed; a non-object
//! intermediate is replaced.

use crate::error::{Result, StoreError};
use crate::model::DocumentData;
use crate::query::value::loosely_equal;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A value position in a write payload: either a literal value or an
/// instruction resolved server-side at write time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Stored as-is.
    Value(Value),
    /// Resolves to the time of the write.
    WriteTimestamp,
    /// Resolves to the existing array (empty if the field is absent) with
    /// the payload value appended.
    ArrayUnion(Value),
    /// Resolves to the existing array minus every element equal to the
    /// payload value. On an absent field the instruction is a no-op.
    ArrayRemove(Value),
}

impl FieldValue {
    pub fn array_union(value: impl Into<Value>) -> Self {
        FieldValue::ArrayUnion(value.into())
    }

    pub fn array_remove(value: impl Into<Value>) -> Self {
        FieldValue::ArrayRemove(value.into())
    }

    /// Resolve against the current stored value of `field`.
    ///
    /// Returns `None` when the instruction results in no write at all
    /// (array-remove on an absent field).
    fn resolve(
        self,
        field: &str,
        existing: Option<&Value>,
        now: DateTime<Utc>,
    ) -> Result<Option<Value>> {
        match self {
            FieldValue::Value(v) => Ok(Some(v)),
            FieldValue::WriteTimestamp => Ok(Some(Value::String(now.to_rfc3339()))),
            FieldValue::ArrayUnion(v) => {
                let mut items = match existing {
                    None => Vec::new(),
                    Some(Value::Array(items)) => items.clone(),
                    Some(_) => return Err(StoreError::TypeMismatch(field.to_string())),
                };
                items.push(v);
                Ok(Some(Value::Array(items)))
            }
            FieldValue::ArrayRemove(v) => match existing {
                None => Ok(None),
                Some(Value::Array(items)) => {
                    let kept: Vec<Value> = items
                        .iter()
                        .filter(|item| !loosely_equal(item, &v))
                        .cloned()
                        .collect();
                    Ok(Some(Value::Array(kept)))
                }
                Some(_) => Err(StoreError::TypeMismatch(field.to_string())),
            },
        }
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Value(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Value(Value::from(v))
    }
}

/// An ordered write payload: `(dotted field, value-or-sentinel)` pairs.
#[derive(Debug, Clone, Default)]
pub struct WriteData {
    entries: Vec<(String, FieldValue)>,
}

impl WriteData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Consuming builder, so payloads read as a chain:
    ///
    /// ```
    /// use scatterdb::fields::{FieldValue, WriteData};
    ///
    /// let payload = WriteData::new()
    ///     .field("name", "Ada")
    ///     .field("joined", FieldValue::WriteTimestamp)
    ///     .field("tags", FieldValue::array_union("admin"));
    /// ```
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry against `current`, producing the plain values to
    /// write. Entries that resolve to no value are dropped.
    pub(crate) fn resolve_against(
        self,
        current: Option<&DocumentData>,
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, Value)>> {
        let mut resolved = Vec::with_capacity(self.entries.len());
        for (key, value) in self.entries {
            let existing = current.and_then(|data| get_path(data, &key));
            if let Some(plain) = value.resolve(&key, existing, now)? {
                resolved.push((key, plain));
            }
        }
        Ok(resolved)
    }
}

impl From<DocumentData> for WriteData {
    fn from(data: DocumentData) -> Self {
        Self {
            entries: data
                .into_iter()
                .map(|(k, v)| (k, FieldValue::Value(v)))
                .collect(),
        }
    }
}

impl FromIterator<(String, FieldValue)> for WriteData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Look up a dotted key in a field mapping.
pub(crate) fn get_path<'a>(data: &'a DocumentData, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = data.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Assign a dotted key in a field mapping, creating intermediate objects.
pub(crate) fn set_path(data: &mut DocumentData, key: &str, value: Value) {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().unwrap_or(key);

    let mut current = data;
    for part in parts {
        let slot = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(serde_json::Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => return,
        };
    }
    current.insert(leaf.to_string(), value);
}

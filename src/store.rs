//! Shared config store
//!
//! Holds the one live `ConfigSnapshot` of a host. Every write produces a new
//! snapshot; older snapshots handed out by `read` are never touched.

#![allow(dead_code)] // Embedder API; the CLI only drives part of it

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A single `(field, value)` edit emitted by a cell
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub value: Value,
}

impl FieldChange {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// An immutable version of the cell configuration
///
/// Cloning is cheap: all clones share the same map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigSnapshot {
    fields: Arc<IndexMap<String, Value>>,
}

impl ConfigSnapshot {
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields: Arc::new(fields) }
    }

    /// The built-in seed used when the embedder supplies no config
    pub fn seed() -> Self {
        Self::new(IndexMap::from([
            ("title".to_string(), Value::from("Dummy Title")),
            (
                "description".to_string(),
                Value::from("Some default text from CellSelector"),
            ),
        ]))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of a field, or "" when missing or not a string
    pub fn get_str(&self, field: &str) -> &str {
        self.get(field).and_then(|v| v.as_str()).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pretty JSON for the debug view
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&*self.fields).unwrap_or_else(|_| "{}".to_string())
    }

    fn with_field(&self, field: &str, value: Value) -> Self {
        let mut fields = (*self.fields).clone();
        fields.insert(field.to_string(), value);
        Self::new(fields)
    }
}

impl From<IndexMap<String, Value>> for ConfigSnapshot {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Owner of the live snapshot
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    current: ConfigSnapshot,
    revision: u64,
}

impl ConfigStore {
    pub fn new(initial: ConfigSnapshot) -> Self {
        Self {
            current: initial,
            revision: 0,
        }
    }

    /// Current snapshot
    pub fn read(&self) -> ConfigSnapshot {
        self.current.clone()
    }

    /// Merge one field into a new snapshot and make it current
    ///
    /// Never fails and performs no type checking against the previous value.
    pub fn write(&mut self, field: &str, value: Value) -> ConfigSnapshot {
        log::debug!("Config write: {} = {}", field, value);
        self.current = self.current.with_field(field, value);
        self.revision += 1;
        self.read()
    }

    /// Merge a batch of changes in order
    pub fn apply<I>(&mut self, changes: I) -> ConfigSnapshot
    where
        I: IntoIterator<Item = FieldChange>,
    {
        for change in changes {
            self.write(&change.field, change.value);
        }
        self.read()
    }

    /// Number of writes since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

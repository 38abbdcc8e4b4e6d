//! Cell capability contract
//!
//! A cell is one interchangeable implementation the host can display. It
//! gets a read-only view of the shared config and reports edits back as
//! `FieldChange` messages; it never mutates the config itself.

use indexmap::IndexMap;
use serde_json::Value;

pub mod example;

pub use crate::store::FieldChange;
use crate::store::ConfigSnapshot;
use crate::view::CellView;

pub use example::ExampleCell;

/// Inputs handed to a cell on every call
#[derive(Debug, Clone, Copy)]
pub struct CellProps<'a> {
    /// Current config snapshot
    pub config: &'a ConfigSnapshot,
    /// Identifiers of other cells in a larger composition
    pub peers: &'a [String],
    /// Data of those other cells, keyed by identifier
    pub peer_index: &'a IndexMap<String, Value>,
}

/// A user edit aimed at one of the cell's input widgets
#[derive(Debug, Clone, PartialEq)]
pub struct CellInput {
    pub name: String,
    pub value: Value,
}

impl CellInput {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A pluggable cell implementation
pub trait Cell: Send + Sync {
    /// Short human-readable summary for listings
    fn description(&self) -> &str {
        ""
    }

    /// Called once per host the first time this cell is resolved
    fn on_activate(&self, _config: &ConfigSnapshot) {}

    /// Render the cell's form from the current props
    fn render(&self, props: &CellProps<'_>) -> CellView;

    /// Interpret an edit and report any resulting config changes
    ///
    /// `on_change` may be called any number of times, including zero.
    fn handle_input(&self, props: &CellProps<'_>, input: &CellInput, on_change: &mut dyn FnMut(FieldChange));
}

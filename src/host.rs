//! Host / compositor
//!
//! Wires the registry, the selection and the config store together. Each
//! call to `render` resolves the selected cell and produces either the cell
//! view or an error view naming the unresolved identifier.

#![allow(dead_code)] // Embedder API; the CLI only drives part of it

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cell::{Cell, CellInput, CellProps};
use crate::error::UnresolvedSelection;
use crate::registry::CellRegistry;
use crate::selection::{Selection, SelectionState};
use crate::store::{ConfigSnapshot, ConfigStore};
use crate::view::{HostView, SelectorView};

const HOST_TITLE: &str = "Cell Selector";
const SELECTOR_LABEL: &str = "Select Cell Type:";

/// Construction inputs for a `Host`
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Identifier to start on (defaults to the first registry key)
    pub initial_selection: Option<String>,
    /// Starting config (defaults to `ConfigSnapshot::seed`)
    pub initial_config: Option<ConfigSnapshot>,
    /// Identifiers of other cells, passed through to the active cell
    pub peers: Vec<String>,
    /// Data of other cells, passed through to the active cell
    pub peer_index: IndexMap<String, Value>,
}

impl HostOptions {
    pub fn with_selection(mut self, id: impl Into<String>) -> Self {
        self.initial_selection = Some(id.into());
        self
    }

    pub fn with_config(mut self, config: impl Into<ConfigSnapshot>) -> Self {
        self.initial_config = Some(config.into());
        self
    }

    pub fn with_peers(mut self, peers: Vec<String>, peer_index: IndexMap<String, Value>) -> Self {
        self.peers = peers;
        self.peer_index = peer_index;
        self
    }
}

/// User interaction delivered to the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A different identifier was picked in the selector
    Select(String),
    /// An edit inside the active cell
    Input(CellInput),
}

/// Whether the next render shows a cell or the error view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Normal,
    Error,
}

pub struct Host<'r> {
    registry: &'r CellRegistry,
    selection: Selection,
    store: ConfigStore,
    peers: Vec<String>,
    peer_index: IndexMap<String, Value>,
    activated: HashSet<String>,
}

impl<'r> Host<'r> {
    pub fn new(registry: &'r CellRegistry, options: HostOptions) -> Self {
        let selection = Selection::initial(registry, options.initial_selection.as_deref());
        let store = ConfigStore::new(options.initial_config.unwrap_or_else(ConfigSnapshot::seed));

        log::info!(
            "Host created with {} cell type(s), selected '{}'",
            registry.len(),
            selection.current()
        );

        Self {
            registry,
            selection,
            store,
            peers: options.peers,
            peer_index: options.peer_index,
            activated: HashSet::new(),
        }
    }

    pub fn current_identifier(&self) -> &str {
        self.selection.current()
    }

    pub fn state(&self) -> SelectionState<'_> {
        self.selection.state(self.registry)
    }

    pub fn mode(&self) -> RenderMode {
        if self.state().is_valid() {
            RenderMode::Normal
        } else {
            RenderMode::Error
        }
    }

    /// Current config snapshot
    pub fn config(&self) -> ConfigSnapshot {
        self.store.read()
    }

    /// Number of config writes so far
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Resolve the selected identifier against the registry
    pub fn resolve_active(&self) -> Result<&'r Arc<dyn Cell>, UnresolvedSelection> {
        let registry = self.registry;
        registry
            .resolve(self.selection.current())
            .ok_or_else(|| UnresolvedSelection::new(self.selection.current()))
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selection.select(id);
    }

    /// Merge one field into the config; the callback every cell edit ends in
    pub fn write(&mut self, field: &str, value: Value) -> ConfigSnapshot {
        self.store.write(field, value)
    }

    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Select(id) => self.select(id),
            HostEvent::Input(input) => self.handle_input(&input),
        }
    }

    /// Produce the view for the current selection and config
    pub fn render(&mut self) -> HostView {
        let cell = match self.resolve_active() {
            Ok(cell) => cell,
            Err(e) => {
                log::warn!("Rendering error view: {}", e);
                return HostView::Error {
                    message: e.to_string(),
                    identifier: e.identifier,
                };
            }
        };

        self.activate(cell);

        let config = self.store.read();
        let props = CellProps {
            config: &config,
            peers: &self.peers,
            peer_index: &self.peer_index,
        };
        let cell_view = cell.render(&props);

        HostView::Cell {
            title: HOST_TITLE.to_string(),
            selector: SelectorView {
                label: SELECTOR_LABEL.to_string(),
                options: self.registry.identifiers().map(str::to_string).collect(),
                selected: self.selection.current().to_string(),
            },
            config,
            cell: cell_view,
        }
    }

    fn handle_input(&mut self, input: &CellInput) {
        let cell = match self.resolve_active() {
            Ok(cell) => cell,
            Err(e) => {
                log::warn!("Dropping input for '{}': {}", input.name, e);
                return;
            }
        };

        self.activate(cell);

        let config = self.store.read();
        let props = CellProps {
            config: &config,
            peers: &self.peers,
            peer_index: &self.peer_index,
        };

        let mut changes = Vec::new();
        cell.handle_input(&props, input, &mut |change| changes.push(change));

        self.store.apply(changes);
    }

    /// Run the cell's activation hook the first time it is resolved
    fn activate(&mut self, cell: &Arc<dyn Cell>) {
        let id = self.selection.current();
        if self.activated.contains(id) {
            return;
        }

        log::info!("Activating cell '{}'", id);
        self.activated.insert(id.to_string());
        cell.on_activate(&self.store.read());
    }
}

//! Cell registry
//!
//! An ordered, read-only catalog of cell implementations keyed by type
//! identifier. Built once by the embedding application, then only read.

#![allow(dead_code)] // Embedder API; the CLI only drives part of it

use eyre::Result;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::cell::{Cell, ExampleCell};

/// Registry of cell implementations
#[derive(Clone)]
pub struct CellRegistry {
    cells: IndexMap<String, Arc<dyn Cell>>,
}

impl CellRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry with no entries
    pub fn empty() -> Self {
        Self { cells: IndexMap::new() }
    }

    /// Look up the implementation for a type identifier
    pub fn resolve(&self, id: &str) -> Option<&Arc<dyn Cell>> {
        self.cells.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cells.contains_key(id)
    }

    /// Identifiers in presentation order
    ///
    /// The iterator is `Clone`, so it can be restarted and yields the same
    /// order every time.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + Clone + ExactSizeIterator {
        self.cells.keys().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.identifiers().next()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Identifier/implementation pairs in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Cell>)> {
        self.cells.iter().map(|(id, cell)| (id.as_str(), cell))
    }

    /// Search for cells whose identifier or description matches a query
    pub fn search(&self, query: &str) -> Vec<(&str, &Arc<dyn Cell>)> {
        let query_lower = query.to_lowercase();
        self.iter()
            .filter(|(id, cell)| {
                id.to_lowercase().contains(&query_lower) || cell.description().to_lowercase().contains(&query_lower)
            })
            .collect()
    }
}

impl Default for CellRegistry {
    /// The single built-in `example` entry
    fn default() -> Self {
        Self {
            cells: IndexMap::from([("example".to_string(), Arc::new(ExampleCell::new()) as Arc<dyn Cell>)]),
        }
    }
}

impl fmt::Debug for CellRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRegistry")
            .field("identifiers", &self.identifiers().collect::<Vec<_>>())
            .finish()
    }
}

/// One-shot population of a `CellRegistry`
#[derive(Default)]
pub struct RegistryBuilder {
    cells: IndexMap<String, Arc<dyn Cell>>,
}

impl RegistryBuilder {
    /// Add a cell under an identifier
    pub fn register<C>(self, id: impl Into<String>, cell: C) -> Result<Self>
    where
        C: Cell + 'static,
    {
        self.register_arc(id, Arc::new(cell))
    }

    /// Add an already shared cell under an identifier
    pub fn register_arc(mut self, id: impl Into<String>, cell: Arc<dyn Cell>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            eyre::bail!("Cell type identifier must not be empty");
        }
        if self.cells.contains_key(&id) {
            eyre::bail!("Cell type '{}' is already registered", id);
        }
        self.cells.insert(id, cell);
        Ok(self)
    }

    pub fn build(self) -> CellRegistry {
        CellRegistry { cells: self.cells }
    }
}

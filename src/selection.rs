//! Selection state machine
//!
//! Tracks the chosen cell type identifier. `select` never rejects an
//! identifier; whether it is valid is decided against the registry each time
//! the state is read.

#![allow(dead_code)] // Embedder API; the CLI only drives part of it

use crate::registry::CellRegistry;

/// Validity of the current selection against a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState<'a> {
    Valid(&'a str),
    Invalid(&'a str),
}

impl<'a> SelectionState<'a> {
    pub fn identifier(&self) -> &'a str {
        match self {
            SelectionState::Valid(id) | SelectionState::Invalid(id) => id,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SelectionState::Valid(_))
    }
}

/// The currently chosen cell type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    current: String,
}

impl Selection {
    /// Pick the starting identifier
    ///
    /// A non-empty requested identifier is kept as given, even if the
    /// registry has no such entry. Otherwise the first registry key is used,
    /// and an empty registry yields the empty identifier.
    pub fn initial(registry: &CellRegistry, requested: Option<&str>) -> Self {
        let current = match requested {
            Some(id) if !id.is_empty() => id,
            _ => registry.first().unwrap_or(""),
        };
        Self {
            current: current.to_string(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Switch to another identifier, known or not
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id != self.current {
            log::debug!("Selection: '{}' -> '{}'", self.current, id);
        }
        self.current = id;
    }

    pub fn state<'a>(&'a self, registry: &CellRegistry) -> SelectionState<'a> {
        if registry.contains(&self.current) {
            SelectionState::Valid(&self.current)
        } else {
            SelectionState::Invalid(&self.current)
        }
    }
}

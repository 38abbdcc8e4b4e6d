use thiserror::Error;

/// The selected identifier has no registry entry
///
/// The host renders this as an error view; it is never returned as a
/// failure from a render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No valid cell type found for \"{identifier}\".")]
pub struct UnresolvedSelection {
    pub identifier: String,
}

impl UnresolvedSelection {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

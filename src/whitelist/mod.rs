pub mod loader;

use std::sync::{Arc, PoisonError, RwLock};

pub use loader::{load_whitelist, spawn_loader, LoadSummary};

/// A partner merchant domain fragment, e.g. `amazon.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    value: String,
}

impl Concept {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Append-only list of partner domain fragments shared by the loader and the
/// matcher. Cloning shares the same underlying list.
///
/// Readers may observe any prefix of what the loader eventually appends.
#[derive(Debug, Clone, Default)]
pub struct WhitelistCache {
    concepts: Arc<RwLock<Vec<Concept>>>,
}

impl WhitelistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, concepts: impl IntoIterator<Item = Concept>) -> usize {
        let mut guard = self.concepts.write().unwrap_or_else(PoisonError::into_inner);
        guard.extend(concepts);
        guard.len()
    }

    pub fn snapshot(&self) -> Vec<Concept> {
        self.concepts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.concepts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First concept, in insertion order, whose value occurs anywhere in `text`.
    pub fn first_contained_in(&self, text: &str) -> Option<Concept> {
        self.concepts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|concept| text.contains(concept.value()))
            .cloned()
    }
}

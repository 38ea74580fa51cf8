use std::collections::HashSet;

use crate::types::EventId;

/// Identifiers already delivered during this process lifetime.
///
/// Growth-only: nothing is ever removed, and the set is not persisted.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    ids: HashSet<EventId>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, id: EventId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

use std::collections::{hash_set::Iter, HashSet};

use tilemark_shared::ChunkKey;

/// Chunks whose contents changed since the last sync pass
#[derive(Default)]
pub struct DirtyChunks {
    set: HashSet<ChunkKey>,
}

impl DirtyChunks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marking a chunk twice in a tick is the same as marking it once
    pub fn mark(&mut self, key: ChunkKey) {
        self.set.insert(key);
    }

    pub fn is_dirty(&self, key: &ChunkKey) -> bool {
        self.set.contains(key)
    }

    pub fn iter(&self) -> Iter<'_, ChunkKey> {
        self.set.iter()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns every dirty chunk and clears the set. Call only once every
    /// session has been synced for the tick.
    pub fn drain(&mut self) -> HashSet<ChunkKey> {
        std::mem::take(&mut self.set)
    }
}

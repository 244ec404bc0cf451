use std::collections::{hash_map, HashMap, HashSet};

use tilemark_shared::ChunkKey;

use crate::{Viewer, ViewerKey};

// SessionKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct SessionKey(u64);

impl SessionKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

// Session
/// Per-connection sync state. Lives exactly as long as the connection.
pub(crate) struct Session {
    viewers: HashMap<ViewerKey, Viewer>,
    previously_sent: HashSet<ChunkKey>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            viewers: HashMap::new(),
            previously_sent: HashSet::new(),
        }
    }

    // Viewers

    pub fn viewers(&self) -> hash_map::Values<'_, ViewerKey, Viewer> {
        self.viewers.values()
    }

    pub fn viewer(&self, key: &ViewerKey) -> Option<&Viewer> {
        self.viewers.get(key)
    }

    pub fn viewer_mut(&mut self, key: &ViewerKey) -> Option<&mut Viewer> {
        self.viewers.get_mut(key)
    }

    pub fn insert_viewer(&mut self, key: ViewerKey, viewer: Viewer) -> Option<Viewer> {
        self.viewers.insert(key, viewer)
    }

    pub fn remove_viewer(&mut self, key: &ViewerKey) -> Option<Viewer> {
        self.viewers.remove(key)
    }

    pub fn clear_viewers(&mut self) {
        self.viewers.clear();
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    // Sent chunks

    pub fn previously_sent(&self) -> &HashSet<ChunkKey> {
        &self.previously_sent
    }

    /// Replaces, never merges: chunks that dropped out of view are forgotten
    /// so they are sent in full again if they come back
    pub fn replace_previously_sent(&mut self, current: HashSet<ChunkKey>) -> HashSet<ChunkKey> {
        std::mem::replace(&mut self.previously_sent, current)
    }

    /// Forget everything, so the next sync resends every visible chunk
    pub fn reset_previously_sent(&mut self) {
        self.previously_sent.clear();
    }
}

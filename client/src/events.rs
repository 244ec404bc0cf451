use std::vec::IntoIter;

use tilemark_shared::{ChunkKey, MarkerId};

/// Everything one applied update changed in the replica
pub struct ChunkEvents {
    received_chunks: Vec<ChunkKey>,
    forgotten_chunks: Vec<ChunkKey>,
    inserts: Vec<(ChunkKey, MarkerId)>,
    updates: Vec<(ChunkKey, MarkerId)>,
    removes: Vec<(ChunkKey, MarkerId)>,
    empty: bool,
}

impl Default for ChunkEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkEvents {
    pub(crate) fn new() -> Self {
        Self {
            received_chunks: Vec::new(),
            forgotten_chunks: Vec::new(),
            inserts: Vec::new(),
            updates: Vec::new(),
            removes: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ChunkEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ChunkEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_received(&mut self, key: ChunkKey) {
        self.received_chunks.push(key);
        self.empty = false;
    }

    pub(crate) fn push_forgotten(&mut self, key: ChunkKey) {
        self.forgotten_chunks.push(key);
        self.empty = false;
    }

    pub(crate) fn push_insert(&mut self, key: ChunkKey, id: MarkerId) {
        self.inserts.push((key, id));
        self.empty = false;
    }

    pub(crate) fn push_update(&mut self, key: ChunkKey, id: MarkerId) {
        self.updates.push((key, id));
        self.empty = false;
    }

    pub(crate) fn push_remove(&mut self, key: ChunkKey, id: MarkerId) {
        self.removes.push((key, id));
        self.empty = false;
    }
}

// Event Trait
pub trait ChunkEvent {
    type Iter;

    fn iter(events: &mut ChunkEvents) -> Self::Iter;

    fn has(events: &ChunkEvents) -> bool;
}

// Chunk Received Event
/// A chunk's contents were replaced by a fresh snapshot
pub struct ChunkReceivedEvent;
impl ChunkEvent for ChunkReceivedEvent {
    type Iter = IntoIter<ChunkKey>;

    fn iter(events: &mut ChunkEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.received_chunks);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ChunkEvents) -> bool {
        !events.received_chunks.is_empty()
    }
}

// Chunk Forgotten Event
/// A chunk left the session's view and was dropped from the replica
pub struct ChunkForgottenEvent;
impl ChunkEvent for ChunkForgottenEvent {
    type Iter = IntoIter<ChunkKey>;

    fn iter(events: &mut ChunkEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.forgotten_chunks);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ChunkEvents) -> bool {
        !events.forgotten_chunks.is_empty()
    }
}

// Insert Marker Event
pub struct InsertMarkerEvent;
impl ChunkEvent for InsertMarkerEvent {
    type Iter = IntoIter<(ChunkKey, MarkerId)>;

    fn iter(events: &mut ChunkEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.inserts);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ChunkEvents) -> bool {
        !events.inserts.is_empty()
    }
}

// Update Marker Event
pub struct UpdateMarkerEvent;
impl ChunkEvent for UpdateMarkerEvent {
    type Iter = IntoIter<(ChunkKey, MarkerId)>;

    fn iter(events: &mut ChunkEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.updates);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ChunkEvents) -> bool {
        !events.updates.is_empty()
    }
}

// Remove Marker Event
pub struct RemoveMarkerEvent;
impl ChunkEvent for RemoveMarkerEvent {
    type Iter = IntoIter<(ChunkKey, MarkerId)>;

    fn iter(events: &mut ChunkEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.removes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ChunkEvents) -> bool {
        !events.removes.is_empty()
    }
}

use std::collections::{hash_map, HashMap};

use log::{debug, warn};

use tilemark_shared::{
    sequence_greater_than, ChunkKey, ChunkSnapshot, ChunkUpdate, Marker, MarkerId, Protocol,
    Tick,
};

use crate::{ChunkEvents, ClientError};

/// Local replica of the chunks the server has shown one session. Each
/// received snapshot replaces the held copy of its chunk wholesale.
pub struct MarkerClient {
    protocol: Protocol,
    chunks: HashMap<ChunkKey, ChunkSnapshot>,
    marker_index: HashMap<MarkerId, ChunkKey>,
    last_tick: Option<Tick>,
}

impl MarkerClient {
    /// Create a new MarkerClient
    pub fn new<P: Into<Protocol>>(protocol: P) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            protocol,
            chunks: HashMap::new(),
            marker_index: HashMap::new(),
            last_tick: None,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Decodes and applies one update payload
    pub fn receive(&mut self, payload: &[u8]) -> Result<ChunkEvents, ClientError> {
        let update = ChunkUpdate::from_bytes(payload)?;
        self.apply(update)
    }

    /// Applies a decoded update. A rejected update leaves the replica
    /// untouched.
    pub fn apply(&mut self, update: ChunkUpdate) -> Result<ChunkEvents, ClientError> {
        if let Some(last) = self.last_tick {
            if !sequence_greater_than(update.tick, last) {
                warn!("dropping update for tick {}, already at tick {}", update.tick, last);
                return Err(ClientError::StaleUpdate {
                    tick: update.tick,
                    last,
                });
            }
        }
        for snapshot in &update.chunks {
            for (id, marker) in &snapshot.markers {
                if !self.protocol.marker_kinds.contains(&marker.kind) {
                    return Err(ClientError::UnknownKind {
                        id: *id,
                        kind: marker.kind,
                    });
                }
            }
        }

        self.last_tick = Some(update.tick);
        let mut events = ChunkEvents::new();

        for key in update.forgotten {
            if let Some(snapshot) = self.forget_chunk(&key) {
                for (id, _) in &snapshot.markers {
                    events.push_remove(key, *id);
                }
            }
            events.push_forgotten(key);
        }

        let received = update.chunks.len();
        for snapshot in update.chunks {
            self.replace_chunk(snapshot, &mut events);
        }

        debug!(
            "applied tick {}: {} chunks received, holding {} chunks",
            update.tick,
            received,
            self.chunks.len()
        );
        Ok(events)
    }

    /// Drops a chunk from the replica, e.g. once it is far outside the view.
    /// It is shown again in full if it comes back into view.
    pub fn forget_chunk(&mut self, key: &ChunkKey) -> Option<ChunkSnapshot> {
        let snapshot = self.chunks.remove(key)?;
        for (id, _) in &snapshot.markers {
            self.unindex(id, key);
        }
        Some(snapshot)
    }

    /// Empties the replica, e.g. before reconnecting
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.marker_index.clear();
        self.last_tick = None;
    }

    // Queries

    pub fn last_tick(&self) -> Option<Tick> {
        self.last_tick
    }

    pub fn chunk(&self, key: &ChunkKey) -> Option<&ChunkSnapshot> {
        self.chunks.get(key)
    }

    /// Markers of a chunk, sorted by id. Empty for chunks never received.
    pub fn chunk_markers(&self, key: &ChunkKey) -> &[(MarkerId, Marker)] {
        self.chunks
            .get(key)
            .map(|snapshot| snapshot.markers.as_slice())
            .unwrap_or_default()
    }

    pub fn chunk_keys(&self) -> hash_map::Keys<'_, ChunkKey, ChunkSnapshot> {
        self.chunks.keys()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The most recently received copy of a marker
    pub fn marker(&self, id: &MarkerId) -> Option<&Marker> {
        let key = self.marker_index.get(id)?;
        self.chunks.get(key)?.get(id)
    }

    pub fn marker_chunk(&self, id: &MarkerId) -> Option<ChunkKey> {
        self.marker_index.get(id).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.marker_index.len()
    }

    // Private

    fn replace_chunk(&mut self, snapshot: ChunkSnapshot, events: &mut ChunkEvents) {
        let key = snapshot.key;

        if let Some(old) = self.chunks.remove(&key) {
            for (id, previous) in &old.markers {
                match snapshot.get(id) {
                    None => {
                        events.push_remove(key, *id);
                        self.unindex(id, &key);
                    }
                    Some(marker) if marker != previous => events.push_update(key, *id),
                    Some(_) => {}
                }
            }
            for (id, _) in &snapshot.markers {
                if old.get(id).is_none() {
                    events.push_insert(key, *id);
                }
            }
        } else {
            for (id, _) in &snapshot.markers {
                events.push_insert(key, *id);
            }
        }

        for (id, _) in &snapshot.markers {
            self.marker_index.insert(*id, key);
        }
        events.push_received(key);

        if !snapshot.is_empty() {
            self.chunks.insert(key, snapshot);
        }
    }

    // a marker which moved into a chunk the client was shown before the
    // chunk it left may briefly be held by both; the later copy wins
    fn unindex(&mut self, id: &MarkerId, key: &ChunkKey) {
        if self.marker_index.get(id) == Some(key) {
            self.marker_index.remove(id);
        }
    }
}

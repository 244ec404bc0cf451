use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use tilemark_shared::{ChunkKey, ChunkUpdate, MarkerId, Protocol, Tick};

use crate::{
    interest::visible_chunks,
    session::Session,
    store::MarkerStore,
    tile_events::{handle_tile_changed, SurfaceRemoved, TileChanged},
    transport::UpdateSender,
    FloorMap, ServerConfig, SessionKey, SessionMut, SessionRef,
};

/// Holds every marker and every connected session, and once per tick sends
/// each session the chunks it has not seen yet or which changed
pub struct MarkerServer {
    server_config: ServerConfig,
    protocol: Protocol,
    io: Option<Box<dyn UpdateSender>>,
    // Markers
    store: MarkerStore,
    // Sessions
    sessions: HashMap<SessionKey, Session>,
    next_session_key: u64,
    // Ticks
    tick: Tick,
}

impl MarkerServer {
    /// Create a new MarkerServer
    pub fn new<P: Into<Protocol>>(server_config: ServerConfig, protocol: P) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        let store = MarkerStore::new(
            protocol.chunk_size,
            protocol.marker_kinds.clone(),
            server_config.prune_empty_chunks,
        );

        Self {
            server_config,
            protocol,
            io: None,
            store,
            sessions: HashMap::new(),
            next_session_key: 0,
            tick: 0,
        }
    }

    /// Attaches the channel updates are sent through
    pub fn io_load(&mut self, sender: Box<dyn UpdateSender>) {
        self.io = Some(sender);
    }

    /// Returns whether updates have somewhere to go
    pub fn is_listening(&self) -> bool {
        self.io.is_some()
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn config(&self) -> &ServerConfig {
        &self.server_config
    }

    /// The tick of the most recent sync pass
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    // Sessions

    /// Starts tracking a newly connected session. It sees nothing until a
    /// viewer is added.
    pub fn connect_session(&mut self) -> SessionKey {
        let key = SessionKey::from_u64(self.next_session_key);
        self.next_session_key += 1;
        self.sessions.insert(key, Session::new());

        info!("session {:?} connected", key);
        key
    }

    /// Drops all sync state for a session. Other sessions, and chunks
    /// waiting to be synced, are unaffected.
    pub fn disconnect_session(&mut self, key: &SessionKey) -> bool {
        if self.sessions.remove(key).is_none() {
            warn!("attempted to disconnect unknown session {:?}", key);
            return false;
        }

        info!("session {:?} disconnected", key);
        true
    }

    pub fn session_exists(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }

    pub fn session(&self, key: &SessionKey) -> Option<SessionRef<'_>> {
        self.sessions
            .get(key)
            .map(|session| SessionRef::new(session, key))
    }

    pub fn session_mut(&mut self, key: &SessionKey) -> Option<SessionMut<'_>> {
        let default_view_radius = self.server_config.default_view_radius;
        self.sessions
            .get_mut(key)
            .map(|session| SessionMut::new(session, key, default_view_radius))
    }

    pub fn session_keys(&self) -> Vec<SessionKey> {
        let mut output: Vec<SessionKey> = self.sessions.keys().copied().collect();
        output.sort();
        output
    }

    pub fn sessions_count(&self) -> usize {
        self.sessions.len()
    }

    // Markers

    pub fn markers(&self) -> &MarkerStore {
        &self.store
    }

    /// Mutations made here are picked up by the next sync pass
    pub fn markers_mut(&mut self) -> &mut MarkerStore {
        &mut self.store
    }

    // Terrain notifications

    /// Removes markers from a tile that can no longer hold them
    pub fn tile_changed(&mut self, event: &TileChanged) -> Vec<MarkerId> {
        handle_tile_changed(&mut self.store, event)
    }

    pub fn surface_removed(&mut self, event: &SurfaceRemoved) -> usize {
        self.store.remove_surface(&event.surface)
    }

    // Sync

    /// The chunks a session's viewers can currently see
    pub fn visible_chunks<F: FloorMap + ?Sized>(
        &self,
        key: &SessionKey,
        floor: &F,
    ) -> Option<HashSet<ChunkKey>> {
        let session = self.sessions.get(key)?;
        Some(visible_chunks(
            session.viewers(),
            self.store.chunk_size(),
            self.server_config.max_view_radius,
            floor,
        ))
    }

    /// Sends every pending update. Call once per tick, after all of that
    /// tick's mutations. Returns the number of updates sent.
    pub fn send_all_updates<F: FloorMap + ?Sized>(&mut self, floor: &F) -> usize {
        if !self.is_listening() {
            warn!("no update channel loaded, skipping sync");
            return 0;
        }

        let updates = self.collect_updates(floor);

        let mut sent = 0;
        for (key, update) in updates {
            let Some(io) = self.io.as_ref() else {
                break;
            };
            let payload = update.to_bytes();
            match io.send(&key, &payload) {
                Ok(()) => sent += 1,
                Err(err) => {
                    // the client may now be missing chunks; start it over
                    warn!("{}, resending its view next tick", err);
                    if let Some(session) = self.sessions.get_mut(&key) {
                        session.reset_previously_sent();
                    }
                }
            }
        }
        sent
    }

    /// Runs one sync pass and returns the updates instead of sending them.
    /// Every session is diffed against the same dirty set, which is drained
    /// only after the last session.
    pub fn collect_updates<F: FloorMap + ?Sized>(&mut self, floor: &F) -> Vec<(SessionKey, ChunkUpdate)> {
        self.tick = self.tick.wrapping_add(1);

        let mut session_keys: Vec<SessionKey> = self.sessions.keys().copied().collect();
        if self.server_config.shuffle_sessions {
            fastrand::shuffle(&mut session_keys);
        } else {
            session_keys.sort();
        }

        let mut updates = Vec::new();
        for key in session_keys {
            if let Some(update) = self.sync_session(&key, floor) {
                updates.push((key, update));
            }
        }

        let drained = self.store.drain_dirty();
        debug!(
            "tick {}: {} dirty chunks, {} of {} sessions updated",
            self.tick,
            drained.len(),
            updates.len(),
            self.sessions.len()
        );

        updates
    }

    fn sync_session<F: FloorMap + ?Sized>(&mut self, key: &SessionKey, floor: &F) -> Option<ChunkUpdate> {
        let session = self.sessions.get_mut(key)?;

        let current = visible_chunks(
            session.viewers(),
            self.store.chunk_size(),
            self.server_config.max_view_radius,
            floor,
        );

        // newly visible chunks need a first copy, visible dirty chunks need a
        // fresh one
        let dirty_chunks = self.store.dirty_chunks();
        let mut to_send: Vec<ChunkKey> = current
            .iter()
            .filter(|chunk| !session.previously_sent().contains(chunk) || dirty_chunks.is_dirty(chunk))
            .copied()
            .collect();
        to_send.sort();

        let previously_sent = session.replace_previously_sent(current);

        let mut forgotten: Vec<ChunkKey> = Vec::new();
        if self.server_config.send_chunk_removals {
            forgotten = previously_sent
                .difference(session.previously_sent())
                .copied()
                .collect();
            forgotten.sort();
        }

        if to_send.is_empty() && forgotten.is_empty() {
            return None;
        }

        let chunks = to_send
            .iter()
            .map(|chunk| self.store.snapshot(chunk))
            .collect();

        Some(ChunkUpdate {
            tick: self.tick,
            chunks,
            forgotten,
        })
    }
}

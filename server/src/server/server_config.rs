use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// View radius, in tiles, given to viewers spawned without one
    pub default_view_radius: f32,
    /// Upper bound, in tiles, on any viewer's radius. Larger radii are
    /// clamped to this when computing what a session can see.
    pub max_view_radius: f32,
    /// Whether chunks are dropped from memory once their last marker leaves.
    /// Never observable from outside: a missing chunk reads as empty.
    pub prune_empty_chunks: bool,
    /// Whether updates also list chunks that left a session's view, so the
    /// client can drop them early
    pub send_chunk_removals: bool,
    /// Whether to visit sessions in a random order each tick, so no session
    /// is consistently first in the outgoing queue
    pub shuffle_sessions: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_view_radius: 20.0,
            max_view_radius: 256.0,
            prune_empty_chunks: true,
            send_chunk_removals: false,
            shuffle_sessions: true,
        }
    }
}

//! # Tilemark Server
//! Stores markers in per-surface chunks, tracks which chunks changed during
//! a tick, and sends each connected session full snapshots of the chunks
//! its viewers can see whenever those chunks are new to it or have changed.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use tilemark_shared::{
        ChunkIndices, ChunkKey, ChunkSnapshot, ChunkUpdate, Color, Marker, MarkerId, MarkerKind,
        MarkerKinds, Position, Protocol, SurfaceId, Tick, TileBox, TileIndices,
    };
}

mod error;
mod floor;
mod interest;
mod server;
mod session;
mod store;
mod tile_events;

pub use error::MarkerError;
pub use floor::FloorMap;
pub use interest::{visible_chunks, Viewer, ViewerKey};
pub use server::{MarkerServer, ServerConfig};
pub use session::{SessionKey, SessionMut, SessionRef};
pub use store::{Chunk, ChunkIndex, DirtyChunks, MarkerStore};
pub use tile_events::{SurfaceRemoved, TileChanged, TileState};

//! # Tilemark Client
//! Applies the chunk updates a tilemark-server sends to one session, keeping
//! a replica of every chunk the session has been shown and reporting which
//! markers appeared, changed or went away.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tilemark_shared::{
        ChunkIndices, ChunkKey, ChunkSnapshot, ChunkUpdate, Color, Marker, MarkerId, MarkerKind,
        Position, Protocol, SurfaceId, Tick,
    };
}

mod client;
mod error;
mod events;

pub use client::MarkerClient;
pub use error::ClientError;
pub use events::{
    ChunkEvent, ChunkEvents, ChunkForgottenEvent, ChunkReceivedEvent, InsertMarkerEvent,
    RemoveMarkerEvent, UpdateMarkerEvent,
};

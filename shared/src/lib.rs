//! # Tilemark Shared
//! Common functionality shared between tilemark-server & tilemark-client:
//! marker data, tile & chunk coordinates, the marker kind catalog and the
//! chunk update message.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use tilemark_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
    SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod checked_map;
mod coords;
mod marker;
mod marker_kinds;
mod messages;
mod protocol;
mod types;
mod wrapping_number;

pub use checked_map::CheckedMap;
pub use coords::{ChunkIndices, ChunkKey, Position, TileBox, TileIndices};
pub use marker::{Color, Marker};
pub use marker_kinds::{MarkerKind, MarkerKinds, MAX_MARKER_KINDS};
pub use messages::{ChunkSnapshot, ChunkUpdate};
pub use protocol::{Protocol, ProtocolError, DEFAULT_CHUNK_SIZE};
pub use types::{MarkerId, SurfaceId, Tick};
pub use wrapping_number::sequence_greater_than;

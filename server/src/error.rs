use thiserror::Error;

use tilemark_shared::{MarkerKind, SurfaceId, TileIndices};

/// Reasons a marker mutation can be refused. A missing marker id is not an
/// error: those operations return `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// The kind is not in the registered catalog
    #[error("Marker kind {kind:?} is not registered in the Protocol")]
    UnknownKind { kind: MarkerKind },

    /// The surface does not exist, or the tile is not floor
    #[error("Tile {tile:?} on surface {surface:?} cannot hold markers")]
    InvalidSurface { surface: SurfaceId, tile: TileIndices },
}

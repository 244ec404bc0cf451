use log::trace;

use tilemark_shared::{MarkerId, SurfaceId, TileIndices};

use crate::MarkerStore;

/// What a tile turned into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileState {
    /// Solid floor which markers may sit on
    Floor,
    /// Open space, or anything else markers cannot sit on
    Space,
}

/// Raised by the terrain subsystem whenever a tile changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileChanged {
    pub surface: SurfaceId,
    pub tile: TileIndices,
    pub state: TileState,
}

impl TileChanged {
    pub fn new(surface: SurfaceId, tile: TileIndices, state: TileState) -> Self {
        Self {
            surface,
            tile,
            state,
        }
    }

    pub fn invalidates_markers(&self) -> bool {
        self.state == TileState::Space
    }
}

/// Raised by the terrain subsystem when a whole surface is deleted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceRemoved {
    pub surface: SurfaceId,
}

/// Removes every marker left standing on a tile that can no longer hold
/// them. Each removal marks the owning chunk dirty.
pub(crate) fn handle_tile_changed(store: &mut MarkerStore, event: &TileChanged) -> Vec<MarkerId> {
    if !event.invalidates_markers() {
        return Vec::new();
    }

    let removed = store.query_tile(event.surface, &event.tile);
    for id in &removed {
        store.remove(id);
    }

    if !removed.is_empty() {
        trace!(
            "tile {:?} on {:?} lost its floor, removed {} markers",
            event.tile,
            event.surface,
            removed.len()
        );
    }
    removed
}

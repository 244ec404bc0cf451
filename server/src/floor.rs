use tilemark_shared::{SurfaceId, TileIndices};

/// Read access to the terrain which owns the surfaces markers sit on
pub trait FloorMap {
    /// Whether the surface currently exists
    fn has_surface(&self, surface: &SurfaceId) -> bool;

    /// Whether a marker may sit on the given tile. Must return false for
    /// tiles of surfaces which do not exist.
    fn is_floor(&self, surface: &SurfaceId, tile: &TileIndices) -> bool;
}

impl<F: FloorMap + ?Sized> FloorMap for &F {
    fn has_surface(&self, surface: &SurfaceId) -> bool {
        (**self).has_surface(surface)
    }

    fn is_floor(&self, surface: &SurfaceId, tile: &TileIndices) -> bool {
        (**self).is_floor(surface, tile)
    }
}

use tilemark_shared::{Position, SurfaceId};

/// Identifies a viewer entity within its session, chosen by the caller
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ViewerKey(u64);

impl ViewerKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// An in-world observer whose surroundings a session is shown
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewer {
    pub surface: SurfaceId,
    pub position: Position,
    /// Tiles
    pub view_radius: f32,
}

impl Viewer {
    pub fn new(surface: SurfaceId, position: Position, view_radius: f32) -> Self {
        Self {
            surface,
            position,
            view_radius,
        }
    }
}

use std::collections::HashSet;

use log::trace;

use tilemark_shared::{ChunkIndices, ChunkKey, Position};

use crate::{FloorMap, Viewer};

/// Every chunk touched by the view circle of at least one of the viewers.
/// Viewers standing on surfaces that no longer exist see nothing, as do
/// viewers with a negative or non-finite radius. Radii above `max_radius`
/// are clamped to it.
pub fn visible_chunks<'v, F: FloorMap + ?Sized>(
    viewers: impl IntoIterator<Item = &'v Viewer>,
    chunk_size: u32,
    max_radius: f32,
    floor: &F,
) -> HashSet<ChunkKey> {
    let mut output = HashSet::new();

    for viewer in viewers {
        if !floor.has_surface(&viewer.surface) {
            trace!("viewer on missing surface {:?} sees nothing", viewer.surface);
            continue;
        }
        if !viewer.view_radius.is_finite() || viewer.view_radius < 0.0 {
            trace!("viewer with radius {} sees nothing", viewer.view_radius);
            continue;
        }

        let radius = viewer.view_radius.min(max_radius);
        if !(radius >= 0.0) {
            continue;
        }
        let center = viewer.position;
        let low = Position::new(center.x - radius, center.y - radius)
            .tile()
            .chunk(chunk_size);
        let high = Position::new(center.x + radius, center.y + radius)
            .tile()
            .chunk(chunk_size);

        for x in low.x..=high.x {
            for y in low.y..=high.y {
                let indices = ChunkIndices::new(x, y);
                if circle_touches_chunk(&center, radius, &indices, chunk_size) {
                    output.insert(ChunkKey::new(viewer.surface, indices));
                }
            }
        }
    }

    output
}

fn circle_touches_chunk(center: &Position, radius: f32, indices: &ChunkIndices, chunk_size: u32) -> bool {
    let origin = indices.origin_tile(chunk_size);
    let min_x = origin.x as f32;
    let min_y = origin.y as f32;
    let max_x = min_x + chunk_size as f32;
    let max_y = min_y + chunk_size as f32;

    let nearest_x = center.x.clamp(min_x, max_x);
    let nearest_y = center.y.clamp(min_y, max_y);
    let dx = center.x - nearest_x;
    let dy = center.y - nearest_y;

    dx * dx + dy * dy <= radius * radius
}

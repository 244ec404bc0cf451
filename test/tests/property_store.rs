//! PROPERTY-BASED TESTS: Marker store invariants
//!
//! Random sequences of store edits must keep the chunk contents and the
//! id -> chunk index in agreement, and must mark every touched chunk dirty.

use std::collections::HashMap;

use proptest::prelude::*;
use tilemark_server::{MarkerError, MarkerStore};
use tilemark_shared::{
    ChunkKey, Color, Marker, MarkerId, MarkerKind, Position, SurfaceId, TileIndices,
};
use tilemark_test::{protocol, TestTerrain, CHUNK_SIZE};

#[derive(Clone, Debug)]
enum Edit {
    Add { surface: u32, x: f32, y: f32, kind: u16 },
    Remove { pick: usize },
    Move { pick: usize, surface: u32, x: f32, y: f32 },
    SetColor { pick: usize, shade: Option<u8> },
    SetKind { pick: usize, kind: u16 },
    Space { surface: u32, x: i32, y: i32 },
    Clean { surface: u32, x: i32, y: i32 },
}

fn coordinate() -> impl Strategy<Value = f32> {
    -40.0f32..40.0f32
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (1u32..3, coordinate(), coordinate(), 0u16..3)
            .prop_map(|(surface, x, y, kind)| Edit::Add { surface, x, y, kind }),
        1 => any::<usize>().prop_map(|pick| Edit::Remove { pick }),
        2 => (any::<usize>(), 1u32..3, coordinate(), coordinate())
            .prop_map(|(pick, surface, x, y)| Edit::Move { pick, surface, x, y }),
        1 => (any::<usize>(), proptest::option::of(any::<u8>()))
            .prop_map(|(pick, shade)| Edit::SetColor { pick, shade }),
        1 => (any::<usize>(), 0u16..3).prop_map(|(pick, kind)| Edit::SetKind { pick, kind }),
        1 => (1u32..3, -40i32..40, -40i32..40)
            .prop_map(|(surface, x, y)| Edit::Space { surface, x, y }),
        1 => (1u32..3, -40i32..40, -40i32..40)
            .prop_map(|(surface, x, y)| Edit::Clean { surface, x, y }),
    ]
}

fn chunk_of(surface: SurfaceId, position: &Position) -> ChunkKey {
    ChunkKey::new(surface, position.tile().chunk(CHUNK_SIZE))
}

fn pick(ids: &[MarkerId], pick: usize) -> Option<MarkerId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[pick % ids.len()])
    }
}

proptest! {
    /// Every marker is held by exactly the chunk the index names, the one
    /// its position falls in
    #[test]
    fn prop_index_agrees_with_chunks(
        edits in prop::collection::vec(edit_strategy(), 1..60),
        prune_empty_chunks in any::<bool>(),
    ) {
        let protocol = protocol();
        let mut terrain = TestTerrain::with_surfaces([1, 2]);
        let mut store = MarkerStore::new(
            CHUNK_SIZE,
            protocol.marker_kinds.clone(),
            prune_empty_chunks,
        );
        // id -> (surface, position) of every marker that should exist
        let mut expected: HashMap<MarkerId, (SurfaceId, Position)> = HashMap::new();
        let mut issued: Vec<MarkerId> = Vec::new();

        for edit in edits {
            store.drain_dirty();

            match edit {
                Edit::Add { surface, x, y, kind } => {
                    let surface = SurfaceId::new(surface);
                    let position = Position::new(x, y);
                    let marker = Marker::new(MarkerKind::from_u16(kind), position)
                        .with_cleanable(kind == 1);
                    match store.add(&terrain, surface, marker) {
                        Ok(id) => {
                            prop_assert!(!issued.contains(&id), "id {:?} issued twice", id);
                            prop_assert!(store.dirty_chunks().is_dirty(&chunk_of(surface, &position)));
                            expected.insert(id, (surface, position));
                            issued.push(id);
                        }
                        Err(MarkerError::UnknownKind { .. }) => {
                            prop_assert_eq!(kind, 2);
                        }
                        Err(MarkerError::InvalidSurface { .. }) => {
                            prop_assert!(store.dirty_chunks().is_empty());
                        }
                    }
                }
                Edit::Remove { pick: index } => {
                    if let Some(id) = pick(&issued, index) {
                        let existed = expected.remove(&id);
                        prop_assert_eq!(store.remove(&id), existed.is_some());
                        if let Some((surface, position)) = existed {
                            prop_assert!(store.dirty_chunks().is_dirty(&chunk_of(surface, &position)));
                        }
                    }
                }
                Edit::Move { pick: index, surface, x, y } => {
                    if let Some(id) = pick(&issued, index) {
                        let surface = SurfaceId::new(surface);
                        let position = Position::new(x, y);
                        let moved = store.move_marker(&id, surface, position);
                        prop_assert_eq!(moved, expected.contains_key(&id));
                        if let Some(old) = expected.get_mut(&id) {
                            let dirty = store.dirty_chunks();
                            prop_assert!(dirty.is_dirty(&chunk_of(old.0, &old.1)));
                            prop_assert!(dirty.is_dirty(&chunk_of(surface, &position)));
                            *old = (surface, position);
                        }
                    }
                }
                Edit::SetColor { pick: index, shade } => {
                    if let Some(id) = pick(&issued, index) {
                        let color = shade.map(|shade| Color::rgba(shade, shade, shade, 255));
                        prop_assert_eq!(store.set_color(&id, color), expected.contains_key(&id));
                        if expected.contains_key(&id) {
                            prop_assert_eq!(store.get(&id).unwrap().color, color);
                        }
                    }
                }
                Edit::SetKind { pick: index, kind } => {
                    if let Some(id) = pick(&issued, index) {
                        let result = store.set_kind(&id, MarkerKind::from_u16(kind));
                        if kind == 2 {
                            prop_assert!(result.is_err());
                        } else {
                            prop_assert_eq!(result.unwrap(), expected.contains_key(&id));
                        }
                    }
                }
                Edit::Space { surface, x, y } => {
                    let surface = SurfaceId::new(surface);
                    let tile = TileIndices::new(x, y);
                    terrain.set_space(surface, tile);
                    let on_tile = store.query_tile(surface, &tile);
                    for id in &on_tile {
                        prop_assert!(store.remove(id));
                        expected.remove(id);
                    }
                    prop_assert!(store.query_tile(surface, &tile).is_empty());
                }
                Edit::Clean { surface, x, y } => {
                    let surface = SurfaceId::new(surface);
                    let tile = TileIndices::new(x, y);
                    for id in store.clean_tile(surface, &tile) {
                        prop_assert!(store.get(&id).is_none());
                        expected.remove(&id);
                    }
                    for id in store.query_tile(surface, &tile) {
                        prop_assert!(!store.get(&id).unwrap().cleanable);
                    }
                }
            }

            store.assert_consistent();
            prop_assert_eq!(store.len(), expected.len());
            for (id, (surface, position)) in &expected {
                prop_assert_eq!(store.location(id), Some(chunk_of(*surface, position)));
                prop_assert_eq!(store.get(id).unwrap().position, *position);
            }
        }
    }

    /// Markers are only ever placed on floor of an existing surface
    #[test]
    fn prop_add_respects_floor(
        x in coordinate(),
        y in coordinate(),
        surface in 0u32..4,
    ) {
        let protocol = protocol();
        let mut terrain = TestTerrain::with_surfaces([1, 2]);
        let position = Position::new(x, y);
        terrain.set_space(SurfaceId::new(2), position.tile());
        let mut store = MarkerStore::new(CHUNK_SIZE, protocol.marker_kinds.clone(), true);

        let kind = protocol.marker_kind("A").unwrap();
        let result = store.add(&terrain, SurfaceId::new(surface), Marker::new(kind, position));

        prop_assert_eq!(result.is_ok(), surface == 1);
        prop_assert_eq!(store.len(), usize::from(surface == 1));
    }
}

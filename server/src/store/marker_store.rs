use std::collections::{hash_map::Entry, HashMap, HashSet};

use log::{info, trace};

use tilemark_shared::{
    ChunkKey, ChunkSnapshot, Color, Marker, MarkerId, MarkerKind, MarkerKinds, Position,
    SurfaceId, TileBox, TileIndices,
};

use crate::{
    store::{chunk::Chunk, chunk_index::ChunkIndex, dirty_chunks::DirtyChunks},
    FloorMap, MarkerError,
};

/// Owns every marker, the chunks they live in, the id -> chunk index and the
/// set of chunks changed this tick.
///
/// After every public call returns, each indexed id is held by exactly the
/// chunk the index names, and every id held by a chunk is indexed there.
pub struct MarkerStore {
    chunk_size: u32,
    marker_kinds: MarkerKinds,
    prune_empty_chunks: bool,
    next_id: u64,
    chunks: HashMap<ChunkKey, Chunk>,
    chunk_index: ChunkIndex,
    dirty_chunks: DirtyChunks,
}

impl MarkerStore {
    pub fn new(chunk_size: u32, marker_kinds: MarkerKinds, prune_empty_chunks: bool) -> Self {
        if chunk_size == 0 {
            panic!("MarkerStore chunk size must be at least one tile");
        }

        Self {
            chunk_size,
            marker_kinds,
            prune_empty_chunks,
            next_id: 0,
            chunks: HashMap::new(),
            chunk_index: ChunkIndex::new(),
            dirty_chunks: DirtyChunks::new(),
        }
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn marker_kinds(&self) -> &MarkerKinds {
        &self.marker_kinds
    }

    /// The chunk a position falls in
    pub fn chunk_key(&self, surface: SurfaceId, position: &Position) -> ChunkKey {
        ChunkKey::new(surface, position.tile().chunk(self.chunk_size))
    }

    // Mutations

    /// Validates and stores a new marker, returning its freshly allocated id
    pub fn add<F: FloorMap + ?Sized>(
        &mut self,
        floor: &F,
        surface: SurfaceId,
        marker: Marker,
    ) -> Result<MarkerId, MarkerError> {
        if !self.marker_kinds.contains(&marker.kind) {
            return Err(MarkerError::UnknownKind { kind: marker.kind });
        }

        let tile = marker.position.tile();
        if !floor.has_surface(&surface) || !floor.is_floor(&surface, &tile) {
            return Err(MarkerError::InvalidSurface { surface, tile });
        }

        let id = MarkerId::from_u64(self.next_id);
        self.next_id += 1;

        let key = self.chunk_key(surface, &marker.position);
        trace!("adding marker {:?} to chunk {:?}", id, key);
        self.insert_into_chunk(id, key, marker);
        self.chunk_index.insert(id, key);
        self.dirty_chunks.mark(key);

        Ok(id)
    }

    /// Returns false if no such marker exists, which is routine when a tile
    /// invalidation got there first
    pub fn remove(&mut self, id: &MarkerId) -> bool {
        self.take(id).is_some()
    }

    /// Removes a marker and hands back where it was and what it held
    pub fn take(&mut self, id: &MarkerId) -> Option<(ChunkKey, Marker)> {
        let key = *self.chunk_index.get(id)?;

        let marker = self.remove_from_chunk(id, &key);
        self.chunk_index.remove(id);
        self.dirty_chunks.mark(key);
        trace!("removed marker {:?} from chunk {:?}", id, key);

        Some((key, marker))
    }

    /// Moves a marker, possibly across chunks or onto another surface.
    /// Marks the chunk it left and the chunk it entered dirty.
    pub fn move_marker(&mut self, id: &MarkerId, surface: SurfaceId, position: Position) -> bool {
        let Some(old_key) = self.chunk_index.get(id).copied() else {
            return false;
        };
        let new_key = self.chunk_key(surface, &position);

        if old_key == new_key {
            self.chunk_marker_mut(id, &old_key).position = position;
            self.dirty_chunks.mark(old_key);
            return true;
        }

        let mut marker = self.remove_from_chunk(id, &old_key);
        marker.position = position;
        self.insert_into_chunk(*id, new_key, marker);
        self.chunk_index.relocate(id, new_key);

        self.dirty_chunks.mark(old_key);
        self.dirty_chunks.mark(new_key);
        trace!("moved marker {:?} from {:?} to {:?}", id, old_key, new_key);

        true
    }

    pub fn set_color(&mut self, id: &MarkerId, color: Option<Color>) -> bool {
        self.modify(id, |marker| marker.color = color)
    }

    /// Changes a marker's kind. `Ok(false)` if the marker does not exist.
    pub fn set_kind(&mut self, id: &MarkerId, kind: MarkerKind) -> Result<bool, MarkerError> {
        if !self.marker_kinds.contains(&kind) {
            return Err(MarkerError::UnknownKind { kind });
        }
        Ok(self.modify(id, |marker| marker.kind = kind))
    }

    pub fn set_rotation(&mut self, id: &MarkerId, rotation: f32) -> bool {
        self.modify(id, |marker| marker.rotation = rotation)
    }

    pub fn set_z_index(&mut self, id: &MarkerId, z_index: i32) -> bool {
        self.modify(id, |marker| marker.z_index = z_index)
    }

    /// Removes the cleanable markers on a tile, returning their ids
    pub fn clean_tile(&mut self, surface: SurfaceId, tile: &TileIndices) -> Vec<MarkerId> {
        let key = ChunkKey::new(surface, tile.chunk(self.chunk_size));
        let Some(chunk) = self.chunks.get(&key) else {
            return Vec::new();
        };

        let cleaned: Vec<MarkerId> = chunk
            .ids_on_tile(tile)
            .into_iter()
            .filter(|id| chunk.get(id).is_some_and(|marker| marker.cleanable))
            .collect();
        for id in &cleaned {
            self.remove(id);
        }
        cleaned
    }

    /// Drops every marker on a surface, returning how many were removed
    pub fn remove_surface(&mut self, surface: &SurfaceId) -> usize {
        let keys: Vec<ChunkKey> = self
            .chunks
            .keys()
            .filter(|key| key.surface == *surface)
            .copied()
            .collect();

        let mut removed = 0;
        for key in keys {
            let Some(chunk) = self.chunks.remove(&key) else {
                continue;
            };
            for (id, _) in chunk.iter() {
                let indexed = self.chunk_index.remove(id);
                assert_eq!(indexed, key, "marker {:?} indexed in the wrong chunk", id);
                removed += 1;
            }
            self.dirty_chunks.mark(key);
        }

        info!("removed {} markers from surface {:?}", removed, surface);
        removed
    }

    // Queries

    pub fn len(&self) -> usize {
        self.chunk_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_index.is_empty()
    }

    pub fn contains(&self, id: &MarkerId) -> bool {
        self.chunk_index.contains(id)
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        let key = self.chunk_index.get(id)?;
        self.chunks.get(key)?.get(id)
    }

    /// The chunk currently holding a marker
    pub fn location(&self, id: &MarkerId) -> Option<ChunkKey> {
        self.chunk_index.get(id).copied()
    }

    pub fn chunk(&self, key: &ChunkKey) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    pub fn chunk_keys(&self) -> impl Iterator<Item = &ChunkKey> {
        self.chunks.keys()
    }

    pub fn chunk_index(&self) -> &ChunkIndex {
        &self.chunk_index
    }

    /// Markers sitting on a tile
    pub fn query_tile(&self, surface: SurfaceId, tile: &TileIndices) -> Vec<MarkerId> {
        let key = ChunkKey::new(surface, tile.chunk(self.chunk_size));
        self.chunks
            .get(&key)
            .map(|chunk| chunk.ids_on_tile(tile))
            .unwrap_or_default()
    }

    /// Markers whose position lies within the box, sorted by id
    pub fn markers_intersecting(&self, surface: SurfaceId, tile_box: &TileBox) -> Vec<MarkerId> {
        let mut output = Vec::new();
        for indices in tile_box.chunks(self.chunk_size) {
            if let Some(chunk) = self.chunks.get(&ChunkKey::new(surface, indices)) {
                output.extend(chunk.ids_in_box(tile_box));
            }
        }
        output.sort();
        output
    }

    /// An owned copy of a chunk. A chunk which was never created, or was
    /// pruned, yields an empty snapshot.
    pub fn snapshot(&self, key: &ChunkKey) -> ChunkSnapshot {
        match self.chunks.get(key) {
            Some(chunk) => chunk.snapshot(*key),
            None => ChunkSnapshot::new(*key, Vec::new()),
        }
    }

    // Dirty tracking

    pub fn dirty_chunks(&self) -> &DirtyChunks {
        &self.dirty_chunks
    }

    pub fn mark_dirty(&mut self, key: ChunkKey) {
        self.dirty_chunks.mark(key);
    }

    pub fn drain_dirty(&mut self) -> HashSet<ChunkKey> {
        self.dirty_chunks.drain()
    }

    /// Walks every chunk and the whole index and panics if they disagree
    pub fn assert_consistent(&self) {
        let mut chunk_total = 0;
        for (key, chunk) in &self.chunks {
            for (id, marker) in chunk.iter() {
                chunk_total += 1;
                assert_eq!(
                    self.chunk_index.get(id),
                    Some(key),
                    "marker {:?} held by chunk {:?} is indexed elsewhere",
                    id,
                    key
                );
                assert_eq!(
                    self.chunk_key(key.surface, &marker.position),
                    *key,
                    "marker {:?} sits outside its chunk {:?}",
                    id,
                    key
                );
            }
            if self.prune_empty_chunks {
                assert!(!chunk.is_empty(), "empty chunk {:?} was not pruned", key);
            }
        }
        for (id, key) in self.chunk_index.iter() {
            let held = self.chunks.get(key).is_some_and(|chunk| chunk.contains(id));
            assert!(held, "indexed marker {:?} is missing from chunk {:?}", id, key);
        }
        assert_eq!(chunk_total, self.chunk_index.len());
    }

    // Private

    fn modify(&mut self, id: &MarkerId, edit: impl FnOnce(&mut Marker)) -> bool {
        let Some(key) = self.chunk_index.get(id).copied() else {
            return false;
        };
        edit(self.chunk_marker_mut(id, &key));
        self.dirty_chunks.mark(key);
        true
    }

    fn chunk_marker_mut(&mut self, id: &MarkerId, key: &ChunkKey) -> &mut Marker {
        let Some(marker) = self.chunks.get_mut(key).and_then(|chunk| chunk.get_mut(id)) else {
            panic!("marker {:?} is indexed in chunk {:?} but not held by it", id, key);
        };
        marker
    }

    fn insert_into_chunk(&mut self, id: MarkerId, key: ChunkKey, marker: Marker) {
        self.chunks.entry(key).or_insert_with(Chunk::new).insert(id, marker);
    }

    fn remove_from_chunk(&mut self, id: &MarkerId, key: &ChunkKey) -> Marker {
        let Entry::Occupied(mut entry) = self.chunks.entry(*key) else {
            panic!("marker {:?} is indexed in missing chunk {:?}", id, key);
        };
        let marker = entry.get_mut().remove(id);
        if self.prune_empty_chunks && entry.get().is_empty() {
            entry.remove();
        }
        marker
    }
}

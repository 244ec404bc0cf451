use tilemark_shared::{CheckedMap, ChunkKey, ChunkSnapshot, Marker, MarkerId, TileBox, TileIndices};

/// The markers inside one square partition of a surface
pub struct Chunk {
    markers: CheckedMap<MarkerId, Marker>,
}

impl Chunk {
    pub(crate) fn new() -> Self {
        Self {
            markers: CheckedMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: &MarkerId) -> bool {
        self.markers.contains_key(id)
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarkerId, &Marker)> {
        self.markers.iter()
    }

    pub(crate) fn get_mut(&mut self, id: &MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id)
    }

    pub(crate) fn insert(&mut self, id: MarkerId, marker: Marker) {
        self.markers.insert(id, marker);
    }

    pub(crate) fn remove(&mut self, id: &MarkerId) -> Marker {
        self.markers.remove(id)
    }

    /// Markers whose position floors to the given tile. A linear scan: chunks
    /// stay small enough that a per-tile index would cost more than it saves.
    pub fn ids_on_tile(&self, tile: &TileIndices) -> Vec<MarkerId> {
        let mut output: Vec<MarkerId> = self
            .markers
            .iter()
            .filter(|(_, marker)| marker.position.tile() == *tile)
            .map(|(id, _)| *id)
            .collect();
        output.sort();
        output
    }

    pub fn ids_in_box(&self, tile_box: &TileBox) -> Vec<MarkerId> {
        self.markers
            .iter()
            .filter(|(_, marker)| tile_box.contains(&marker.position))
            .map(|(id, _)| *id)
            .collect()
    }

    /// An owned copy of the chunk's contents, safe to hand to the network
    pub fn snapshot(&self, key: ChunkKey) -> ChunkSnapshot {
        let markers = self
            .markers
            .iter()
            .map(|(id, marker)| (*id, marker.clone()))
            .collect();
        ChunkSnapshot::new(key, markers)
    }
}

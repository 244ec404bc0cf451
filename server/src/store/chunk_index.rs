use tilemark_shared::{CheckedMap, ChunkKey, MarkerId};

/// Reverse lookup from marker id to the chunk currently holding it
pub struct ChunkIndex {
    locations: CheckedMap<MarkerId, ChunkKey>,
}

impl ChunkIndex {
    pub(crate) fn new() -> Self {
        Self {
            locations: CheckedMap::new(),
        }
    }

    pub fn get(&self, id: &MarkerId) -> Option<&ChunkKey> {
        self.locations.get(id)
    }

    pub fn contains(&self, id: &MarkerId) -> bool {
        self.locations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarkerId, &ChunkKey)> {
        self.locations.iter()
    }

    pub(crate) fn insert(&mut self, id: MarkerId, key: ChunkKey) {
        self.locations.insert(id, key);
    }

    pub(crate) fn remove(&mut self, id: &MarkerId) -> ChunkKey {
        self.locations.remove(id)
    }

    pub(crate) fn relocate(&mut self, id: &MarkerId, key: ChunkKey) {
        let Some(location) = self.locations.get_mut(id) else {
            panic!("Cannot relocate marker {:?}, it is not indexed", id);
        };
        *location = key;
    }
}

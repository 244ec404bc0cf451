use std::collections::HashMap;
use std::hash::Hash;

// CheckedMap
/// A HashMap which panics instead of silently overwriting or ignoring a
/// missing key. Used where a mismatch means bookkeeping is already corrupt.
pub struct CheckedMap<K: Eq + Hash, V> {
    inner: HashMap<K, V>,
}

impl<K: Eq + Hash, V> CheckedMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.inner.contains_key(&key) {
            panic!("CheckedMap already holds this key; remove it before inserting again")
        }

        self.inner.insert(key, value);
    }

    pub fn remove(&mut self, key: &K) -> V {
        let Some(value) = self.inner.remove(key) else {
            panic!("CheckedMap does not hold the key being removed")
        };
        value
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for CheckedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

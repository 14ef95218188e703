use parking_lot::RwLock;

use crate::tree::RadixTree;

/// A [`RadixTree`] guarded by a single readers-writer lock, safe for any mix
/// of concurrent readers and writers.
///
/// Point and scan operations (`get`, `longest_prefix`, `minimum`, `maximum`,
/// `len`, `walk`, `walk_prefix`, `walk_path`) take the read lock; mutations
/// (`insert`, `remove`, `remove_prefix`) take the write lock. Lock
/// acquisition is blocking and un-timed; there is no lock-free or wait-free
/// path and none is planned.
///
/// `walk`/`walk_prefix`/`walk_path` run the caller's callback *while holding
/// the read lock*. Do not call back into the same tree from inside the
/// callback, in particular never call `insert`/`remove`/`remove_prefix` on
/// this same tree from within a walk callback, as that will deadlock.
pub struct ConcurrentRadixTree<V> {
    inner: RwLock<RadixTree<V>>,
}

impl<V> Default for ConcurrentRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConcurrentRadixTree<V> {
    pub fn new() -> Self {
        ConcurrentRadixTree {
            inner: RwLock::new(RadixTree::new()),
        }
    }

    pub fn from_map<K, I>(entries: I) -> Self
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = (K, V)>,
    {
        ConcurrentRadixTree {
            inner: RwLock::new(RadixTree::from_map(entries)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn insert(&self, key: impl AsRef<[u8]>, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn remove(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn remove_prefix(&self, prefix: impl AsRef<[u8]>) -> usize {
        self.inner.write().remove_prefix(prefix)
    }

    pub fn walk<F: FnMut(&[u8], &V) -> bool>(&self, f: F) {
        self.inner.read().walk(f);
    }

    pub fn walk_prefix<F: FnMut(&[u8], &V) -> bool>(&self, prefix: impl AsRef<[u8]>, f: F) {
        self.inner.read().walk_prefix(prefix, f);
    }

    pub fn walk_path<F: FnMut(&[u8], &V) -> bool>(&self, key: impl AsRef<[u8]>, f: F) {
        self.inner.read().walk_path(key, f);
    }
}

impl<V: Clone> ConcurrentRadixTree<V> {
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.read().get(key).cloned()
    }

    pub fn longest_prefix(&self, key: impl AsRef<[u8]>) -> Option<(Vec<u8>, V)> {
        self.inner
            .read()
            .longest_prefix(key)
            .map(|(k, v)| (k, v.clone()))
    }

    pub fn minimum(&self) -> Option<(Vec<u8>, V)> {
        self.inner.read().minimum().map(|(k, v)| (k, v.clone()))
    }

    pub fn maximum(&self) -> Option<(Vec<u8>, V)> {
        self.inner.read().maximum().map(|(k, v)| (k, v.clone()))
    }
}

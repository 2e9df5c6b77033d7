//! Explicit ownership side-table for attached controllers.
//!
//! The attachment layer must never construct two controllers for one root
//! element. Instead of stashing a back-reference on the element itself,
//! ownership lives in this auditable map from element identity to whatever
//! handle the attachment layer keeps per controller.

use std::collections::HashMap;
use std::hash::Hash;

/// Map from element identity to a per-controller handle.
///
/// `claim` refuses double-claims; `release` is the destructor's job and is
/// safe to call on an already-released key.
#[derive(Debug, Default)]
pub struct ControllerRegistry<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> ControllerRegistry<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Claim a root. Returns false (and keeps the existing entry) if the
    /// root already has a controller.
    pub fn claim(&mut self, key: K, value: V) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Release a root's claim, returning its handle if one existed.
    pub fn release(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn is_claimed(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

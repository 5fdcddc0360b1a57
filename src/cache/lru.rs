//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.
//!
//! Hits are the cache's hot path, so every operation here is O(1) amortized:
//! keys live in a doubly-linked list laid out over a slab of nodes, with a
//! `HashMap` giving a direct handle from key to node. A plain `VecDeque`
//! would need a linear scan to re-order a touched key.

use std::collections::HashMap;
use std::hash::Hash;

/// Sentinel index for "no node".
const NIL: usize = usize::MAX;

// == Node ==
#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = most recently used (fresh end)
/// - Tail = least recently used (stale end)
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Key to slab index
    map: HashMap<K, usize>,
    /// Slab of linked-list nodes; `None` slots are free
    slots: Vec<Option<Node<K>>>,
    /// Indices of free slots available for reuse
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }
}

impl<K: Eq + Hash + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as recently used (moves it to the fresh end).
    ///
    /// Unknown keys are inserted at the fresh end.
    pub fn touch(&mut self, key: &K) {
        if let Some(&idx) = self.map.get(key) {
            if self.head == idx {
                return;
            }
            self.unlink(idx);
            self.push_front(idx);
        } else {
            let idx = self.alloc(key.clone());
            self.push_front(idx);
            self.map.insert(key.clone(), idx);
        }
    }

    // == Remove ==
    /// Detaches a key from the ordering. Unknown keys are ignored.
    pub fn remove(&mut self, key: &K) {
        if let Some(idx) = self.map.remove(key) {
            self.unlink(idx);
            self.slots[idx] = None;
            self.free.push(idx);
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used key.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let idx = self.tail;
        if idx == NIL {
            return None;
        }
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.map.remove(&node.key);
        Some(node.key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn oldest(&self) -> Option<&K> {
        self.slots
            .get(self.tail)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    // == Internal Helpers ==
    /// Places a key in a free slot (or grows the slab) and returns its index.
    fn alloc(&mut self, key: K) -> usize {
        let node = Node {
            key,
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Detaches a node from its neighbors without freeing its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        if prev == NIL {
            self.head = next;
        } else if let Some(node) = self.slots[prev].as_mut() {
            node.next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else if let Some(node) = self.slots[next].as_mut() {
            node.prev = prev;
        }
    }

    /// Links a detached node in at the fresh end.
    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head == NIL {
            self.tail = idx;
        } else if let Some(node) = self.slots[old_head].as_mut() {
            node.prev = idx;
        }
        self.head = idx;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut lru: LruTracker<&'static str>) -> Vec<&'static str> {
        let mut order = Vec::new();
        while let Some(key) = lru.pop_oldest() {
            order.push(key);
        }
        order
    }

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<String> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.oldest(), None);
    }

    #[test]
    fn test_lru_touch_new_keys() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key2");
        lru.touch(&"key3");

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.oldest(), Some(&"key1"));
    }

    #[test]
    fn test_lru_touch_existing_key_moves_to_front() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key2");
        lru.touch(&"key3");

        lru.touch(&"key1");

        assert_eq!(lru.len(), 3);
        // key2 is now oldest
        assert_eq!(lru.oldest(), Some(&"key2"));
    }

    #[test]
    fn test_lru_pop_oldest() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key2");
        lru.touch(&"key3");

        assert_eq!(lru.pop_oldest(), Some("key1"));
        assert_eq!(lru.pop_oldest(), Some("key2"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_pop_empty() {
        let mut lru: LruTracker<String> = LruTracker::new();
        assert_eq!(lru.pop_oldest(), None);
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key2");
        lru.touch(&"key3");

        lru.remove(&"key2");

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"key2"));
        assert_eq!(drain(lru), vec!["key1", "key3"]);
    }

    #[test]
    fn test_lru_remove_endpoints() {
        let mut lru = LruTracker::new();

        lru.touch(&"a");
        lru.touch(&"b");
        lru.touch(&"c");

        // Remove the stale end, then the fresh end
        lru.remove(&"a");
        lru.remove(&"c");

        assert_eq!(lru.oldest(), Some(&"b"));
        assert_eq!(drain(lru), vec!["b"]);
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key2");

        lru.remove(&"nonexistent");

        assert_eq!(lru.len(), 2);
        assert!(lru.contains(&"key1"));
        assert!(lru.contains(&"key2"));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        lru.touch(&"a");
        lru.touch(&"b");
        lru.touch(&"c");

        // Re-touch in a different order: eviction order becomes a, c, b
        lru.touch(&"a");
        lru.touch(&"c");
        lru.touch(&"b");

        assert_eq!(drain(lru), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(&"key1");
        lru.touch(&"key1");
        lru.touch(&"key1");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.pop_oldest(), Some("key1"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_slot_reuse_after_pop() {
        let mut lru = LruTracker::new();

        lru.touch(&"a");
        lru.touch(&"b");
        assert_eq!(lru.pop_oldest(), Some("a"));

        // New key should reuse the freed slot without disturbing order
        lru.touch(&"c");
        assert_eq!(lru.slots.len(), 2);
        assert_eq!(drain(lru), vec!["b", "c"]);
    }

    #[test]
    fn test_lru_interleaved_operations_keep_total_order() {
        let mut lru = LruTracker::new();

        lru.touch(&"a");
        lru.touch(&"b");
        lru.touch(&"c");
        lru.touch(&"d");
        lru.remove(&"b");
        lru.touch(&"a");
        assert_eq!(lru.pop_oldest(), Some("c"));
        lru.touch(&"e");

        assert_eq!(drain(lru), vec!["d", "a", "e"]);
    }
}

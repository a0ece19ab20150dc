/// Sentinel slot value for a node that is not currently queued
const ABSENT: usize = usize::MAX;

/// Heap entry pairing a dense node id with its current priority
#[derive(Clone, Copy, Debug)]
struct Entry<P> {
    node: usize,
    priority: P,
}

/// Binary min-heap over (node id, priority) pairs with an auxiliary
/// position index.
///
/// The index maps each node id to its current heap slot, which gives an O(1)
/// membership test and O(log n) decrease-key - the two operations a plain
/// `BinaryHeap` cannot offer without stale-entry workarounds.
///
/// Capacity is fixed at construction to the graph's node count; node ids must
/// stay below it. Ties between equal priorities resolve to whatever order the
/// heap structure yields.
pub struct IndexedMinHeap<P> {
    heap: Vec<Entry<P>>,
    slots: Vec<usize>, // node id -> heap slot, ABSENT when not queued
}

impl<P: Ord + Copy> IndexedMinHeap<P> {
    /// Create an empty heap sized for node ids in `[0, num_nodes)`
    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            heap: Vec::with_capacity(num_nodes),
            slots: vec![ABSENT; num_nodes],
        }
    }

    /// Add a new entry. The node must not already be present.
    pub fn insert(&mut self, node: usize, priority: P) {
        debug_assert!(!self.contains(node), "node {node} already queued");

        self.heap.push(Entry { node, priority });
        self.slots[node] = self.heap.len() - 1;
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the entry with the smallest priority,
    /// or None if the heap is empty
    pub fn pop_min(&mut self) -> Option<(usize, P)> {
        let min = *self.heap.first()?;
        self.slots[min.node] = ABSENT;

        // Move the last entry into the root and restore heap order
        let last = self.heap.pop().expect("heap is non-empty");
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.slots[last.node] = 0;
            self.sift_down(0);
        }

        Some((min.node, min.priority))
    }

    /// Lower the priority of a queued node and restore heap order.
    /// The node must be present with a priority >= `priority`.
    pub fn decrease_key(&mut self, node: usize, priority: P) {
        let slot = self.slots[node];
        debug_assert!(slot != ABSENT, "node {node} is not queued");
        debug_assert!(
            priority <= self.heap[slot].priority,
            "decrease_key must not raise a priority"
        );

        self.heap[slot].priority = priority;
        self.sift_up(slot);
    }

    /// O(1) membership test via the position index
    pub fn contains(&self, node: usize) -> bool {
        self.slots[node] != ABSENT
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Swap an entry with its parent while the parent's priority is
    /// strictly greater
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[parent].priority <= self.heap[slot].priority {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    /// Swap an entry with its smaller child while a child's priority is
    /// strictly less
    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;

            if left < self.heap.len() && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].node] = a;
        self.slots[self.heap[b].node] = b;
    }

    /// Check the min-heap property and heap/index consistency.
    /// Test-only; both are structural invariants between operations.
    #[cfg(test)]
    fn assert_invariants(&self) {
        for (slot, entry) in self.heap.iter().enumerate() {
            assert_eq!(self.slots[entry.node], slot, "slot index out of sync");
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            if left < self.heap.len() {
                assert!(entry.priority <= self.heap[left].priority, "heap order violated");
            }
            if right < self.heap.len() {
                assert!(entry.priority <= self.heap[right].priority, "heap order violated");
            }
        }
        let queued = self.slots.iter().filter(|&&s| s != ABSENT).count();
        assert_eq!(queued, self.heap.len(), "position index counts a ghost entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pop_min_yields_non_decreasing_priorities() {
        let mut heap = IndexedMinHeap::with_capacity(8);
        for (node, priority) in [(0, 50u32), (1, 10), (2, 30), (3, 20), (4, 40)] {
            heap.insert(node, priority);
        }

        let mut popped = Vec::new();
        while let Some((_, priority)) = heap.pop_min() {
            popped.push(priority);
        }

        assert_eq!(popped, vec![10, 20, 30, 40, 50]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_pop_min_on_empty_heap() {
        let mut heap: IndexedMinHeap<u32> = IndexedMinHeap::with_capacity(4);
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn test_decrease_key_reorders_extraction() {
        let mut heap = IndexedMinHeap::with_capacity(4);
        heap.insert(0, 10u32);
        heap.insert(1, 20);
        heap.insert(2, 30);

        // Node 2 jumps to the front of the queue
        heap.decrease_key(2, 5);

        assert_eq!(heap.pop_min(), Some((2, 5)));
        assert_eq!(heap.pop_min(), Some((0, 10)));
        assert_eq!(heap.pop_min(), Some((1, 20)));
    }

    #[test]
    fn test_contains_tracks_membership() {
        let mut heap = IndexedMinHeap::with_capacity(3);
        assert!(!heap.contains(1));

        heap.insert(1, 7u32);
        assert!(heap.contains(1));
        assert_eq!(heap.len(), 1);

        heap.pop_min();
        assert!(!heap.contains(1));
    }

    #[test]
    #[should_panic(expected = "decrease_key must not raise a priority")]
    fn test_decrease_key_rejects_priority_increase() {
        let mut heap = IndexedMinHeap::with_capacity(2);
        heap.insert(0, 5u32);
        heap.decrease_key(0, 9);
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn test_insert_rejects_duplicate_node() {
        let mut heap = IndexedMinHeap::with_capacity(2);
        heap.insert(0, 5u32);
        heap.insert(0, 3);
    }

    /// Run a random sequence of inserts, decreases and pops, checking the
    /// heap order and position-index invariants after every operation
    #[test]
    fn test_invariants_hold_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 64;
        let mut heap = IndexedMinHeap::with_capacity(n);

        for _ in 0..2000 {
            let node = rng.random_range(0..n);
            if heap.contains(node) {
                if rng.random_bool(0.5) {
                    // Decrease to some value at or below the current priority
                    let slot = heap.slots[node];
                    let current = heap.heap[slot].priority;
                    heap.decrease_key(node, rng.random_range(0..=current));
                } else {
                    heap.pop_min();
                }
            } else {
                heap.insert(node, rng.random_range(0..1000u32));
            }
            heap.assert_invariants();
        }

        // Drain what's left; priorities must come out sorted
        let mut last = 0;
        while let Some((_, priority)) = heap.pop_min() {
            heap.assert_invariants();
            assert!(priority >= last);
            last = priority;
        }
    }
}

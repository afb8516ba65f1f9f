use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    rc::Rc,
};

use radix_heap::RadixHeapMap;

use super::label::Label;
use crate::graphs::{Distance, VertexId};

/// A priority queue of vertices keyed by distance, as used by Dijkstra's
/// algorithm. Implementations do not support decrease key, a vertex may be
/// popped more than once.
pub trait VertexDistanceQueue {
    fn clear(&mut self);

    fn insert(&mut self, vertex: VertexId, distance: Distance);

    /// Removes and returns the vertex with the smallest distance.
    fn pop(&mut self) -> Option<(VertexId, Distance)>;
}

/// Requires that inserted distances are never smaller than the last popped
/// one, which holds for Dijkstra with non-negative weights.
pub struct VertexDistanceQueueRadixHeap {
    heap: RadixHeapMap<i64, VertexId>,
}

impl Default for VertexDistanceQueueRadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueRadixHeap {
    pub fn new() -> Self {
        VertexDistanceQueueRadixHeap {
            heap: RadixHeapMap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueRadixHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Distance) {
        self.heap.push(-(distance as i64), vertex);
    }

    fn pop(&mut self) -> Option<(VertexId, Distance)> {
        self.heap
            .pop()
            .map(|(negative_distance, vertex)| (vertex, (-negative_distance) as Distance))
    }
}

pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<Reverse<(Distance, VertexId)>>,
}

impl Default for VertexDistanceQueueBinaryHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Distance) {
        self.heap.push(Reverse((distance, vertex)));
    }

    fn pop(&mut self) -> Option<(VertexId, Distance)> {
        let Reverse((distance, vertex)) = self.heap.pop()?;

        Some((vertex, distance))
    }
}

/// Queue entry of the label setting search. Holding the entry keeps the label
/// and its whole ancestor chain alive.
pub struct LabelQueueElement {
    pub label: Rc<Label>,
    pub sequence: u64,
}

impl LabelQueueElement {
    pub fn new(label: Rc<Label>, sequence: u64) -> LabelQueueElement {
        LabelQueueElement { label, sequence }
    }

    fn priority(&self) -> (Distance, Distance, u64) {
        (self.label.key(), self.label.weight(), self.sequence)
    }
}

impl PartialEq for LabelQueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.priority() == other.priority()
    }
}

impl Eq for LabelQueueElement {}

// The priority queue depends on `Ord`. The ordering is flipped so that the
// max-heap pops the smallest key first. Ties go to the smaller weight and then
// to the element inserted first.
impl Ord for LabelQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority().cmp(&self.priority())
    }
}

impl PartialOrd for LabelQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

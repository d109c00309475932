//! Indexed k-ary max-heap keyed by vertex id
//!
//! This module implements the priority queue behind widest-path search. The
//! heap stores vertex ids from a fixed universe `[0, capacity)`; each vertex
//! owns one priority slot that persists whether or not the vertex is queued,
//! and a dense position table maps every vertex to its heap slot so that
//! membership and priority lookups are O(1).
//!
//! # Structure
//! Slot `i` has children `k*i + 1 ..= k*i + k` and parent `(i - 1) / k`.
//! Larger fan-out gives a shallower tree: sift-up touches `log_k n` levels
//! while sift-down scans `k` children per level.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use crate::data_structures::graph::{Capacity, VertexId};

/// Heap priority; widest-path search stores bottleneck values here
pub type Priority = Capacity;

/// Heap operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("heap fan-out must be at least 2, got {0}")]
    InvalidArity(usize),

    #[error("heap is empty")]
    Empty,

    #[error("heap slot {slot} out of range for heap of size {len}")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("heap property violated between slot {parent} and child slot {child}")]
    InvariantViolation { parent: usize, child: usize },

    #[error("vertex {vertex} sits in slot {slot} but the position table disagrees")]
    PositionMismatch { vertex: VertexId, slot: usize },
}

/// Max-heap over vertex ids with configurable fan-out
#[derive(Debug, Clone)]
pub struct KAryHeap {
    /// Children per node
    arity: usize,
    /// Heap-ordered vertex ids; only the first `len` slots are live
    slots: Vec<VertexId>,
    /// Vertex id -> heap slot, `None` when absent
    positions: Vec<Option<usize>>,
    /// Vertex id -> stored priority
    priorities: Vec<Priority>,
}

impl KAryHeap {
    /// Create a heap over vertex ids `[0, capacity)` with `arity` children per node
    pub fn new(capacity: usize, arity: usize) -> Result<Self, HeapError> {
        if arity < 2 {
            return Err(HeapError::InvalidArity(arity));
        }
        Ok(Self::with_checked_arity(capacity, arity))
    }

    /// Construct with an arity the caller has already validated
    pub(crate) fn with_checked_arity(capacity: usize, arity: usize) -> Self {
        debug_assert!(arity >= 2, "heap fan-out {arity} below 2");
        Self {
            arity,
            slots: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
            priorities: vec![0; capacity],
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Size of the vertex universe
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_in_heap(&self, vertex: VertexId) -> bool {
        self.positions[vertex].is_some()
    }

    /// Stored priority of `vertex`, queued or not
    #[inline]
    pub fn priority(&self, vertex: VertexId) -> Priority {
        self.priorities[vertex]
    }

    /// Overwrite the stored priority of a vertex that is not queued.
    ///
    /// Use [`update`](Self::update) for queued vertices; changing a queued
    /// priority here would leave the heap out of order.
    pub fn set_priority(&mut self, vertex: VertexId, priority: Priority) {
        debug_assert!(!self.is_in_heap(vertex), "set_priority on queued vertex {vertex}");
        self.priorities[vertex] = priority;
    }

    /// Vertex with the largest priority, without removing it
    pub fn peek_max(&self) -> Option<VertexId> {
        self.slots.first().copied()
    }

    /// Queue `vertex` with its stored priority
    pub fn insert(&mut self, vertex: VertexId) {
        debug_assert!(!self.is_in_heap(vertex), "vertex {vertex} inserted twice");

        let slot = self.slots.len();
        self.slots.push(vertex);
        self.positions[vertex] = Some(slot);
        self.sift_up(slot);
    }

    /// Remove and return the vertex with the largest priority
    pub fn extract_max(&mut self) -> Result<VertexId, HeapError> {
        if self.is_empty() {
            return Err(HeapError::Empty);
        }
        self.delete_at(0)
    }

    /// Remove the vertex with the largest priority
    pub fn delete_max(&mut self) -> Result<(), HeapError> {
        self.extract_max().map(|_| ())
    }

    /// Set the priority of `vertex`, queuing it if absent.
    ///
    /// A queued vertex sifts up when its priority grows and down when it
    /// shrinks.
    pub fn update(&mut self, vertex: VertexId, priority: Priority) {
        let old = self.priorities[vertex];
        self.priorities[vertex] = priority;

        match self.positions[vertex] {
            None => self.insert(vertex),
            Some(slot) if priority > old => self.sift_up(slot),
            Some(slot) if priority < old => self.sift_down(slot),
            Some(_) => {}
        }
    }

    /// Remove the element at heap slot `slot` and return its vertex.
    ///
    /// The last element takes its place and moves up or down as needed.
    pub fn delete_at(&mut self, slot: usize) -> Result<VertexId, HeapError> {
        let len = self.slots.len();
        if slot >= len {
            return Err(HeapError::SlotOutOfRange { slot, len });
        }

        let removed = self.slots.swap_remove(slot);
        self.positions[removed] = None;

        if slot < self.slots.len() {
            let moved = self.slots[slot];
            self.positions[moved] = Some(slot);

            if slot > 0 && self.priority_at(slot) > self.priority_at(self.parent(slot)) {
                self.sift_up(slot);
            } else {
                self.sift_down(slot);
            }
        }

        Ok(removed)
    }

    /// Check the heap property and the position table.
    ///
    /// Returns the first stale position entry or parent/child pair out of order.
    pub fn validate(&self) -> Result<(), HeapError> {
        for (slot, &vertex) in self.slots.iter().enumerate() {
            if self.positions[vertex] != Some(slot) {
                return Err(HeapError::PositionMismatch { vertex, slot });
            }
            if slot > 0 {
                let parent = self.parent(slot);
                if self.priority_at(parent) < self.priority_at(slot) {
                    return Err(HeapError::InvariantViolation {
                        parent,
                        child: slot,
                    });
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn parent(&self, slot: usize) -> usize {
        (slot - 1) / self.arity
    }

    #[inline]
    fn first_child(&self, slot: usize) -> usize {
        self.arity * slot + 1
    }

    #[inline]
    fn priority_at(&self, slot: usize) -> Priority {
        self.priorities[self.slots[slot]]
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.positions[self.slots[a]] = Some(a);
        self.positions[self.slots[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = self.parent(slot);
            if self.priority_at(parent) >= self.priority_at(slot) {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.slots.len();

        loop {
            let first = self.first_child(slot);
            if first >= len {
                break;
            }

            // Ties keep the lowest slot so traversal order is reproducible
            let last = (first + self.arity).min(len);
            let mut largest = first;
            for child in first + 1..last {
                if self.priority_at(child) > self.priority_at(largest) {
                    largest = child;
                }
            }

            if self.priority_at(largest) <= self.priority_at(slot) {
                break;
            }
            self.swap_slots(slot, largest);
            slot = largest;
        }
    }
}

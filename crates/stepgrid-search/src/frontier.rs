//! The set of discovered but not yet expanded nodes.

use std::collections::{BinaryHeap, VecDeque};

/// How the frontier chooses the next node to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Discipline {
    /// First in, first out.
    Fifo,
    /// Smallest key first, ties by insertion order.
    MinKey,
}

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// key first and, among equal keys, the earliest insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    key: i32,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

enum Queue {
    Fifo(VecDeque<usize>),
    Heap(BinaryHeap<Entry>),
}

/// Frontier over the flat node indices of one graph.
///
/// A node is pending from [`push`](Self::push) until it is popped or the
/// frontier is cleared. Lowering a pending node's key pushes a fresh heap
/// entry that keeps the node's original insertion sequence; the superseded
/// entry is dropped lazily when it surfaces.
pub(crate) struct Frontier {
    queue: Queue,
    keys: Vec<i32>,
    seqs: Vec<u64>,
    pending: Vec<bool>,
    live: usize,
    next_seq: u64,
}

impl Frontier {
    /// Create an empty frontier for a graph of `len` nodes.
    pub(crate) fn new(discipline: Discipline, len: usize) -> Self {
        let queue = match discipline {
            Discipline::Fifo => Queue::Fifo(VecDeque::new()),
            Discipline::MinKey => Queue::Heap(BinaryHeap::new()),
        };
        Self {
            queue,
            keys: vec![0; len],
            seqs: vec![0; len],
            pending: vec![false; len],
            live: 0,
            next_seq: 0,
        }
    }

    /// Insert `idx` with priority `key`. Each node enters at most once per run.
    pub(crate) fn push(&mut self, idx: usize, key: i32) {
        debug_assert!(!self.pending[idx], "node {idx} pushed twice");
        self.pending[idx] = true;
        self.keys[idx] = key;
        self.seqs[idx] = self.next_seq;
        self.next_seq += 1;
        self.live += 1;
        match &mut self.queue {
            Queue::Fifo(q) => q.push_back(idx),
            Queue::Heap(h) => h.push(Entry {
                key,
                seq: self.seqs[idx],
                idx,
            }),
        }
    }

    /// Lower the key of a pending node. Ignored for nodes that are not
    /// pending or when `key` is not smaller than the current one.
    pub(crate) fn decrease(&mut self, idx: usize, key: i32) {
        if !self.pending[idx] || key >= self.keys[idx] {
            return;
        }
        self.keys[idx] = key;
        if let Queue::Heap(h) = &mut self.queue {
            h.push(Entry {
                key,
                seq: self.seqs[idx],
                idx,
            });
        }
    }

    /// Remove and return the next node to expand.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let idx = match &mut self.queue {
            Queue::Fifo(q) => q.pop_front()?,
            Queue::Heap(h) => loop {
                let e = h.pop()?;
                if self.pending[e.idx] && self.keys[e.idx] == e.key {
                    break e.idx;
                }
            },
        };
        self.pending[idx] = false;
        self.live -= 1;
        Some(idx)
    }

    /// Drop every pending node.
    pub(crate) fn clear(&mut self) {
        match &mut self.queue {
            Queue::Fifo(q) => q.clear(),
            Queue::Heap(h) => h.clear(),
        }
        self.pending.fill(false);
        self.live = 0;
    }

    /// Number of pending nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.pending.get(idx).copied().unwrap_or(false)
    }
}

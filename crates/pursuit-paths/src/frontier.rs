use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pursuit_core::Cell;

/// One open-set entry: a cell queued with the f-score it had when pushed.
///
/// Ordered by `f` ascending, then by insertion sequence ascending, so equal
/// scores pop first-in first-out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrontierEntry {
    pub f: i32,
    pub seq: u64,
    pub cell: Cell,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary-heap open set with lazy deletion.
///
/// Relaxing a cell pushes a second, cheaper entry instead of updating the
/// existing one. The superseded entry stays in the heap and is discarded
/// when it surfaces in [`Frontier::pop_min`], by comparing its score with
/// the authoritative best score the caller keeps for that cell.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    stale_skipped: usize,
    peak_len: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cell` with score `f`.
    pub fn push(&mut self, cell: Cell, f: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { f, seq, cell });
        self.peak_len = self.peak_len.max(self.heap.len());
    }

    /// Pop the live entry with the smallest score.
    ///
    /// `best_f` returns the authoritative best f-score of a cell, or `None`
    /// if the cell has no recorded score. Entries whose score is worse than
    /// the authoritative one are stale and are dropped without being
    /// returned. Returns `None` once no live entry remains.
    pub fn pop_min(&mut self, best_f: impl Fn(Cell) -> Option<i32>) -> Option<Cell> {
        while let Some(entry) = self.heap.pop() {
            match best_f(entry.cell) {
                Some(best) if entry.f > best => self.stale_skipped += 1,
                _ => return Some(entry.cell),
            }
        }
        None
    }

    /// Number of entries in the heap, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Stale entries discarded so far.
    #[inline]
    pub fn stale_skipped(&self) -> usize {
        self.stale_skipped
    }

    /// Largest heap size observed.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}

use std::collections::BinaryHeap;
use std::fmt;

use skyplan_core::Cell;

/// Cumulative path cost.
pub type Cost = u32;

/// Heap entry ordered by cost, then by insertion sequence. The cell does
/// not take part in comparisons.
#[derive(Clone, Copy)]
struct Entry {
    cost: Cost,
    seq: u64,
    cell: Cell,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first, and
        // among equal costs the earliest push.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of `(cost, cell)` pairs awaiting expansion.
///
/// Entries with equal cost come out in the order they were pushed, so two
/// searches over the same input expand cells in the same order.
#[derive(Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cell` at cumulative cost `cost`.
    pub fn push(&mut self, cost: Cost, cell: Cell) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { cost, seq, cell });
    }

    /// Remove and return the cheapest entry.
    pub fn pop_min(&mut self) -> Result<(Cost, Cell), EmptyFrontier> {
        self.heap
            .pop()
            .map(|e| (e.cost, e.cell))
            .ok_or(EmptyFrontier)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl fmt::Debug for Frontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.heap.len())
            .field("pushed", &self.next_seq)
            .finish()
    }
}

/// Returned by [`Frontier::pop_min`] when nothing is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pop from an empty frontier")
    }
}

impl std::error::Error for EmptyFrontier {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_cheapest_first() {
        let mut f = Frontier::new();
        f.push(3, Cell::new(0, 3));
        f.push(1, Cell::new(0, 1));
        f.push(2, Cell::new(0, 2));
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop_min(), Ok((1, Cell::new(0, 1))));
        assert_eq!(f.pop_min(), Ok((2, Cell::new(0, 2))));
        assert_eq!(f.pop_min(), Ok((3, Cell::new(0, 3))));
        assert!(f.is_empty());
    }

    #[test]
    fn equal_costs_are_fifo() {
        let mut f = Frontier::new();
        // Pushed in an order that differs from the cells' own ordering.
        let cells = [Cell::new(4, 4), Cell::new(0, 0), Cell::new(2, 1), Cell::new(1, 9)];
        for c in cells {
            f.push(5, c);
        }
        f.push(4, Cell::new(9, 9));
        assert_eq!(f.pop_min(), Ok((4, Cell::new(9, 9))));
        for c in cells {
            assert_eq!(f.pop_min(), Ok((5, c)));
        }
    }

    #[test]
    fn fifo_survives_interleaving() {
        let mut f = Frontier::new();
        f.push(1, Cell::new(0, 0));
        f.push(1, Cell::new(0, 1));
        assert_eq!(f.pop_min().unwrap().1, Cell::new(0, 0));
        f.push(1, Cell::new(0, 2));
        f.push(0, Cell::new(0, 3));
        assert_eq!(f.pop_min().unwrap().1, Cell::new(0, 3));
        assert_eq!(f.pop_min().unwrap().1, Cell::new(0, 1));
        assert_eq!(f.pop_min().unwrap().1, Cell::new(0, 2));
    }

    #[test]
    fn empty_pop_fails() {
        let mut f = Frontier::new();
        assert_eq!(f.pop_min(), Err(EmptyFrontier));
        f.push(0, Cell::ZERO);
        assert!(f.pop_min().is_ok());
        assert_eq!(f.pop_min(), Err(EmptyFrontier));
    }

    #[test]
    fn entry_equality_agrees_with_ordering() {
        let a = Entry { cost: 2, seq: 7, cell: Cell::new(0, 0) };
        let b = Entry { cost: 2, seq: 7, cell: Cell::new(5, 5) };
        let c = Entry { cost: 2, seq: 8, cell: Cell::new(0, 0) };
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert!(a == b);
        assert!(a != c);
        assert!(a > c);
    }
}

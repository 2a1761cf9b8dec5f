use skyplan_core::{Bounds, Cell};

use crate::action::Action;
use crate::frontier::Cost;

/// How a cell was first reached: cumulative cost, predecessor, and the move
/// taken from the predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub cost: Cost,
    pub parent: Cell,
    pub action: Action,
}

/// Predecessor map filled in by the search, one entry per discovered cell
/// (the start cell has none).
///
/// Storage is a flat array over the grid bounds.
#[derive(Debug, Clone)]
pub struct BranchMap {
    bounds: Bounds,
    entries: Vec<Option<Branch>>,
    len: usize,
}

impl BranchMap {
    /// An empty map covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            entries: vec![None; bounds.len()],
            len: 0,
        }
    }

    /// Record how `cell` was reached.
    ///
    /// Each cell is recorded at most once; returns `false` (leaving the
    /// first entry untouched) if `cell` already has an entry or lies
    /// outside the map.
    pub fn insert(&mut self, cell: Cell, branch: Branch) -> bool {
        let Some(i) = self.bounds.index(cell) else {
            return false;
        };
        if self.entries[i].is_some() {
            return false;
        }
        self.entries[i] = Some(branch);
        self.len += 1;
        true
    }

    /// The entry for `cell`, if it was discovered.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&Branch> {
        self.bounds.index(cell).and_then(|i| self.entries[i].as_ref())
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Number of recorded cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Walk `branch` back from `goal` to `start` and return the moves in
/// travel order.
///
/// Returns an empty sequence when `start == goal`.
///
/// # Panics
///
/// Panics if the chain from `goal` is broken or loops, which can only
/// happen if `branch` did not come from a successful search.
pub fn reconstruct(branch: &BranchMap, start: Cell, goal: Cell) -> Vec<Action> {
    if start == goal {
        return Vec::new();
    }
    let mut actions = Vec::new();
    let mut cell = goal;
    loop {
        let Some(b) = branch.get(cell) else {
            panic!("branch map has no entry for {cell} while tracing {goal} back to {start}");
        };
        actions.push(b.action);
        assert!(
            actions.len() <= branch.len(),
            "branch map loops while tracing {goal} back to {start}"
        );
        if b.parent == start {
            break;
        }
        cell = b.parent;
    }
    actions.reverse();
    actions
}

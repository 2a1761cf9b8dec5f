use std::collections::VecDeque;

use skyplan_core::{Bounds, Cell};

use crate::frontier::Cost;
use crate::traits::Occupancy;

/// Sentinel stored for cells the BFS never reached.
const UNREACHABLE: Cost = Cost::MAX;

/// Hop distances from a single source, as computed by [`bfs_distances`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    source: Cell,
    bounds: Bounds,
    dist: Vec<Cost>,
}

impl DistanceMap {
    /// The cell distances are measured from.
    pub fn source(&self) -> Cell {
        self.source
    }

    /// Distance to `cell`, or `None` if it is blocked, unreachable, or out
    /// of bounds.
    pub fn get(&self, cell: Cell) -> Option<Cost> {
        self.bounds
            .index(cell)
            .map(|i| self.dist[i])
            .filter(|&d| d != UNREACHABLE)
    }

    /// Number of reachable cells, the source included.
    pub fn reachable(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }
}

/// Breadth-first hop distances from `source` to every free cell reachable
/// through edge-adjacent moves.
///
/// This walks the grid with [`Cell::neighbors_4`] and knows nothing about
/// the action table or the frontier, so it can serve as an independent
/// check on the uniform-cost search. A blocked or out-of-bounds source
/// reaches nothing.
pub fn bfs_distances<O: Occupancy + ?Sized>(grid: &O, source: Cell) -> DistanceMap {
    let bounds = grid.bounds();
    let mut dist = vec![UNREACHABLE; bounds.len()];
    let mut queue: VecDeque<Cell> = VecDeque::new();

    if let Some(si) = bounds.index(source).filter(|_| grid.is_free(source)) {
        dist[si] = 0;
        queue.push_back(source);
    }

    while let Some(c) = queue.pop_front() {
        let Some(ci) = bounds.index(c) else {
            continue;
        };
        let d = dist[ci];
        for n in c.neighbors_4() {
            if !grid.is_free(n) {
                continue;
            }
            let Some(ni) = bounds.index(n) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = d + 1;
            queue.push_back(n);
        }
    }

    DistanceMap {
        source,
        bounds,
        dist,
    }
}

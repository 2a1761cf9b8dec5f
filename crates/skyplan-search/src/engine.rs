use std::fmt;

use skyplan_core::Cell;

use crate::action::legal_actions;
use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::plan::Plan;
use crate::reconstruct::{Branch, BranchMap, reconstruct};
use crate::traits::Occupancy;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for [`UniformCost`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Give up after expanding this many cells. `None` searches until the
    /// frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Cap the number of expanded cells (builder).
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a start or goal cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "outside the grid"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Errors returned by [`UniformCost::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start cell cannot be searched from.
    InvalidStart { cell: Cell, reason: Rejection },
    /// The goal cell cannot be reached by construction.
    InvalidGoal { cell: Cell, reason: Rejection },
    /// Every cell reachable from the start was expanded without meeting
    /// the goal.
    NoPathFound { start: Cell, goal: Cell },
    /// The configured expansion cap was hit before the goal was found.
    ExpansionLimit { limit: usize },
}

impl SearchError {
    /// Whether the error means "no route" rather than bad input.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::NoPathFound { .. } | Self::ExpansionLimit { .. })
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart { cell, reason } => write!(f, "invalid start {cell}: {reason}"),
            Self::InvalidGoal { cell, reason } => write!(f, "invalid goal {cell}: {reason}"),
            Self::NoPathFound { start, goal } => write!(f, "no path from {start} to {goal}"),
            Self::ExpansionLimit { limit } => {
                write!(f, "gave up after expanding {limit} cells")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// UniformCost
// ---------------------------------------------------------------------------

/// Uniform-cost search over a 4-connected occupancy grid.
///
/// Every move costs the same, so the first time a cell is discovered its
/// recorded cost is already minimal. The engine therefore marks cells
/// visited when they are pushed, not when they are popped, and never
/// revisits them. Supporting moves of different costs requires marking
/// cells settled on extraction instead.
///
/// The engine holds only configuration; the frontier, visited set and
/// branch map are created fresh for each call, so one engine (and one
/// grid) may serve any number of searches, including concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct UniformCost {
    config: SearchConfig,
}

impl UniformCost {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find a minimum-cost route from `start` to `goal`.
    ///
    /// Both endpoints must be inside the grid and free. Returns an empty
    /// plan when they coincide.
    pub fn search<O: Occupancy + ?Sized>(
        &self,
        grid: &O,
        start: Cell,
        goal: Cell,
    ) -> Result<Plan, SearchError> {
        check_endpoint(grid, start)
            .map_err(|reason| SearchError::InvalidStart { cell: start, reason })?;
        check_endpoint(grid, goal)
            .map_err(|reason| SearchError::InvalidGoal { cell: goal, reason })?;

        if start == goal {
            return Ok(Plan::empty());
        }

        let branch = self.explore(grid, start, goal)?;
        let actions = reconstruct(&branch, start, goal);
        let plan = Plan::from_actions(actions);
        debug_assert_eq!(
            branch.get(goal).map(|b| b.cost),
            Some(plan.cost()),
            "recorded goal cost disagrees with the reconstructed route"
        );
        log::debug!(
            "route {start} -> {goal}: cost {} ({} over straight-line)",
            plan.cost(),
            plan.cost().saturating_sub(manhattan(start, goal))
        );
        Ok(plan)
    }

    /// Run the expansion loop and return the branch map once `goal` is
    /// popped.
    fn explore<O: Occupancy + ?Sized>(
        &self,
        grid: &O,
        start: Cell,
        goal: Cell,
    ) -> Result<BranchMap, SearchError> {
        let bounds = grid.bounds();
        let mut frontier = Frontier::new();
        let mut visited = vec![false; bounds.len()];
        let mut branch = BranchMap::new(bounds);
        let mut expanded = 0usize;

        frontier.push(0, start);
        if let Some(si) = bounds.index(start) {
            visited[si] = true;
        }

        let found = 'search: loop {
            let Ok((cost, cell)) = frontier.pop_min() else {
                break 'search false;
            };

            if cell == goal {
                break 'search true;
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    log::debug!(
                        "search {start} -> {goal} hit the {limit}-cell expansion cap \
                         with {} cells queued",
                        frontier.len()
                    );
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            expanded += 1;

            for action in legal_actions(grid, cell) {
                let next = action.apply(cell);
                let Some(ni) = bounds.index(next) else {
                    continue;
                };
                if visited[ni] {
                    continue;
                }
                visited[ni] = true;
                let next_cost = cost + action.cost();
                frontier.push(next_cost, next);
                branch.insert(
                    next,
                    Branch {
                        cost: next_cost,
                        parent: cell,
                        action,
                    },
                );
            }
        };

        log::trace!(
            "search {start} -> {goal}: expanded {expanded}, discovered {}",
            branch.len() + 1
        );

        if !found {
            log::debug!("no path from {start} to {goal} after expanding {expanded} cells");
            return Err(SearchError::NoPathFound { start, goal });
        }
        Ok(branch)
    }
}

fn check_endpoint<O: Occupancy + ?Sized>(grid: &O, cell: Cell) -> Result<(), Rejection> {
    match grid.is_blocked(cell) {
        Err(_) => Err(Rejection::OutOfBounds),
        Ok(true) => Err(Rejection::Blocked),
        Ok(false) => Ok(()),
    }
}

/// Find a minimum-cost route with the default [`SearchConfig`].
pub fn search<O: Occupancy + ?Sized>(grid: &O, start: Cell, goal: Cell) -> Result<Plan, SearchError> {
    UniformCost::default().search(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action::{self, *};
    use skyplan_core::{GridBuilder, Layout, OccupancyGrid};

    fn walk(grid: &OccupancyGrid, start: Cell, actions: &[Action]) -> Cell {
        let mut c = start;
        for a in actions {
            c = a.apply(c);
            assert!(grid.is_free(c), "route crosses {c}");
        }
        c
    }

    #[test]
    fn straight_corridor() {
        let g = OccupancyGrid::new(1, 5);
        let plan = search(&g, Cell::new(0, 0), Cell::new(0, 4)).unwrap();
        assert_eq!(plan.actions(), &[Right, Right, Right, Right]);
        assert_eq!(plan.cost(), 4);
    }

    #[test]
    fn start_equals_goal() {
        let g = OccupancyGrid::new(3, 3);
        let plan = search(&g, Cell::new(1, 1), Cell::new(1, 1)).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.cost(), 0);
    }

    #[test]
    fn tie_break_prefers_up_down_before_left_right() {
        // Both "down then right" and "right then down" cost 2; Down is
        // expanded before Right, so the vertical-first route wins.
        let g = OccupancyGrid::new(2, 2);
        let plan = search(&g, Cell::new(0, 0), Cell::new(1, 1)).unwrap();
        assert_eq!(plan.actions(), &[Down, Right]);
    }

    #[test]
    fn detours_around_wall() {
        let l = Layout::parse(
            "
S#.
.#.
...",
        )
        .unwrap();
        let g = l.grid();
        let goal = Cell::new(0, 2);
        let plan = search(g, Cell::new(0, 0), goal).unwrap();
        assert_eq!(plan.cost(), 6);
        assert_eq!(walk(g, Cell::new(0, 0), plan.actions()), goal);
    }

    #[test]
    fn invalid_start_out_of_bounds() {
        let g = OccupancyGrid::new(2, 2);
        let err = search(&g, Cell::new(-1, 0), Cell::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidStart {
                cell: Cell::new(-1, 0),
                reason: Rejection::OutOfBounds,
            }
        );
        assert!(!err.is_unreachable());
    }

    #[test]
    fn invalid_goal_blocked() {
        let mut b = GridBuilder::new(2, 2);
        b.block(Cell::new(1, 1));
        let err = search(&b.build(), Cell::new(0, 0), Cell::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidGoal {
                cell: Cell::new(1, 1),
                reason: Rejection::Blocked,
            }
        );
    }

    #[test]
    fn start_checked_before_goal() {
        let g = OccupancyGrid::new(2, 2);
        let err = search(&g, Cell::new(5, 5), Cell::new(6, 6)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidStart { .. }));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let l = Layout::parse(
            "
S....
..###
..#G#
..###",
        )
        .unwrap();
        let err = search(l.grid(), Cell::new(0, 0), Cell::new(2, 3)).unwrap_err();
        assert_eq!(
            err,
            SearchError::NoPathFound {
                start: Cell::new(0, 0),
                goal: Cell::new(2, 3),
            }
        );
        assert!(err.is_unreachable());
    }

    #[test]
    fn expansion_cap() {
        let g = OccupancyGrid::new(10, 10);
        let engine = UniformCost::new(SearchConfig::default().with_max_expansions(5));
        let err = engine
            .search(&g, Cell::new(0, 0), Cell::new(9, 9))
            .unwrap_err();
        assert_eq!(err, SearchError::ExpansionLimit { limit: 5 });
        assert!(err.is_unreachable());

        // A generous cap does not change the result.
        let engine = UniformCost::new(SearchConfig::default().with_max_expansions(1000));
        let plan = engine.search(&g, Cell::new(0, 0), Cell::new(9, 9)).unwrap();
        assert_eq!(plan.cost(), 18);
    }

    #[test]
    fn cap_of_zero_allows_trivial_search() {
        let g = OccupancyGrid::new(2, 2);
        let engine = UniformCost::new(SearchConfig::default().with_max_expansions(0));
        assert!(engine.search(&g, Cell::ZERO, Cell::ZERO).unwrap().is_empty());
    }

    #[test]
    fn error_messages() {
        let e = SearchError::InvalidGoal {
            cell: Cell::new(1, 2),
            reason: Rejection::Blocked,
        };
        assert_eq!(e.to_string(), "invalid goal (1, 2): blocked");
        let e = SearchError::NoPathFound {
            start: Cell::new(0, 0),
            goal: Cell::new(3, 3),
        };
        assert_eq!(e.to_string(), "no path from (0, 0) to (3, 3)");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_defaults_when_fields_missing() {
        let cfg: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SearchConfig::default());
        let cfg: SearchConfig = serde_json::from_str(r#"{"max_expansions":12}"#).unwrap();
        assert_eq!(cfg.max_expansions, Some(12));
    }
}

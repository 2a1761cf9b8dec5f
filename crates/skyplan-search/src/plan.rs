use skyplan_core::Cell;

use crate::action::Action;
use crate::frontier::Cost;
use crate::prune::prune_collinear;

/// A route found by the search: the moves from start to goal and their
/// total cost.
///
/// A plan does not remember its start cell; methods that trace the route
/// take it as an argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Action>", into = "Vec<Action>")
)]
pub struct Plan {
    actions: Vec<Action>,
    cost: Cost,
}

impl Plan {
    /// A plan for `start == goal`: no moves, cost 0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a plan from a move sequence, summing the move costs.
    pub fn from_actions(actions: Vec<Action>) -> Self {
        let cost = actions.iter().map(|a| a.cost()).sum();
        Self { actions, cost }
    }

    /// The moves, in travel order.
    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[inline]
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    /// Total cost of the route.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Where the route ends when followed from `start`.
    pub fn end(&self, start: Cell) -> Cell {
        self.actions.iter().fold(start, |c, a| a.apply(c))
    }

    /// Every cell on the route, `start` included.
    pub fn cells(&self, start: Cell) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.actions.len() + 1);
        cells.push(start);
        let mut c = start;
        for a in &self.actions {
            c = a.apply(c);
            cells.push(c);
        }
        cells
    }

    /// The route's turning points: [`cells`](Plan::cells) with every
    /// collinear interior point removed.
    pub fn waypoints(&self, start: Cell) -> Vec<Cell> {
        prune_collinear(&self.cells(start))
    }
}

impl From<Vec<Action>> for Plan {
    fn from(actions: Vec<Action>) -> Self {
        Self::from_actions(actions)
    }
}

impl From<Plan> for Vec<Action> {
    fn from(plan: Plan) -> Self {
        plan.actions
    }
}

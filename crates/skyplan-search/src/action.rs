use std::fmt;

use skyplan_core::Cell;

use crate::frontier::Cost;
use crate::traits::Occupancy;

/// A primitive 4-connected move.
///
/// The variants carry no data; their delta, cost and glyph come from a
/// fixed lookup table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Copy, Clone)]
struct ActionInfo {
    delta: Cell,
    cost: Cost,
    glyph: char,
}

/// Indexed by `Action as usize`.
const TABLE: [ActionInfo; 4] = [
    ActionInfo {
        delta: Cell::new(-1, 0),
        cost: 1,
        glyph: '^',
    },
    ActionInfo {
        delta: Cell::new(1, 0),
        cost: 1,
        glyph: 'v',
    },
    ActionInfo {
        delta: Cell::new(0, -1),
        cost: 1,
        glyph: '<',
    },
    ActionInfo {
        delta: Cell::new(0, 1),
        cost: 1,
        glyph: '>',
    },
];

// The search marks cells visited on discovery, which is only optimal when
// every move costs the same positive amount.
const _: () = {
    let mut i = 0;
    while i < TABLE.len() {
        assert!(TABLE[i].cost > 0 && TABLE[i].cost == TABLE[0].cost);
        i += 1;
    }
};

impl Action {
    /// Every action, in expansion order. Among equal-cost routes the search
    /// returns the one that takes earlier actions first.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    #[inline]
    const fn info(self) -> ActionInfo {
        TABLE[self as usize]
    }

    /// Coordinate offset applied by this move.
    #[inline]
    pub const fn delta(self) -> Cell {
        self.info().delta
    }

    /// Cost of taking this move.
    #[inline]
    pub const fn cost(self) -> Cost {
        self.info().cost
    }

    /// Arrow glyph used when drawing a path.
    #[inline]
    pub const fn glyph(self) -> char {
        self.info().glyph
    }

    /// Destination of this move from `cell`.
    #[inline]
    pub fn apply(self, cell: Cell) -> Cell {
        cell + self.delta()
    }

    /// Inverse of [`glyph`](Action::glyph).
    pub fn from_glyph(glyph: char) -> Option<Action> {
        Self::ALL.into_iter().find(|a| a.glyph() == glyph)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

// ---------------------------------------------------------------------------
// ActionSet
// ---------------------------------------------------------------------------

/// A set of [`Action`]s, iterated in the fixed order of [`Action::ALL`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Add an action.
    #[inline]
    pub fn insert(&mut self, a: Action) {
        self.0 |= 1 << a as u8;
    }

    /// Whether `a` is in the set.
    #[inline]
    pub fn contains(self, a: Action) -> bool {
        self.0 & (1 << a as u8) != 0
    }

    /// Number of actions in the set.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate in expansion order.
    #[inline]
    pub fn iter(self) -> ActionSetIter {
        ActionSetIter { set: self, next: 0 }
    }
}

impl IntoIterator for ActionSet {
    type Item = Action;
    type IntoIter = ActionSetIter;

    #[inline]
    fn into_iter(self) -> ActionSetIter {
        self.iter()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for a in iter {
            set.insert(a);
        }
        set
    }
}

/// Iterator over an [`ActionSet`] in expansion order.
#[derive(Clone, Debug)]
pub struct ActionSetIter {
    set: ActionSet,
    next: usize,
}

impl Iterator for ActionSetIter {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        while self.next < Action::ALL.len() {
            let a = Action::ALL[self.next];
            self.next += 1;
            if self.set.contains(a) {
                return Some(a);
            }
        }
        None
    }
}

/// Actions whose destination from `cell` is inside `grid` and not blocked.
///
/// Each action is checked independently; the result iterates in the order
/// of [`Action::ALL`] (up, down, left, right) so expansion order, and with
/// it frontier tie-breaking, is reproducible.
pub fn legal_actions<O: Occupancy + ?Sized>(grid: &O, cell: Cell) -> ActionSet {
    Action::ALL
        .into_iter()
        .filter(|a| grid.is_free(a.apply(cell)))
        .collect()
}

//! The [`CellState`] type: the occupancy of a single grid cell.

/// Occupancy of one grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Blocked,
}

impl CellState {
    /// Whether the cell can be traversed.
    #[inline]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    /// Whether the cell is an obstacle.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl From<bool> for CellState {
    /// `true` means blocked, matching the 0/1 obstacle arrays planners are
    /// usually fed.
    #[inline]
    fn from(blocked: bool) -> Self {
        if blocked { Self::Blocked } else { Self::Free }
    }
}

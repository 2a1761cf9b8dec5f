use skyplan_core::{Bounds, Cell, GridError, OccupancyGrid};

/// Read-only occupancy interface the planners search over.
///
/// Implementors must not change their answers while a search borrows them.
pub trait Occupancy {
    /// Extent of the searchable area. Every cell the search touches lies
    /// inside it.
    fn bounds(&self) -> Bounds;

    /// Whether `cell` is an obstacle. Out-of-bounds cells are reported as
    /// [`GridError::OutOfBounds`].
    fn is_blocked(&self, cell: Cell) -> Result<bool, GridError>;

    /// Whether `cell` lies inside [`bounds`](Occupancy::bounds).
    fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds().contains(cell)
    }

    /// Whether `cell` is inside the grid and not blocked.
    fn is_free(&self, cell: Cell) -> bool {
        matches!(self.is_blocked(cell), Ok(false))
    }
}

impl Occupancy for OccupancyGrid {
    #[inline]
    fn bounds(&self) -> Bounds {
        OccupancyGrid::bounds(self)
    }

    #[inline]
    fn is_blocked(&self, cell: Cell) -> Result<bool, GridError> {
        OccupancyGrid::is_blocked(self, cell)
    }
}

impl<T: Occupancy + ?Sized> Occupancy for &T {
    #[inline]
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    #[inline]
    fn is_blocked(&self, cell: Cell) -> Result<bool, GridError> {
        (**self).is_blocked(cell)
    }
}

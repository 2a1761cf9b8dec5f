//! The [`OccupancyGrid`] type: an immutable 2D array of [`CellState`]s.
//!
//! Unlike a drawing buffer, an occupancy grid is frozen once built: searches
//! borrow it read-only and any number of them may run against the same grid
//! concurrently. Use [`GridBuilder`] to mark obstacles before freezing.

use std::fmt;

use crate::cell::CellState;
use crate::geom::{Bounds, BoundsIter, Cell};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised while building or querying an [`OccupancyGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The queried cell lies outside the grid.
    OutOfBounds { cell: Cell, bounds: Bounds },
    /// Source rows have differing lengths.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The grid would have zero rows or zero columns.
    Empty,
    /// Source rows or columns do not fit in an `i32` coordinate.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { cell, bounds } => {
                write!(f, "cell {cell} is outside the {bounds} grid")
            }
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} columns, expected {expected}"
            ),
            Self::Empty => write!(f, "grid has no cells"),
            Self::TooLarge { rows, cols } => {
                write!(f, "a {rows}x{cols} grid exceeds the coordinate range")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// OccupancyGrid
// ---------------------------------------------------------------------------

/// A fixed-size rectangular grid of free / blocked cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct OccupancyGrid {
    bounds: Bounds,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Create a grid of the given dimensions with every cell free.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            cells: vec![CellState::Free; bounds.len()],
        }
    }

    /// Create a grid whose cells are computed by `f`.
    pub fn from_fn(rows: i32, cols: i32, mut f: impl FnMut(Cell) -> CellState) -> Self {
        let bounds = Bounds::new(rows, cols);
        let cells = bounds.iter().map(&mut f).collect();
        Self { bounds, cells }
    }

    /// Create a grid from rows of obstacle flags (`true` = blocked).
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.is_empty() || expected == 0 {
            return Err(GridError::Empty);
        }
        let too_large = GridError::TooLarge {
            rows: rows.len(),
            cols: expected,
        };
        let (Ok(nrows), Ok(ncols)) = (i32::try_from(rows.len()), i32::try_from(expected)) else {
            return Err(too_large);
        };
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&b| CellState::from(b)));
        }
        Ok(Self {
            bounds: Bounds::new(nrows, ncols),
            cells,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// The extent of the grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    /// State of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.bounds.index(cell).map(|i| self.cells[i])
    }

    /// Whether `cell` is an obstacle.
    ///
    /// Reports [`GridError::OutOfBounds`] rather than guessing for cells
    /// outside the grid.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> Result<bool, GridError> {
        self.state(cell)
            .map(CellState::is_blocked)
            .ok_or(GridError::OutOfBounds {
                cell,
                bounds: self.bounds,
            })
    }

    /// Whether `cell` is inside the grid and traversable.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.state(cell).is_some_and(CellState::is_free)
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.cells.iter().filter(|s| s.is_blocked()).count()
    }

    /// Row-major iterator over `(Cell, CellState)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a OccupancyGrid {
    type Item = (Cell, CellState);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Cell, CellState)` pairs in an [`OccupancyGrid`].
pub struct GridIter<'a> {
    grid: &'a OccupancyGrid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Cell, CellState);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        self.grid.state(c).map(|s| (c, s))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

// ---------------------------------------------------------------------------
// GridBuilder
// ---------------------------------------------------------------------------

/// Mutable staging area for an [`OccupancyGrid`].
///
/// Writes outside the grid are ignored, so obstacle footprints may be
/// stamped without clamping them first.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    grid: OccupancyGrid,
}

impl GridBuilder {
    /// Start from an all-free grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            grid: OccupancyGrid::new(rows, cols),
        }
    }

    /// Set the state of one cell.
    pub fn set(&mut self, cell: Cell, state: CellState) -> &mut Self {
        if let Some(i) = self.grid.bounds.index(cell) {
            self.grid.cells[i] = state;
        }
        self
    }

    /// Mark one cell blocked.
    pub fn block(&mut self, cell: Cell) -> &mut Self {
        self.set(cell, CellState::Blocked)
    }

    /// Mark one cell free.
    pub fn clear(&mut self, cell: Cell) -> &mut Self {
        self.set(cell, CellState::Free)
    }

    /// Mark every cell in the half-open rectangle `[from, to)` blocked.
    pub fn block_rect(&mut self, from: Cell, to: Cell) -> &mut Self {
        let r0 = from.row.max(0);
        let c0 = from.col.max(0);
        let r1 = to.row.min(self.grid.rows());
        let c1 = to.col.min(self.grid.cols());
        for row in r0..r1 {
            for col in c0..c1 {
                self.block(Cell::new(row, col));
            }
        }
        self
    }

    /// Current state of `cell`, or `None` when out of bounds.
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.grid.state(cell)
    }

    /// Freeze the grid.
    pub fn build(&self) -> OccupancyGrid {
        self.grid.clone()
    }
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

/// Compact wire form: dimensions plus the list of blocked cells.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    blocked: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl From<OccupancyGrid> for GridRepr {
    fn from(g: OccupancyGrid) -> Self {
        Self {
            rows: g.rows(),
            cols: g.cols(),
            blocked: g
                .iter()
                .filter(|(_, s)| s.is_blocked())
                .map(|(c, _)| c)
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for OccupancyGrid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        let bounds = Bounds::new(r.rows, r.cols);
        if bounds.is_empty() {
            return Err(GridError::Empty);
        }
        let mut b = GridBuilder::new(r.rows, r.cols);
        for c in r.blocked {
            if !bounds.contains(c) {
                return Err(GridError::OutOfBounds { cell: c, bounds });
            }
            b.block(c);
        }
        Ok(b.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_free() {
        let g = OccupancyGrid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.count_blocked(), 0);
        assert_eq!(g.iter().count(), 12);
        assert_eq!(g.is_blocked(Cell::new(2, 3)), Ok(false));
    }

    #[test]
    fn is_blocked_out_of_bounds() {
        let g = OccupancyGrid::new(3, 4);
        let err = g.is_blocked(Cell::new(3, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                cell: Cell::new(3, 0),
                bounds: Bounds::new(3, 4),
            }
        );
        assert!(!g.is_free(Cell::new(-1, 0)));
        assert_eq!(g.state(Cell::new(0, 4)), None);
    }

    #[test]
    fn from_rows_marks_obstacles() {
        let g = OccupancyGrid::from_rows(&[[false, true], [false, false]]).unwrap();
        assert_eq!(g.is_blocked(Cell::new(0, 1)), Ok(true));
        assert!(g.is_free(Cell::new(1, 1)));
        assert_eq!(g.count_blocked(), 1);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows: Vec<Vec<bool>> = vec![vec![false, false], vec![false]];
        let err = OccupancyGrid::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn from_rows_rejects_empty() {
        let rows: Vec<Vec<bool>> = Vec::new();
        assert_eq!(OccupancyGrid::from_rows(&rows), Err(GridError::Empty));
        let rows: Vec<Vec<bool>> = vec![Vec::new()];
        assert_eq!(OccupancyGrid::from_rows(&rows), Err(GridError::Empty));
    }

    #[test]
    fn from_rows_rejects_too_many_rows() {
        // Zero-sized rows, so the oversized slice costs no memory.
        #[derive(Clone)]
        struct Row;
        impl AsRef<[bool]> for Row {
            fn as_ref(&self) -> &[bool] {
                &[false, true]
            }
        }
        let n = i32::MAX as usize + 1;
        let rows = vec![Row; n];
        let err = OccupancyGrid::from_rows(&rows).unwrap_err();
        assert_eq!(err, GridError::TooLarge { rows: n, cols: 2 });
        assert_eq!(
            err.to_string(),
            format!("a {n}x2 grid exceeds the coordinate range")
        );
    }

    #[test]
    fn builder_rect_is_clamped() {
        let mut b = GridBuilder::new(4, 4);
        b.block_rect(Cell::new(-2, 2), Cell::new(2, 10));
        let g = b.build();
        assert_eq!(g.count_blocked(), 4);
        assert!(g.is_free(Cell::new(0, 1)));
        assert_eq!(g.is_blocked(Cell::new(1, 3)), Ok(true));
    }

    #[test]
    fn builder_ignores_outside_writes() {
        let mut b = GridBuilder::new(2, 2);
        b.block(Cell::new(5, 5)).block(Cell::new(0, 0)).clear(Cell::new(0, 0));
        assert_eq!(b.build().count_blocked(), 0);
    }

    #[test]
    fn from_fn_checkerboard() {
        let g = OccupancyGrid::from_fn(2, 2, |c| CellState::from((c.row + c.col) % 2 == 1));
        assert_eq!(g.count_blocked(), 2);
        assert!(g.is_free(Cell::new(0, 0)));
    }

    #[test]
    fn grid_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OccupancyGrid>();
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut b = GridBuilder::new(3, 5);
        b.block(Cell::new(1, 2)).block(Cell::new(2, 4));
        let g = b.build();
        let json = serde_json::to_string(&g).unwrap();
        let back: OccupancyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn grid_rejects_blocked_outside() {
        let json = r#"{"rows":2,"cols":2,"blocked":[{"row":2,"col":0}]}"#;
        assert!(serde_json::from_str::<OccupancyGrid>(json).is_err());
    }
}

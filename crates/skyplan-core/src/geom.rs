//! Geometry primitives: [`Cell`] and [`Bounds`].
//!
//! Cells are addressed as `(row, col)`. Row 0 is the first row of the
//! occupancy array and rows grow downward when the grid is printed.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A 2D integer grid coordinate.
///
/// Ordering is row-major: first by `row`, then by `col`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether the cell is inside the given bounds.
    #[inline]
    pub fn in_bounds(self, b: &Bounds) -> bool {
        b.contains(self)
    }

    /// The four edge-adjacent neighbours (up, down, left, right).
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i32> for Cell {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.row * rhs, self.col * rhs)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid anchored at the origin: rows `[0, rows)` and
/// columns `[0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create bounds of the given size. Negative sizes are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds have zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the bounds.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.cols as usize) + c.col as usize)
    }

    /// Inverse of [`index`](Bounds::index).
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bounds.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}

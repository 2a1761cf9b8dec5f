//! Occupancy grids built from text.
//!
//! A [`Layout`] parses an ASCII block into an [`OccupancyGrid`] plus
//! optional start and goal markers:
//!
//! | Glyph | Meaning |
//! |---|---|
//! | `.` or space | free |
//! | `#` or `O` | blocked |
//! | `S` | start (free) |
//! | `G` | goal (free) |
//!
//! Lines are separated by `'\n'` and must all have the same width. Blank
//! leading and trailing lines are ignored; spaces inside a line are cells.

use std::fmt;

use crate::cell::CellState;
use crate::geom::Cell;
use crate::grid::{GridBuilder, OccupancyGrid};

/// A parsed text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: OccupancyGrid,
    start: Option<Cell>,
    goal: Option<Cell>,
}

impl Layout {
    /// Parse a layout from text.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut b = GridBuilder::new(lines.len() as i32, width as i32);
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::InconsistentSize {
                    line: row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                let state = match glyph {
                    '.' | ' ' => CellState::Free,
                    '#' | 'O' => CellState::Blocked,
                    'S' => {
                        if start.replace(cell).is_some() {
                            return Err(LayoutError::DuplicateMarker { glyph, cell });
                        }
                        CellState::Free
                    }
                    'G' => {
                        if goal.replace(cell).is_some() {
                            return Err(LayoutError::DuplicateMarker { glyph, cell });
                        }
                        CellState::Free
                    }
                    _ => return Err(LayoutError::InvalidGlyph { glyph, cell }),
                };
                b.set(cell, state);
            }
        }

        Ok(Self {
            grid: b.build(),
            start,
            goal,
        })
    }

    /// The parsed grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Consume the layout, keeping only the grid.
    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }

    /// Position of the `S` marker, if any.
    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// Position of the `G` marker, if any.
    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }
}

impl std::str::FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, LayoutError> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The text contains no cells.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A glyph outside the layout alphabet was found.
    InvalidGlyph { glyph: char, cell: Cell },
    /// A start or goal marker appears more than once.
    DuplicateMarker { glyph: char, cell: Cell },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no cells"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidGlyph { glyph, cell } => {
                write!(f, "layout contains invalid glyph \u{201c}{glyph}\u{201d} at {cell}")
            }
            Self::DuplicateMarker { glyph, cell } => {
                write!(f, "layout: second \u{201c}{glyph}\u{201d} marker at {cell}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

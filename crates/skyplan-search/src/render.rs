//! Text rendering of a planned route.
//!
//! Obstacles, free space, start and goal get their own glyphs; every cell
//! the route leaves from shows the arrow of the move taken there.

use std::fmt;

use skyplan_core::Cell;

use crate::plan::Plan;
use crate::traits::Occupancy;

/// Glyphs used by [`render_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStyle {
    pub free: char,
    pub blocked: char,
    pub start: char,
    pub goal: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            free: ' ',
            blocked: 'O',
            start: 'S',
            goal: 'G',
        }
    }
}

/// A rendered grid, one `char` per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    rows: Vec<Vec<char>>,
}

impl Rendered {
    /// Glyph at `cell`, or `None` when out of bounds.
    pub fn at(&self, cell: Cell) -> Option<char> {
        let row = self.rows.get(usize::try_from(cell.row).ok()?)?;
        row.get(usize::try_from(cell.col).ok()?).copied()
    }

    /// The rendered rows as strings.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|r| r.iter().collect())
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Error returned when a plan cannot be drawn on a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Following the plan puts the route on a blocked or off-grid cell.
    /// `step` is the number of moves taken to get there.
    LeavesGrid { step: usize, cell: Cell },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeavesGrid { step, cell } => {
                write!(f, "route is not traversable at step {step}: {cell}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Render `plan`, followed from `start`, with the default glyphs.
pub fn render<O: Occupancy + ?Sized>(
    grid: &O,
    plan: &Plan,
    start: Cell,
) -> Result<Rendered, RenderError> {
    render_with(grid, plan, start, &RenderStyle::default())
}

/// Render `plan`, followed from `start`, with custom glyphs.
pub fn render_with<O: Occupancy + ?Sized>(
    grid: &O,
    plan: &Plan,
    start: Cell,
    style: &RenderStyle,
) -> Result<Rendered, RenderError> {
    let bounds = grid.bounds();
    let mut rows: Vec<Vec<char>> = (0..bounds.rows)
        .map(|row| {
            (0..bounds.cols)
                .map(|col| {
                    let blocked = matches!(grid.is_blocked(Cell::new(row, col)), Ok(true));
                    if blocked { style.blocked } else { style.free }
                })
                .collect()
        })
        .collect();

    let mut put = |c: Cell, glyph: char| {
        rows[c.row as usize][c.col as usize] = glyph;
    };

    let mut pos = start;
    for (step, action) in plan.actions().iter().enumerate() {
        if !grid.is_free(pos) {
            return Err(RenderError::LeavesGrid { step, cell: pos });
        }
        put(pos, action.glyph());
        pos = action.apply(pos);
    }
    if !grid.is_free(pos) {
        return Err(RenderError::LeavesGrid {
            step: plan.len(),
            cell: pos,
        });
    }
    put(pos, style.goal);
    put(start, style.start);

    Ok(Rendered { rows })
}

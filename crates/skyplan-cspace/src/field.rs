//! Random obstacle fields.

use rand::{Rng, RngExt};
use skyplan_core::{Cell, CellState, OccupancyGrid};

/// Generator for grids where each cell is blocked independently with
/// probability `density`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomField {
    pub rows: i32,
    pub cols: i32,
    pub density: f64,
}

impl RandomField {
    pub const DEFAULT_DENSITY: f64 = 0.3;

    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            density: Self::DEFAULT_DENSITY,
        }
    }

    /// Set the blocking probability, clamped to `[0, 1]`. NaN means zero.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = sanitize(density);
        self
    }

    /// Draw a grid from `rng`. Cells in `keep_clear` are always free.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, keep_clear: &[Cell]) -> OccupancyGrid {
        let p = sanitize(self.density);
        let grid = OccupancyGrid::from_fn(self.rows, self.cols, |c| {
            // Draw for every cell so the stream does not depend on keep_clear.
            let blocked = rng.random_bool(p);
            if keep_clear.contains(&c) {
                CellState::Free
            } else {
                CellState::from(blocked)
            }
        });
        log::trace!(
            "random field {}x{} at density {p}: {} blocked",
            self.rows,
            self.cols,
            grid.count_blocked()
        );
        grid
    }
}

fn sanitize(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}

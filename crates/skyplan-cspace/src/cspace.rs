//! Rasterize obstacle boxes into a 2D configuration-space grid.
//!
//! The grid covers the horizontal extent of all obstacles at one metre per
//! cell. Rows run north, columns run east. An obstacle blocks cells only if
//! its top, padded by the safety distance, reaches above the flight
//! altitude; its footprint is padded by the same distance.

use std::fmt;

use skyplan_core::{Cell, GridBuilder, OccupancyGrid};

use crate::obstacle::Obstacle;

/// Largest grid [`create_grid`] will build, in cells. Neither side may
/// exceed it either, even when the other side is empty.
pub const MAX_CELLS: usize = 1 << 26;

/// Flight parameters for [`create_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CSpaceConfig {
    /// Fixed flight altitude in metres.
    pub drone_altitude: f64,
    /// Clearance kept from every obstacle, in metres.
    pub safety_distance: f64,
}

impl Default for CSpaceConfig {
    fn default() -> Self {
        Self {
            drone_altitude: 5.0,
            safety_distance: 3.0,
        }
    }
}

impl CSpaceConfig {
    pub fn with_altitude(mut self, metres: f64) -> Self {
        self.drone_altitude = metres;
        self
    }

    pub fn with_safety_distance(mut self, metres: f64) -> Self {
        self.safety_distance = metres;
        self
    }
}

/// An occupancy grid anchored in local north/east coordinates.
///
/// Cell `(row, col)` covers `north_offset + row .. north_offset + row + 1`
/// north and likewise east.
#[derive(Debug, Clone, PartialEq)]
pub struct CSpace {
    grid: OccupancyGrid,
    north_offset: f64,
    east_offset: f64,
}

impl CSpace {
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }

    /// North coordinate of row 0's lower edge.
    pub fn north_offset(&self) -> f64 {
        self.north_offset
    }

    /// East coordinate of column 0's lower edge.
    pub fn east_offset(&self) -> f64 {
        self.east_offset
    }

    /// The cell containing the local position, or `None` when it falls
    /// outside the grid.
    pub fn to_cell(&self, north: f64, east: f64) -> Option<Cell> {
        let row = (north - self.north_offset).floor();
        let col = (east - self.east_offset).floor();
        if !row.is_finite() || !col.is_finite() {
            return None;
        }
        let cell = Cell::new(row as i32, col as i32);
        self.grid.in_bounds(cell).then_some(cell)
    }

    /// Local coordinates of the centre of `cell`.
    pub fn center(&self, cell: Cell) -> (f64, f64) {
        (
            self.north_offset + f64::from(cell.row) + 0.5,
            self.east_offset + f64::from(cell.col) + 0.5,
        )
    }
}

/// Build the configuration-space grid for `obstacles` under `config`.
pub fn create_grid(obstacles: &[Obstacle], config: &CSpaceConfig) -> Result<CSpace, CSpaceError> {
    if obstacles.is_empty() {
        return Err(CSpaceError::NoObstacles);
    }
    if !config.drone_altitude.is_finite() || !config.safety_distance.is_finite() {
        return Err(CSpaceError::InvalidConfig);
    }
    for (index, o) in obstacles.iter().enumerate() {
        if !o.is_finite() {
            return Err(CSpaceError::NonFinite { index });
        }
        if o.d_north < 0.0 || o.d_east < 0.0 || o.d_alt < 0.0 {
            return Err(CSpaceError::NegativeExtent { index });
        }
    }

    let extent = |lo: fn(&Obstacle) -> f64, hi: fn(&Obstacle) -> f64| {
        let min = obstacles.iter().map(lo).fold(f64::INFINITY, f64::min);
        let max = obstacles.iter().map(hi).fold(f64::NEG_INFINITY, f64::max);
        (min.floor(), max.ceil())
    };
    let (north_min, north_max) = extent(|o| o.north - o.d_north, |o| o.north + o.d_north);
    let (east_min, east_max) = extent(|o| o.east - o.d_east, |o| o.east + o.d_east);
    let (rows, cols) = (north_max - north_min, east_max - east_min);
    let limit = MAX_CELLS as f64;
    if rows * cols > limit || rows.max(cols) > limit {
        return Err(CSpaceError::TooLarge {
            rows: rows as u64,
            cols: cols as u64,
        });
    }
    let rows = rows as i32;
    let cols = cols as i32;

    let safety = config.safety_distance;
    let mut builder = GridBuilder::new(rows, cols);
    let mut blocking = 0usize;
    for o in obstacles {
        if o.top() + safety <= config.drone_altitude {
            continue;
        }
        blocking += 1;
        let from = Cell::new(
            (o.north - o.d_north - safety - north_min).floor() as i32,
            (o.east - o.d_east - safety - east_min).floor() as i32,
        );
        let to = Cell::new(
            (o.north + o.d_north + safety - north_min).ceil() as i32,
            (o.east + o.d_east + safety - east_min).ceil() as i32,
        );
        builder.block_rect(from, to);
    }
    let grid = builder.build();
    log::debug!(
        "cspace {}x{}: {} of {} obstacles above {} m, {} cells blocked",
        rows,
        cols,
        blocking,
        obstacles.len(),
        config.drone_altitude,
        grid.count_blocked()
    );

    Ok(CSpace {
        grid,
        north_offset: north_min,
        east_offset: east_min,
    })
}

/// Errors that can occur when building a configuration space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CSpaceError {
    /// No obstacles were given, so the grid has no extent.
    NoObstacles,
    /// Altitude or safety distance is NaN or infinite.
    InvalidConfig,
    /// Obstacle `index` has a NaN or infinite field.
    NonFinite { index: usize },
    /// Obstacle `index` has a negative half extent.
    NegativeExtent { index: usize },
    /// The obstacles spread over more than [`MAX_CELLS`] cells.
    TooLarge { rows: u64, cols: u64 },
}

impl fmt::Display for CSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoObstacles => write!(f, "no obstacles to build a grid from"),
            Self::InvalidConfig => write!(f, "altitude and safety distance must be finite"),
            Self::NonFinite { index } => write!(f, "obstacle {index} has a non-finite field"),
            Self::NegativeExtent { index } => {
                write!(f, "obstacle {index} has a negative half extent")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "obstacles span {rows}x{cols} cells, over the {MAX_CELLS} limit")
            }
        }
    }
}

impl std::error::Error for CSpaceError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> Obstacle {
        Obstacle {
            north: 0.0,
            east: 0.0,
            alt: 10.0,
            d_north: 1.0,
            d_east: 1.0,
            d_alt: 10.0,
        }
    }

    fn kerb() -> Obstacle {
        Obstacle {
            north: 10.0,
            east: 10.0,
            alt: 1.0,
            d_north: 1.0,
            d_east: 1.0,
            d_alt: 0.5,
        }
    }

    #[test]
    fn grid_spans_obstacle_extent() {
        let cs = create_grid(&[tower(), kerb()], &CSpaceConfig::default()).unwrap();
        assert_eq!(cs.grid().rows(), 12);
        assert_eq!(cs.grid().cols(), 12);
        assert_eq!(cs.north_offset(), -1.0);
        assert_eq!(cs.east_offset(), -1.0);
    }

    #[test]
    fn tall_obstacle_is_inflated() {
        let cs = create_grid(&[tower(), kerb()], &CSpaceConfig::default()).unwrap();
        // Tower footprint -1..1 padded by 3 m, clamped at the grid edge.
        assert_eq!(cs.grid().count_blocked(), 25);
        assert!(!cs.grid().is_free(Cell::new(4, 4)));
        assert!(cs.grid().is_free(Cell::new(5, 0)));
        assert!(cs.grid().is_free(Cell::new(0, 5)));
    }

    #[test]
    fn low_obstacle_is_ignored() {
        let cs = create_grid(&[tower(), kerb()], &CSpaceConfig::default()).unwrap();
        // Kerb top 1.5 m + 3 m safety stays below 5 m.
        let kerb_cell = cs.to_cell(10.0, 10.0).unwrap();
        assert_eq!(kerb_cell, Cell::new(11, 11));
        assert!(cs.grid().is_free(kerb_cell));

        // Flying lower brings it into play.
        let low = CSpaceConfig::default().with_altitude(4.0);
        let cs = create_grid(&[tower(), kerb()], &low).unwrap();
        assert!(!cs.grid().is_free(Cell::new(11, 11)));
    }

    #[test]
    fn zero_safety_blocks_footprint_only() {
        let config = CSpaceConfig::default().with_safety_distance(0.0);
        let cs = create_grid(&[tower(), kerb()], &config).unwrap();
        assert_eq!(cs.grid().count_blocked(), 4);
        assert_eq!(cs.to_cell(0.0, 0.0), Some(Cell::new(1, 1)));
        assert!(!cs.grid().is_free(Cell::new(1, 1)));
        assert!(cs.grid().is_free(Cell::new(2, 2)));
    }

    #[test]
    fn to_cell_and_center() {
        let cs = create_grid(&[tower(), kerb()], &CSpaceConfig::default()).unwrap();
        assert_eq!(cs.to_cell(-1.0, -1.0), Some(Cell::ZERO));
        assert_eq!(cs.to_cell(-1.5, 0.0), None);
        assert_eq!(cs.to_cell(11.0, 0.0), None);
        assert_eq!(cs.to_cell(f64::NAN, 0.0), None);
        assert_eq!(cs.center(Cell::new(1, 2)), (0.5, 1.5));
    }

    #[test]
    fn rejects_bad_input() {
        let none: [Obstacle; 0] = [];
        assert_eq!(
            create_grid(&none, &CSpaceConfig::default()).unwrap_err(),
            CSpaceError::NoObstacles
        );

        let mut nan = kerb();
        nan.alt = f64::NAN;
        assert_eq!(
            create_grid(&[tower(), nan], &CSpaceConfig::default()).unwrap_err(),
            CSpaceError::NonFinite { index: 1 }
        );

        let mut neg = tower();
        neg.d_east = -1.0;
        assert_eq!(
            create_grid(&[neg], &CSpaceConfig::default()).unwrap_err(),
            CSpaceError::NegativeExtent { index: 0 }
        );

        let inf = CSpaceConfig::default().with_altitude(f64::INFINITY);
        assert_eq!(
            create_grid(&[tower()], &inf).unwrap_err(),
            CSpaceError::InvalidConfig
        );
        assert_eq!(
            CSpaceError::NonFinite { index: 2 }.to_string(),
            "obstacle 2 has a non-finite field"
        );
    }

    #[test]
    fn widely_spread_obstacles_are_too_large() {
        let mut far = tower();
        far.north = 3e9;
        let err = create_grid(&[tower(), far], &CSpaceConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CSpaceError::TooLarge {
                rows: 3_000_000_002,
                cols: 2,
            }
        );

        // A long thin strip is fine as long as the cell count fits.
        let mut strip = tower();
        strip.north = 10_000.0;
        let cs = create_grid(&[tower(), strip], &CSpaceConfig::default()).unwrap();
        assert_eq!(cs.grid().rows(), 10_002);
        assert_eq!(cs.grid().cols(), 2);

        let mut wide = tower();
        wide.north = 10_000.0;
        wide.east = 10_000.0;
        assert!(matches!(
            create_grid(&[tower(), wide], &CSpaceConfig::default()),
            Err(CSpaceError::TooLarge { .. })
        ));

        // Zero-width obstacles still may not stretch the grid without bound.
        let mut pole = tower();
        pole.d_east = 0.0;
        let mut far_pole = pole;
        far_pole.north = 1e9;
        assert!(matches!(
            create_grid(&[pole, far_pole], &CSpaceConfig::default()),
            Err(CSpaceError::TooLarge { cols: 0, .. })
        ));
    }

    #[test]
    fn parsed_colliders_feed_the_builder() {
        let text = "\
lat0 37.792480, lon0 -122.397450
posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ
0,0,10,1,1,10
10,10,1,1,1,0.5
";
        let obstacles = crate::parse_colliders(text).unwrap();
        let cs = create_grid(&obstacles, &CSpaceConfig::default()).unwrap();
        assert_eq!(cs.grid().count_blocked(), 25);
    }
}

//! **skyplan-core**: occupancy grids for drone path planning.
//!
//! This crate provides the foundational types used across the *skyplan*
//! workspace: grid coordinates, the immutable [`OccupancyGrid`] the
//! planners search over, and a small text format for authoring grids.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::CellState;
pub use geom::{Bounds, Cell};
pub use grid::{GridBuilder, GridError, OccupancyGrid};
pub use layout::{Layout, LayoutError};

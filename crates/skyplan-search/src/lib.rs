//! Route search over occupancy grids.
//!
//! This crate finds minimum-cost 4-connected routes between two cells of an
//! occupancy grid, avoiding blocked cells:
//!
//! - **Uniform-cost search** with a FIFO tie-broken frontier ([`UniformCost`], [`search`])
//! - **Path reconstruction** from the predecessor map ([`reconstruct`])
//! - **BFS** hop-distance maps, useful as an independent check ([`bfs_distances`])
//! - **Waypoint pruning** of collinear route cells ([`prune_collinear`])
//! - **Text rendering** of a route ([`render`])
//!
//! Search results are fully determined by the input: moves are expanded in
//! the fixed order of [`Action::ALL`] and equal-cost frontier entries leave
//! in insertion order.
//!
//! # Seams
//!
//! | Item | Role |
//! |---|---|
//! | [`Occupancy`] | read-only grid the engine searches; implemented for [`skyplan_core::OccupancyGrid`] |
//! | [`Frontier`] | cost-ordered queue of discovered cells |
//! | [`BranchMap`] | how each discovered cell was first reached |

mod action;
mod bfs;
mod distance;
mod engine;
mod frontier;
mod plan;
mod prune;
mod reconstruct;
pub mod render;
mod traits;

pub use action::{Action, ActionSet, ActionSetIter, legal_actions};
pub use bfs::{DistanceMap, bfs_distances};
pub use distance::manhattan;
pub use engine::{Rejection, SearchConfig, SearchError, UniformCost, search};
pub use frontier::{Cost, EmptyFrontier, Frontier};
pub use plan::Plan;
pub use prune::{collinear, prune_collinear};
pub use reconstruct::{Branch, BranchMap, reconstruct};
pub use render::{RenderError, RenderStyle, Rendered, render, render_with};
pub use traits::Occupancy;

//! Grids to plan on: configuration spaces built from obstacle boxes, and
//! seeded random obstacle fields.
//!
//! ```no_run
//! use skyplan_cspace::{CSpaceConfig, create_grid, parse_colliders};
//!
//! let text = std::fs::read_to_string("colliders.csv").unwrap();
//! let obstacles = parse_colliders(&text).unwrap();
//! let cspace = create_grid(&obstacles, &CSpaceConfig::default()).unwrap();
//! println!("{} cells blocked", cspace.grid().count_blocked());
//! ```

pub mod cspace;
pub mod field;
pub mod obstacle;

pub use cspace::{CSpace, CSpaceConfig, CSpaceError, create_grid};
pub use field::RandomField;
pub use obstacle::{ColliderError, HEADER_LINES, Obstacle, parse_colliders};

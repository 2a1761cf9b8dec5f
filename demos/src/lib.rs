//! Scenarios shared by the demo binaries.
//!
//! Three kinds of grid are planned on: the hand-drawn lesson map, a
//! configuration space built from a small collider file, and a seeded
//! random field.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use skyplan_core::{Cell, Layout, LayoutError, OccupancyGrid};
use skyplan_cspace::{
    CSpaceConfig, CSpaceError, ColliderError, RandomField, create_grid, parse_colliders,
};
use skyplan_search::{Plan, RenderError, Rendered, SearchError, UniformCost, render};

pub const DEFAULT_SEED: u64 = 42;

/// The 5x6 map from the planning-as-search lesson.
pub const LESSON_MAP: &str = "
S#....
.#.#..
.#....
.#..#.
...#G.
";

/// A few buildings around a low wall, in the collider file format.
pub const SAMPLE_COLLIDERS: &str = "\
lat0 37.792480, lon0 -122.397450
posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ
0,0,20,2,2,20
20,30,20,2,2,20
10,15,1,3,3,1
0,30,30,1,1,30
";

/// Local north/east positions planned between on [`SAMPLE_COLLIDERS`].
pub const SAMPLE_START: (f64, f64) = (21.0, 0.0);
pub const SAMPLE_GOAL: (f64, f64) = (0.0, 15.0);

/// A grid with endpoints to plan between.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub grid: OccupancyGrid,
    pub start: Cell,
    pub goal: Cell,
}

impl Scenario {
    /// The lesson map, start and goal taken from its markers.
    pub fn lesson() -> Result<Self, ScenarioError> {
        Self::from_layout("lesson", LESSON_MAP)
    }

    /// Parse a text layout; it must carry both `S` and `G`.
    pub fn from_layout(name: &str, text: &str) -> Result<Self, ScenarioError> {
        let layout = Layout::parse(text)?;
        let (Some(start), Some(goal)) = (layout.start(), layout.goal()) else {
            return Err(ScenarioError::MissingMarker);
        };
        Ok(Self {
            name: name.to_string(),
            grid: layout.into_grid(),
            start,
            goal,
        })
    }

    /// The configuration space of `colliders`, planning between two local
    /// north/east positions.
    pub fn from_colliders(
        name: &str,
        colliders: &str,
        config: &CSpaceConfig,
        start: (f64, f64),
        goal: (f64, f64),
    ) -> Result<Self, ScenarioError> {
        let obstacles = parse_colliders(colliders)?;
        let cspace = create_grid(&obstacles, config)?;
        let locate = |(north, east): (f64, f64)| {
            cspace
                .to_cell(north, east)
                .ok_or(ScenarioError::OffGrid { north, east })
        };
        let start = locate(start)?;
        let goal = locate(goal)?;
        Ok(Self {
            name: name.to_string(),
            grid: cspace.into_grid(),
            start,
            goal,
        })
    }

    /// A seeded random field, planning corner to corner.
    pub fn random(seed: u64, rows: i32, cols: i32, density: f64) -> Self {
        let start = Cell::ZERO;
        let goal = Cell::new(rows - 1, cols - 1);
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = RandomField::new(rows, cols)
            .with_density(density)
            .generate(&mut rng, &[start, goal]);
        Self {
            name: format!("random field (seed {seed})"),
            grid,
            start,
            goal,
        }
    }
}

/// What planning a scenario produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    Found { plan: Plan, rendered: Rendered },
    Unreachable(SearchError),
}

/// Plan `scenario` with `engine` and draw the result.
pub fn solve(engine: &UniformCost, scenario: &Scenario) -> Result<Outcome, ScenarioError> {
    match engine.search(&scenario.grid, scenario.start, scenario.goal) {
        Ok(plan) => {
            let rendered = render(&scenario.grid, &plan, scenario.start)?;
            Ok(Outcome::Found { plan, rendered })
        }
        Err(e) if e.is_unreachable() => Ok(Outcome::Unreachable(e)),
        Err(e) => Err(e.into()),
    }
}

/// Errors that stop a scenario from being set up or planned.
#[derive(Debug)]
pub enum ScenarioError {
    Layout(LayoutError),
    MissingMarker,
    Colliders(ColliderError),
    CSpace(CSpaceError),
    OffGrid { north: f64, east: f64 },
    Search(SearchError),
    Render(RenderError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::MissingMarker => write!(f, "layout needs both a start and a goal marker"),
            Self::Colliders(e) => write!(f, "{e}"),
            Self::CSpace(e) => write!(f, "configuration space: {e}"),
            Self::OffGrid { north, east } => {
                write!(f, "position ({north}, {east}) is outside the grid")
            }
            Self::Search(e) => write!(f, "search: {e}"),
            Self::Render(e) => write!(f, "render: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Colliders(e) => Some(e),
            Self::CSpace(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::MissingMarker | Self::OffGrid { .. } => None,
        }
    }
}

impl From<LayoutError> for ScenarioError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<ColliderError> for ScenarioError {
    fn from(e: ColliderError) -> Self {
        Self::Colliders(e)
    }
}

impl From<CSpaceError> for ScenarioError {
    fn from(e: CSpaceError) -> Self {
        Self::CSpace(e)
    }
}

impl From<SearchError> for ScenarioError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<RenderError> for ScenarioError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

//! Plan routes on the lesson map, a sample configuration space and a
//! random field, printing each rendered route.
//!
//! Usage: `plan [SEED]` (the random field's seed, default 42). See
//! `plan --help` for the other options.

use clap::Parser;
use log::{LevelFilter, info, warn};
use simple_logger::SimpleLogger;
use skyplan_cspace::CSpaceConfig;
use skyplan_demos::{
    DEFAULT_SEED, Outcome, SAMPLE_COLLIDERS, SAMPLE_GOAL, SAMPLE_START, Scenario, solve,
};
use skyplan_search::{SearchConfig, UniformCost};

/// Plan drone routes on sample occupancy grids and print them.
#[derive(Debug, Parser)]
#[command(name = "plan", version)]
struct Opt {
    /// Seed for the random obstacle field
    #[arg(default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Rows of the random obstacle field
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(i32).range(1..))]
    rows: i32,

    /// Columns of the random obstacle field
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(i32).range(1..))]
    cols: i32,

    /// Probability that a random field cell is blocked
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Give up a search after expanding this many cells
    #[arg(long, default_value_t = 100_000)]
    max_expansions: usize,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let scenarios = [
        Scenario::lesson()?,
        Scenario::from_colliders(
            "sample colliders",
            SAMPLE_COLLIDERS,
            &CSpaceConfig::default(),
            SAMPLE_START,
            SAMPLE_GOAL,
        )?,
        Scenario::random(opt.seed, opt.rows, opt.cols, opt.density),
    ];

    let engine = UniformCost::new(SearchConfig::default().with_max_expansions(opt.max_expansions));
    for scenario in &scenarios {
        match solve(&engine, scenario)? {
            Outcome::Found { plan, rendered } => {
                info!(
                    "{}: {} -> {} cost {}, {} waypoints",
                    scenario.name,
                    scenario.start,
                    scenario.goal,
                    plan.cost(),
                    plan.waypoints(scenario.start).len()
                );
                println!("{rendered}\n");
            }
            Outcome::Unreachable(e) => warn!("{}: {e}", scenario.name),
        }
    }
    Ok(())
}

//! Demo binary: plan routes for a randomly generated delivery instance.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cvrptw_solver::config::SolverConfig;
use cvrptw_solver::problem::{
    Demand, DistanceMatrix, Location, Problem, ProductCatalog, TimeWindow, Vehicle,
};
use cvrptw_solver::utils::format_routes;
use cvrptw_solver::{Solver, Strategy};

#[derive(Parser)]
#[command(about = "Plan delivery routes for a randomly generated CVRPTW instance")]
struct Args {
    /// Construction strategy: greedy, clustered, clustered_sequential, ant_colony
    #[arg(long, default_value = "greedy")]
    strategy: String,

    /// Number of delivery locations (excluding the depot)
    #[arg(long, default_value_t = 30)]
    locations: usize,

    /// Number of vehicles
    #[arg(long, default_value_t = 4)]
    vehicles: usize,

    /// Instance generation seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Reverse the first-pass ordering in the clustered strategies
    #[arg(long)]
    start_from_farthest: bool,

    /// Run the segment-reversal refinement pass
    #[arg(long)]
    refine: bool,

    /// Print the solution as JSON instead of a route table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let strategy: Strategy = args.strategy.parse()?;
    let problem = generate_instance(args.locations, args.vehicles, args.seed)?;

    let config = SolverConfig::new()
        .with_start_from_farthest(args.start_from_farthest)
        .with_refine_routes(args.refine);
    let solver = Solver::new(config);
    let solution = solver.solve(&problem, strategy);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!("{}", format_routes(&solution, &problem));
    }

    Ok(())
}

/// Random instance in a 50x50 km square: two-product demands, morning
/// window openings, a mixed-capacity fleet on a day shift.
fn generate_instance(
    location_count: usize,
    vehicle_count: usize,
    seed: u64,
) -> Result<Problem, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut locations = vec![Location::new(25.0, 25.0)];
    let mut demands = vec![Demand::empty()];
    let mut time_windows = vec![TimeWindow::all_day()];

    for _ in 0..location_count {
        locations.push(Location::new(
            rng.gen_range(0.0..50.0),
            rng.gen_range(0.0..50.0),
        ));
        demands.push(Demand::new(vec![
            (0, rng.gen_range(1..=5) as f64),
            (1, rng.gen_range(1..=5) as f64),
        ]));
        time_windows.push(TimeWindow::new(
            rng.gen_range(6.0..10.0),
            rng.gen_range(18.0..20.0),
        ));
    }

    let catalog = ProductCatalog::new()
        .with_product(0, 0.07)
        .with_product(1, 0.1);

    let vehicles = (0..vehicle_count)
        .map(|_| {
            Vehicle::with_shift(rng.gen_range(10.0..20.0), TimeWindow::new(8.0, 20.0))
        })
        .collect();

    let evaluator = DistanceMatrix::euclidean(&locations);

    Ok(Problem::new(
        locations,
        demands,
        catalog,
        time_windows,
        vehicles,
        Box::new(evaluator),
    )?)
}

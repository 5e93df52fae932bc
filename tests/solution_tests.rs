//! Unit tests for the route and solution structures.

use cvrptw_solver::problem::{
    Demand, Location, Problem, ProductCatalog, TimeWindow, Vehicle,
};
use cvrptw_solver::solution::{Route, RouteStop, Solution};

const EPS: f64 = 1e-9;

fn create_test_problem() -> Problem {
    let locations = vec![
        Location::new(0.0, 0.0),
        Location::new(1.0, 0.0),
        Location::new(2.0, 0.0),
    ];
    let demands = vec![
        Demand::empty(),
        Demand::single(0, 1.0),
        Demand::single(0, 2.0),
    ];
    let catalog = ProductCatalog::new().with_product(0, 1.0);
    let time_windows = vec![TimeWindow::all_day(); 3];
    let vehicles = vec![Vehicle::new(10.0)];

    // Fixed distances: 1 km per index step.
    let evaluator = |from: usize, to: usize| (from as f64 - to as f64).abs() * 1000.0;

    Problem::new(
        locations,
        demands,
        catalog,
        time_windows,
        vehicles,
        Box::new(evaluator),
    )
    .expect("valid problem")
}

fn stop(location: usize, arrival_time: f64, load: f64) -> RouteStop {
    RouteStop {
        location,
        arrival_time,
        wait_time: 0.0,
        load,
    }
}

#[test]
fn test_empty_route() {
    let route = Route::new();

    assert!(route.is_empty());
    assert_eq!(route.len(), 0);
    assert_eq!(route.completion_time(), 0.0);
    assert_eq!(route.load(), 0.0);
    assert!(route.locations().is_empty());
}

#[test]
fn test_route_distance_prices_the_depot_departure() {
    let problem = create_test_problem();
    let route = Route {
        stops: vec![stop(1, 0.2, 1.0), stop(2, 0.4, 3.0)],
    };

    // Depot -> 1 -> 2, no return edge.
    assert!((route.distance(&problem) - 2000.0).abs() < EPS);
}

#[test]
fn test_route_tail_accessors() {
    let route = Route {
        stops: vec![stop(1, 0.2, 1.0), stop(2, 0.4, 3.0)],
    };

    assert_eq!(route.locations(), vec![1, 2]);
    assert!((route.completion_time() - 0.4).abs() < EPS);
    assert!((route.load() - 3.0).abs() < EPS);
}

#[test]
fn test_solution_cost_sums_route_distances() {
    let problem = create_test_problem();
    let solution = Solution {
        routes: vec![
            Route {
                stops: vec![stop(1, 0.2, 1.0)],
            },
            Route {
                stops: vec![stop(2, 0.3, 2.0)],
            },
        ],
        unassigned: Vec::new(),
    };

    // 1000 m for the first route, 2000 m for the second.
    assert!((solution.cost(&problem) - 3000.0).abs() < EPS);
    assert_eq!(solution.visited_count(), 2);
    assert!(solution.is_complete());
}

#[test]
fn test_unassigned_locations_make_a_solution_incomplete() {
    let mut solution = Solution::new(2);

    assert_eq!(solution.routes.len(), 2);
    assert!(solution.is_complete());

    solution.unassigned.push(5);
    assert!(!solution.is_complete());
}

#[test]
fn test_debug_output_summarizes_routes() {
    let solution = Solution {
        routes: vec![Route {
            stops: vec![stop(1, 0.2, 1.0)],
        }],
        unassigned: vec![2],
    };

    let output = format!("{:?}", solution);
    assert!(output.contains("Routes: 1"));
    assert!(output.contains("Visited: 1"));
    assert!(output.contains("Unassigned: [2]"));
}

#[test]
fn test_solution_serializes_to_json() {
    let solution = Solution {
        routes: vec![Route {
            stops: vec![stop(1, 0.25, 1.0)],
        }],
        unassigned: vec![2],
    };

    let json = serde_json::to_string(&solution).expect("serializable");
    let parsed: Solution = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(parsed, solution);
}

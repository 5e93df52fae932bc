//! Tests for the solver facade: strategy dispatch, validation, and the
//! shared output contract.

use cvrptw_solver::config::{AntColonyConfig, SolverConfig};
use cvrptw_solver::problem::{
    Demand, DistanceMatrix, Location, Problem, ProductCatalog, TimeWindow, Vehicle,
};
use cvrptw_solver::{Solver, SolverError, Strategy};

const EPS: f64 = 1e-9;

fn create_test_problem() -> Problem {
    let locations = vec![
        Location::new(0.0, 0.0),
        Location::new(1.0, 1.0),
        Location::new(-1.0, 2.0),
        Location::new(2.0, -1.0),
        Location::new(-2.0, -2.0),
    ];
    let demands = vec![
        Demand::empty(),
        Demand::single(0, 2.0),
        Demand::single(0, 1.0),
        Demand::single(0, 2.0),
        Demand::single(0, 1.0),
    ];
    let catalog = ProductCatalog::new().with_product(0, 1.0);
    let time_windows = vec![TimeWindow::all_day(); 5];
    let vehicles = vec![Vehicle::new(4.0), Vehicle::new(4.0)];
    let evaluator = DistanceMatrix::euclidean(&locations);

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

#[test]
fn test_strategy_names_parse() {
    assert_eq!("greedy".parse::<Strategy>(), Ok(Strategy::Greedy));
    assert_eq!("clustered".parse::<Strategy>(), Ok(Strategy::Clustered));
    assert_eq!(
        "clustered_sequential".parse::<Strategy>(),
        Ok(Strategy::ClusteredSequential)
    );
    assert_eq!("ant_colony".parse::<Strategy>(), Ok(Strategy::AntColony));
}

#[test]
fn test_unknown_strategy_fails_fast() {
    let parsed = "simulated_annealing".parse::<Strategy>();
    assert_eq!(
        parsed,
        Err(SolverError::UnknownStrategy("simulated_annealing".to_string()))
    );

    let problem = create_test_problem();
    let solver = Solver::new(SolverConfig::new());
    let result = solver.solve_named(&problem, "tabu");
    assert!(matches!(result, Err(SolverError::UnknownStrategy(_))));
}

#[test]
fn test_solve_named_dispatches() {
    let problem = create_test_problem();
    let solver = Solver::new(SolverConfig::new());

    for name in ["greedy", "clustered", "clustered_sequential", "ant_colony"] {
        let solution = solver
            .solve_named(&problem, name)
            .expect("known strategy name");
        assert_eq!(solution.routes.len(), problem.vehicle_count());
    }
}

#[test]
fn test_zero_vehicles_is_invalid() {
    let locations = vec![Location::new(0.0, 0.0), Location::new(1.0, 0.0)];
    let result = Problem::new(
        locations.clone(),
        vec![Demand::empty(), Demand::single(0, 1.0)],
        ProductCatalog::new().with_product(0, 1.0),
        vec![TimeWindow::all_day(); 2],
        Vec::new(),
        Box::new(DistanceMatrix::euclidean(&locations)),
    );

    assert!(matches!(result, Err(SolverError::InvalidProblem(_))));
}

#[test]
fn test_non_positive_capacity_is_invalid() {
    let locations = vec![Location::new(0.0, 0.0), Location::new(1.0, 0.0)];

    for capacity in [0.0, -3.0] {
        let result = Problem::new(
            locations.clone(),
            vec![Demand::empty(), Demand::single(0, 1.0)],
            ProductCatalog::new().with_product(0, 1.0),
            vec![TimeWindow::all_day(); 2],
            vec![Vehicle::new(capacity)],
            Box::new(DistanceMatrix::euclidean(&locations)),
        );

        assert!(matches!(result, Err(SolverError::InvalidProblem(_))));
    }
}

#[test]
fn test_demand_for_undefined_product_is_invalid() {
    let locations = vec![Location::new(0.0, 0.0), Location::new(1.0, 0.0)];
    let result = Problem::new(
        locations.clone(),
        vec![Demand::empty(), Demand::single(99, 1.0)],
        ProductCatalog::new().with_product(0, 1.0),
        vec![TimeWindow::all_day(); 2],
        vec![Vehicle::new(10.0)],
        Box::new(DistanceMatrix::euclidean(&locations)),
    );

    match result {
        Err(SolverError::InvalidProblem(reason)) => assert!(reason.contains("99")),
        other => panic!("expected invalid problem, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_misaligned_inputs_are_invalid() {
    let locations = vec![Location::new(0.0, 0.0), Location::new(1.0, 0.0)];

    // Missing a demand record.
    let result = Problem::new(
        locations.clone(),
        vec![Demand::empty()],
        ProductCatalog::new(),
        vec![TimeWindow::all_day(); 2],
        vec![Vehicle::new(10.0)],
        Box::new(DistanceMatrix::euclidean(&locations)),
    );
    assert!(matches!(result, Err(SolverError::InvalidProblem(_))));

    // Missing a time window.
    let result = Problem::new(
        locations.clone(),
        vec![Demand::empty(), Demand::empty()],
        ProductCatalog::new(),
        vec![TimeWindow::all_day()],
        vec![Vehicle::new(10.0)],
        Box::new(DistanceMatrix::euclidean(&locations)),
    );
    assert!(matches!(result, Err(SolverError::InvalidProblem(_))));
}

#[test]
fn test_error_messages_name_the_cause() {
    let error = SolverError::UnknownStrategy("nope".to_string());
    assert!(error.to_string().contains("nope"));

    let error = SolverError::InvalidProblem("no vehicles available".to_string());
    assert!(error.to_string().contains("no vehicles"));
}

#[test]
fn test_every_strategy_shares_the_output_contract() {
    let solver = Solver::new(SolverConfig::new().with_ant_colony(
        AntColonyConfig::new().with_num_ants(8).with_num_iterations(10),
    ));

    for strategy in [
        Strategy::Greedy,
        Strategy::Clustered,
        Strategy::ClusteredSequential,
        Strategy::AntColony,
    ] {
        let problem = create_test_problem();
        let solution = solver.solve(&problem, strategy);

        assert_eq!(solution.routes.len(), problem.vehicle_count());

        let mut seen = std::collections::HashSet::new();
        for (v, route) in solution.routes.iter().enumerate() {
            for stop in &route.stops {
                assert_ne!(stop.location, 0, "depot served as a stop");
                assert!(seen.insert(stop.location), "location served twice");
                assert!(stop.load <= problem.vehicles[v].capacity + EPS);
            }
        }
    }
}

#[test]
fn test_unreachable_window_is_unassigned_under_every_strategy() {
    let solver = Solver::new(SolverConfig::new());

    for strategy in [
        Strategy::Greedy,
        Strategy::Clustered,
        Strategy::ClusteredSequential,
        Strategy::AntColony,
    ] {
        let locations = vec![
            Location::new(0.0, 0.0),
            Location::new(1.0, 0.0),
            Location::new(2.0, 0.0),
        ];
        let evaluator = DistanceMatrix::euclidean(&locations);
        let problem = Problem::new(
            locations,
            vec![
                Demand::empty(),
                Demand::single(0, 1.0),
                Demand::single(0, 1.0),
            ],
            ProductCatalog::new().with_product(0, 1.0),
            vec![
                TimeWindow::all_day(),
                TimeWindow::all_day(),
                // Closes before the earliest possible arrival.
                TimeWindow::new(0.0, 0.01),
            ],
            vec![Vehicle::new(10.0)],
            Box::new(evaluator),
        )
        .expect("valid problem");

        let solution = solver.solve(&problem, strategy);
        assert!(
            solution.unassigned.contains(&2),
            "{:?} placed an unreachable location",
            strategy
        );
    }
}

#[test]
fn test_solution_cost_is_the_sum_of_evaluator_edges() {
    let problem = create_test_problem();
    let solver = Solver::new(SolverConfig::new());

    let solution = solver.solve(&problem, Strategy::Greedy);

    let mut expected = 0.0;
    for route in &solution.routes {
        let mut previous = 0;
        for stop in &route.stops {
            expected += problem.base_distance(previous, stop.location);
            previous = stop.location;
        }
    }

    assert!((solution.cost(&problem) - expected).abs() < EPS);
}

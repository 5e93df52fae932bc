//! Optional route-local refinement by segment reversal.

use log::debug;

use crate::cost::CostModel;
use crate::feasibility::{Admission, FeasibilityGate, RouteState};
use crate::problem::Problem;
use crate::solution::{Route, RouteStop, Solution};

/// Re-derive a route's stop records by replaying its locations through the
/// feasibility gate. Returns `None` when any stop no longer fits.
fn replay(
    problem: &Problem,
    cost: &CostModel,
    locations: &[usize],
    v: usize,
    enforce_shift: bool,
) -> Option<Route> {
    let vehicle = problem.vehicles[v];
    let gate = FeasibilityGate::new(problem, cost);

    let start = if enforce_shift {
        vehicle.shift_start()
    } else {
        0.0
    };
    let shift_end = if enforce_shift {
        vehicle.shift.map(|window| window.end)
    } else {
        None
    };

    let mut state = RouteState::at_depot(start);
    let mut route = Route::new();

    for &location in locations {
        match gate.try_add(&state, location, vehicle.capacity, shift_end) {
            Admission::Accepted { time, load, wait } => {
                route.stops.push(RouteStop {
                    location,
                    arrival_time: time,
                    wait_time: wait,
                    load,
                });
                state = RouteState {
                    last_stop: location,
                    time,
                    load,
                };
            }
            _ => return None,
        }
    }

    Some(route)
}

/// Try reversing every stop sub-segment of a route, keeping a reversal
/// only when the replayed route finishes strictly earlier.
///
/// Reversals that the gate rejects anywhere along the route are discarded.
pub fn refine_route(
    problem: &Problem,
    cost: &CostModel,
    route: &Route,
    v: usize,
    enforce_shift: bool,
) -> Route {
    let n = route.len();
    if n < 2 {
        return route.clone();
    }

    let mut best_route = route.clone();
    let mut best_time = route.completion_time();

    for i in 0..n {
        for j in (i + 1)..n {
            let mut candidate = best_route.locations();
            candidate[i..=j].reverse();

            if let Some(new_route) = replay(problem, cost, &candidate, v, enforce_shift) {
                if new_route.completion_time() < best_time {
                    debug!(
                        "vehicle {}: reversing stops {}..={} finishes at {:.2} (was {:.2})",
                        v,
                        i,
                        j,
                        new_route.completion_time(),
                        best_time
                    );
                    best_time = new_route.completion_time();
                    best_route = new_route;
                }
            }
        }
    }

    best_route
}

/// Apply [`refine_route`] to every route of a solution.
pub fn refine_solution(
    problem: &Problem,
    cost: &CostModel,
    solution: &Solution,
    enforce_shift: bool,
) -> Solution {
    Solution {
        routes: solution
            .routes
            .iter()
            .enumerate()
            .map(|(v, route)| refine_route(problem, cost, route, v, enforce_shift))
            .collect(),
        unassigned: solution.unassigned.clone(),
    }
}

//! Shared multi-vehicle construction state used by every strategy.

use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::cost::CostModel;
use crate::feasibility::{Admission, FeasibilityGate, RouteState};
use crate::problem::Problem;
use crate::solution::{Route, RouteStop, Solution};

/// One in-progress route per vehicle plus the set of locations still to
/// serve.
///
/// All growth goes through the feasibility gate, so no strategy ever
/// re-implements a constraint check. The unvisited set is ordered to keep
/// candidate enumeration deterministic.
pub struct RouteBuilder<'a> {
    problem: &'a Problem,
    cost: &'a CostModel<'a>,
    gate: FeasibilityGate<'a>,
    pub states: Vec<RouteState>,
    pub routes: Vec<Route>,
    pub unvisited: BTreeSet<usize>,
}

impl<'a> RouteBuilder<'a> {
    /// Start every vehicle at the depot with its clock at zero.
    pub fn new(problem: &'a Problem, cost: &'a CostModel<'a>) -> Self {
        Self::with_start_times(problem, cost, |_| 0.0)
    }

    /// Start each vehicle's clock at its shift start instead of zero.
    pub fn starting_at_shift(problem: &'a Problem, cost: &'a CostModel<'a>) -> Self {
        Self::with_start_times(problem, cost, |vehicle| {
            problem.vehicles[vehicle].shift_start()
        })
    }

    fn with_start_times<F>(problem: &'a Problem, cost: &'a CostModel<'a>, start: F) -> Self
    where
        F: Fn(usize) -> f64,
    {
        let vehicle_count = problem.vehicle_count();
        let states = (0..vehicle_count)
            .map(|v| RouteState::at_depot(start(v)))
            .collect();

        RouteBuilder {
            problem,
            cost,
            gate: FeasibilityGate::new(problem, cost),
            states,
            routes: vec![Route::new(); vehicle_count],
            unvisited: (1..problem.locations.len()).collect(),
        }
    }

    /// One empty route per vehicle, parked at the depot.
    pub fn initial_routes(problem: &Problem) -> Vec<Route> {
        vec![Route::new(); problem.vehicle_count()]
    }

    /// Unvisited locations whose full demand still fits vehicle `v`'s
    /// remaining capacity, in index order.
    ///
    /// `subsets` adds the soft sector exclusion: a vehicle with a captured
    /// subset is restricted to it, and no vehicle may take a location
    /// reserved by another vehicle's live subset.
    pub fn feasible_locations(
        &self,
        v: usize,
        subsets: Option<&[BTreeSet<usize>]>,
    ) -> Vec<usize> {
        let capacity = self.problem.vehicles[v].capacity;
        let load = self.states[v].load;

        self.unvisited
            .iter()
            .copied()
            .filter(|&location| {
                if load + self.problem.location_volume(location) > capacity {
                    return false;
                }
                if let Some(subsets) = subsets {
                    if !subsets[v].is_empty() && !subsets[v].contains(&location) {
                        return false;
                    }
                    let reserved_elsewhere = subsets
                        .iter()
                        .enumerate()
                        .any(|(u, subset)| u != v && subset.contains(&location));
                    if reserved_elsewhere {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Sort candidates by travel distance from vehicle `v`'s last stop.
    ///
    /// The sort is stable in both directions, so equal distances keep
    /// index order.
    pub fn order_by_distance(&self, v: usize, candidates: &mut [usize], farthest_first: bool) {
        let from = self.states[v].last_stop;

        candidates.sort_by(|&a, &b| {
            let da = self.cost.travel_distance(from, a);
            let db = self.cost.travel_distance(from, b);
            let ordering = da.partial_cmp(&db).unwrap_or(Ordering::Equal);
            if farthest_first {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    /// Try to append `location` to vehicle `v`'s route, committing the new
    /// tail state on acceptance.
    pub fn try_commit(&mut self, v: usize, location: usize, enforce_shift: bool) -> bool {
        let vehicle = self.problem.vehicles[v];
        let shift_end = if enforce_shift {
            vehicle.shift.map(|window| window.end)
        } else {
            None
        };

        match self
            .gate
            .try_add(&self.states[v], location, vehicle.capacity, shift_end)
        {
            Admission::Accepted { time, load, wait } => {
                self.routes[v].stops.push(RouteStop {
                    location,
                    arrival_time: time,
                    wait_time: wait,
                    load,
                });
                self.states[v] = RouteState {
                    last_stop: location,
                    time,
                    load,
                };
                self.unvisited.remove(&location);
                debug!(
                    "vehicle {} added location {} (arrival {:.2}, wait {:.2}, load {:.2})",
                    v, location, time, wait, load
                );
                true
            }
            _ => false,
        }
    }

    /// Finish construction. Leftover locations are reported unassigned.
    pub fn into_solution(self) -> Solution {
        if !self.unvisited.is_empty() {
            info!("{} locations left unassigned", self.unvisited.len());
        }

        Solution {
            routes: self.routes,
            unassigned: self.unvisited.into_iter().collect(),
        }
    }
}

//! Greedy nearest-feasible insertion.

use log::info;

use crate::builder::RouteBuilder;
use crate::cost::{CostModel, VelocityProfile};
use crate::problem::Problem;
use crate::solution::{Route, Solution};
use crate::VrpSolver;

/// Round-robin greedy construction.
///
/// Each vehicle in turn tries its nearest capacity-feasible unvisited
/// location; the first candidate the gate accepts is committed. A full
/// sweep over the fleet without progress ends construction, with the
/// remaining locations reported unassigned.
pub struct GreedySolver<'a> {
    problem: &'a Problem,
    profile: VelocityProfile,
}

impl<'a> GreedySolver<'a> {
    /// Create a greedy solver over a problem snapshot.
    pub fn new(problem: &'a Problem, profile: VelocityProfile) -> Self {
        GreedySolver { problem, profile }
    }
}

impl VrpSolver for GreedySolver<'_> {
    fn initial_solution(&self) -> Vec<Route> {
        RouteBuilder::initial_routes(self.problem)
    }

    fn solve(&mut self) -> Solution {
        let cost = CostModel::new(self.problem, self.profile.clone());
        let mut builder = RouteBuilder::new(self.problem, &cost);

        while !builder.unvisited.is_empty() {
            let mut progress = false;

            for v in 0..self.problem.vehicle_count() {
                if builder.unvisited.is_empty() {
                    break;
                }

                let mut candidates = builder.feasible_locations(v, None);
                builder.order_by_distance(v, &mut candidates, false);

                for location in candidates {
                    if builder.try_commit(v, location, false) {
                        progress = true;
                        break;
                    }
                }
            }

            if !progress {
                info!("no vehicle can place a remaining location, stopping");
                break;
            }
        }

        builder.into_solution()
    }
}

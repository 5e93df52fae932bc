//! Sector-restricted construction strategies.

use log::info;
use std::collections::BTreeSet;

use crate::builder::RouteBuilder;
use crate::cost::{CostModel, VelocityProfile};
use crate::problem::Problem;
use crate::sectors::SectorPartition;
use crate::solution::{Route, Solution};
use crate::VrpSolver;

/// How the fleet is driven through its sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterMode {
    /// Vehicles take turns, one commit per vehicle per sweep.
    RoundRobin,
    /// One vehicle is driven to exhaustion before the next starts. Shift
    /// windows are enforced, and a stalled vehicle releases its reserved
    /// subset for the rest of the fleet.
    Sequential,
}

/// Greedy construction over the angular sector pre-partition.
///
/// A vehicle's candidate subset is captured lazily: the first accepted
/// stop locks it to the unvisited remainder of that stop's sector.
/// Locations reserved by another vehicle's live subset are off limits.
pub struct ClusteredSolver<'a> {
    problem: &'a Problem,
    profile: VelocityProfile,
    mode: ClusterMode,
    start_from_farthest: bool,
}

impl<'a> ClusteredSolver<'a> {
    /// Create a clustered solver over a problem snapshot.
    pub fn new(
        problem: &'a Problem,
        profile: VelocityProfile,
        mode: ClusterMode,
        start_from_farthest: bool,
    ) -> Self {
        ClusteredSolver {
            problem,
            profile,
            mode,
            start_from_farthest,
        }
    }

    /// Lock vehicle `v` to the unvisited remainder of `location`'s sector.
    ///
    /// A location outside every wedge leaves the vehicle unrestricted.
    fn capture_subset(
        &self,
        builder: &RouteBuilder,
        partition: &SectorPartition,
        subsets: &mut [BTreeSet<usize>],
        v: usize,
        location: usize,
    ) {
        if !subsets[v].is_empty() {
            subsets[v].remove(&location);
            return;
        }

        if let Some(label) = partition.label(location) {
            subsets[v] = builder
                .unvisited
                .iter()
                .copied()
                .filter(|&other| partition.label(other) == Some(label))
                .collect();
        }
    }

    fn solve_round_robin(&self, partition: &SectorPartition) -> Solution {
        let cost = CostModel::new(self.problem, self.profile.clone());
        let mut builder = RouteBuilder::new(self.problem, &cost);
        let mut subsets: Vec<BTreeSet<usize>> =
            vec![BTreeSet::new(); self.problem.vehicle_count()];
        let mut sweep = 0;

        while !builder.unvisited.is_empty() {
            sweep += 1;
            let mut progress = false;

            for v in 0..self.problem.vehicle_count() {
                if builder.unvisited.is_empty() {
                    break;
                }

                let mut candidates = builder.feasible_locations(v, Some(&subsets));
                let farthest_first = self.start_from_farthest && sweep == 1;
                builder.order_by_distance(v, &mut candidates, farthest_first);

                for location in candidates {
                    if builder.try_commit(v, location, false) {
                        self.capture_subset(&builder, partition, &mut subsets, v, location);
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

    fn solve_sequential(&self, partition: &SectorPartition) -> Solution {
        let cost = CostModel::new(self.problem, self.profile.clone());
        let mut builder = RouteBuilder::starting_at_shift(self.problem, &cost);
        let mut subsets: Vec<BTreeSet<usize>> =
            vec![BTreeSet::new(); self.problem.vehicle_count()];

        for v in 0..self.problem.vehicle_count() {
            let mut pass = 0;

            while !builder.unvisited.is_empty() {
                pass += 1;

                let mut candidates = builder.feasible_locations(v, Some(&subsets));
                let farthest_first = self.start_from_farthest && pass == 1;
                builder.order_by_distance(v, &mut candidates, farthest_first);

                let mut progress = false;
                for location in candidates {
                    if builder.try_commit(v, location, true) {
                        self.capture_subset(&builder, partition, &mut subsets, v, location);
                        progress = true;
                        break;
                    }
                }

                if !progress {
                    // Orphaned locations go back into the shared pool.
                    subsets[v].clear();
                    info!("vehicle {} stalled, releasing its reserved subset", v);
                    break;
                }
            }
        }

        builder.into_solution()
    }
}

impl VrpSolver for ClusteredSolver<'_> {
    fn initial_solution(&self) -> Vec<Route> {
        RouteBuilder::initial_routes(self.problem)
    }

    fn solve(&mut self) -> Solution {
        let partition = SectorPartition::compute(self.problem);

        match self.mode {
            ClusterMode::RoundRobin => self.solve_round_robin(&partition),
            ClusterMode::Sequential => self.solve_sequential(&partition),
        }
    }
}

//! Route and solution representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::problem::Problem;

/// One served stop on a vehicle route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    /// Location index in the problem.
    pub location: usize,
    /// Clock at which service starts (arrival plus any wait), hours.
    pub arrival_time: f64,
    /// Time spent waiting for the location's window to open.
    pub wait_time: f64,
    /// Cumulative vehicle load after serving this stop.
    pub load: f64,
}

/// Ordered stops for one vehicle.
///
/// The depot (index 0) is the implicit start and end and never appears
/// among the stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub stops: Vec<RouteStop>,
}

impl Route {
    /// Create a new, empty route.
    pub fn new() -> Self {
        Route { stops: Vec::new() }
    }

    /// Check if the route serves no locations.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of served stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Visited location indices, in service order.
    pub fn locations(&self) -> Vec<usize> {
        self.stops.iter().map(|stop| stop.location).collect()
    }

    /// Sum of evaluator distances from the depot through every stop, in
    /// the evaluator's unit (meters). The return leg to the depot is not
    /// priced.
    pub fn distance(&self, problem: &Problem) -> f64 {
        let mut total = 0.0;
        let mut previous = 0;

        for stop in &self.stops {
            total += problem.base_distance(previous, stop.location);
            previous = stop.location;
        }

        total
    }

    /// Clock after the last served stop, or zero for an empty route.
    pub fn completion_time(&self) -> f64 {
        self.stops.last().map(|stop| stop.arrival_time).unwrap_or(0.0)
    }

    /// Final vehicle load, or zero for an empty route.
    pub fn load(&self) -> f64 {
        self.stops.last().map(|stop| stop.load).unwrap_or(0.0)
    }
}

/// A full multi-vehicle assignment, one route per vehicle in fleet order.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub routes: Vec<Route>,
    /// Locations no construction attempt could place. Reported, never
    /// silently dropped.
    pub unassigned: Vec<usize>,
}

impl Solution {
    /// An empty solution with one route slot per vehicle.
    pub fn new(vehicle_count: usize) -> Self {
        Solution {
            routes: vec![Route::new(); vehicle_count],
            unassigned: Vec::new(),
        }
    }

    /// Total cost: the sum of evaluator distances along consecutive stops
    /// of every route.
    pub fn cost(&self, problem: &Problem) -> f64 {
        self.routes.iter().map(|route| route.distance(problem)).sum()
    }

    /// Number of locations served across all routes.
    pub fn visited_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Check whether every location was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Routes: {}", self.routes.len())?;
        writeln!(f, "  Visited: {}", self.visited_count())?;
        writeln!(f, "  Unassigned: {:?}", self.unassigned)?;

        for (v, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (load: {:.2}, done at {:.2})",
                v,
                route.locations(),
                route.load(),
                route.completion_time()
            )?;
        }

        Ok(())
    }
}

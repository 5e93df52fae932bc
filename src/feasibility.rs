//! The feasibility gate: the single decision point for growing a route.

use log::debug;

use crate::cost::CostModel;
use crate::problem::Problem;

/// Tail state of an in-progress vehicle route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteState {
    /// Index of the last visited location (the depot before any stop).
    pub last_stop: usize,
    /// Clock after serving the last stop, hours.
    pub time: f64,
    /// Load accumulated so far.
    pub load: f64,
}

impl RouteState {
    /// Fresh state: parked at the depot with an empty vehicle.
    pub fn at_depot(start: f64) -> Self {
        RouteState {
            last_stop: 0,
            time: start,
            load: 0.0,
        }
    }
}

/// Outcome of trying to append a location to a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// The stop fits. Carries the new tail clock and load, and the wait
    /// incurred before the location's window opened.
    Accepted { time: f64, load: f64, wait: f64 },
    /// Arrival (or arrival plus wait) falls past the location's window end.
    RejectedLate,
    /// Service would finish after the vehicle's shift end.
    RejectedShiftOver,
    /// The location's volume does not fit in the remaining capacity.
    RejectedOverCapacity,
}

impl Admission {
    /// Check whether the candidate was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted { .. })
    }
}

/// Decides whether a candidate stop can extend a route.
///
/// Every construction strategy routes its growth decisions through this
/// gate; none of them re-implements the checks.
pub struct FeasibilityGate<'a> {
    problem: &'a Problem,
    cost: &'a CostModel<'a>,
}

impl<'a> FeasibilityGate<'a> {
    /// Create a gate over a problem and its shared cost model.
    pub fn new(problem: &'a Problem, cost: &'a CostModel<'a>) -> Self {
        FeasibilityGate { problem, cost }
    }

    /// Try to append `location` to the route whose tail is `state`.
    ///
    /// Checks run in order: window end on arrival, window end after
    /// waiting, vehicle shift end, remaining capacity. The first failing
    /// check decides the rejection reason.
    pub fn try_add(
        &self,
        state: &RouteState,
        location: usize,
        vehicle_capacity: f64,
        vehicle_shift_end: Option<f64>,
    ) -> Admission {
        let window = self.problem.time_windows[location];
        let arrival = state.time + self.cost.travel_time(state.last_stop, location, state.time);

        if arrival > window.end {
            debug!(
                "too late for location {}: arrival {:.2}, window ends {:.2}",
                location, arrival, window.end
            );
            return Admission::RejectedLate;
        }

        let wait = (window.start - arrival).max(0.0);
        let current = arrival + wait;

        // With the wait clamped at the window start this should not trigger;
        // kept as a guard against float rounding at the window edge.
        if current > window.end {
            debug!(
                "too late for location {} after waiting: {:.2} past window end {:.2}",
                location, current, window.end
            );
            return Admission::RejectedLate;
        }

        if let Some(shift_end) = vehicle_shift_end {
            if current > shift_end {
                debug!(
                    "too late for location {}: {:.2} past shift end {:.2}",
                    location, current, shift_end
                );
                return Admission::RejectedShiftOver;
            }
        }

        let location_volume = self.problem.location_volume(location);
        if state.load + location_volume > vehicle_capacity {
            debug!(
                "not enough capacity for location {}: load {:.2} + volume {:.2} > capacity {:.2}",
                location, state.load, location_volume, vehicle_capacity
            );
            return Admission::RejectedOverCapacity;
        }

        Admission::Accepted {
            time: current,
            load: state.load + location_volume,
            wait,
        }
    }
}

//! Time-dependent travel cost model shared by every construction strategy.

use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// Day/night speed profile plus per-stop service times.
///
/// Velocities are in km/h, times in hours. The congestion span models
/// daytime urban traffic: inside it the fleet crawls at `min_velocity`,
/// outside it moves at `base_velocity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityProfile {
    /// Free-flow velocity.
    pub base_velocity: f64,
    /// Congested daytime velocity.
    pub min_velocity: f64,
    /// Hour at which congestion starts.
    pub congestion_start: f64,
    /// Hour at which congestion ends.
    pub congestion_end: f64,
    /// Fixed handling time at every stop with a non-zero approach distance.
    pub static_service_time: f64,
    /// Extra handling time per demanded unit at the destination.
    pub service_time_per_unit: f64,
}

impl Default for VelocityProfile {
    fn default() -> Self {
        VelocityProfile {
            base_velocity: 30.0,
            min_velocity: 11.0,
            congestion_start: 8.0,
            congestion_end: 23.0,
            static_service_time: 5.0 / 60.0,
            service_time_per_unit: 30.0 / 3600.0,
        }
    }
}

/// Travel cost model: pure functions of the problem data and the clock.
///
/// All strategies must price edges through the same model so their results
/// stay comparable.
pub struct CostModel<'a> {
    problem: &'a Problem,
    profile: VelocityProfile,
}

impl<'a> CostModel<'a> {
    /// Create a cost model over a problem snapshot.
    pub fn new(problem: &'a Problem, profile: VelocityProfile) -> Self {
        CostModel { problem, profile }
    }

    /// Base travel distance between two locations in kilometers.
    pub fn travel_distance(&self, from: usize, to: usize) -> f64 {
        self.problem.base_distance(from, to) / 1000.0
    }

    /// Velocity at a given hour of day.
    fn velocity_at(&self, hour: f64) -> f64 {
        if hour >= self.profile.congestion_start && hour < self.profile.congestion_end {
            self.profile.min_velocity
        } else {
            self.profile.base_velocity
        }
    }

    /// Time-dependent travel duration plus service time at the destination.
    ///
    /// The velocity is picked from the departure clock. Service time is the
    /// fixed handling term (skipped for a zero-length hop) plus the
    /// per-unit loading/unloading term for the destination's demand.
    pub fn travel_time(&self, from: usize, to: usize, current_time: f64) -> f64 {
        let distance = self.travel_distance(from, to);
        let travel = distance / self.velocity_at(current_time);

        let static_time = if distance > 0.0 {
            self.profile.static_service_time
        } else {
            0.0
        };
        let dynamic_time =
            self.problem.location_quantity(to) * self.profile.service_time_per_unit;

        travel + static_time + dynamic_time
    }
}

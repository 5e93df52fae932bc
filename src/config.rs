//! Configuration for the construction strategies.
//!
//! All tunables are passed explicitly through these structs; nothing in
//! the crate reads process-wide state.

use serde::{Deserialize, Serialize};

use crate::cost::VelocityProfile;

/// Tunables for the ant-colony strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntColonyConfig {
    /// Candidate solutions constructed per iteration.
    pub num_ants: usize,
    /// Fixed number of iterations.
    pub num_iterations: usize,
    /// Pheromone influence on edge selection.
    pub alpha: f64,
    /// Inverse-distance influence on edge selection.
    pub beta: f64,
    /// Fraction of pheromone lost per iteration.
    pub evaporation_rate: f64,
    /// Deposit constant; each solution reinforces its edges by `q / cost`.
    pub q: f64,
    /// Seed for the construction RNG.
    pub seed: u64,
}

impl Default for AntColonyConfig {
    fn default() -> Self {
        AntColonyConfig {
            num_ants: 10,
            num_iterations: 5,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            q: 100.0,
            seed: 42,
        }
    }
}

impl AntColonyConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        AntColonyConfig::default()
    }

    /// Set the number of ants per iteration.
    pub fn with_num_ants(mut self, num_ants: usize) -> Self {
        self.num_ants = num_ants;
        self
    }

    /// Set the number of iterations.
    pub fn with_num_iterations(mut self, num_iterations: usize) -> Self {
        self.num_iterations = num_iterations;
        self
    }

    /// Set the pheromone influence.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the heuristic influence.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Set the deposit constant.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Top-level solver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Travel speed and service time constants.
    pub velocity: VelocityProfile,
    /// Reverse the first-pass candidate ordering in the clustered
    /// strategies, so distant stops are placed while shift time remains.
    pub start_from_farthest: bool,
    /// Run the segment-reversal pass on every constructed route.
    pub refine_routes: bool,
    /// Ant-colony tunables.
    pub ant_colony: AntColonyConfig,
}

impl SolverConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        SolverConfig::default()
    }

    /// Set the velocity profile.
    pub fn with_velocity(mut self, velocity: VelocityProfile) -> Self {
        self.velocity = velocity;
        self
    }

    /// Enable farthest-first ordering for the first clustered pass.
    pub fn with_start_from_farthest(mut self, enabled: bool) -> Self {
        self.start_from_farthest = enabled;
        self
    }

    /// Enable the segment-reversal refinement pass.
    pub fn with_refine_routes(mut self, enabled: bool) -> Self {
        self.refine_routes = enabled;
        self
    }

    /// Set the ant-colony tunables.
    pub fn with_ant_colony(mut self, ant_colony: AntColonyConfig) -> Self {
        self.ant_colony = ant_colony;
        self
    }
}

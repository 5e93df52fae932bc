//! # CVRPTW construction solver
//!
//! Heuristic route construction for the Capacitated Vehicle Routing
//! Problem with Time Windows: delivery stops with multi-product demand
//! and delivery windows are assigned to a fleet of capacity-limited
//! vehicles, minimizing travel and wait cost under a time-of-day
//! velocity profile.
//!
//! Four strategies share one feasibility gate and one cost model: pure
//! greedy nearest-feasible insertion, two angular-sector clustered
//! variants, and an ant-colony metaheuristic. Routes are heuristic, not
//! provably optimal.

pub mod ant_colony;
pub mod builder;
pub mod clustered;
pub mod config;
pub mod cost;
pub mod feasibility;
pub mod greedy;
pub mod local_search;
pub mod problem;
pub mod sectors;
pub mod solution;
pub mod utils;

use std::fmt;
use std::str::FromStr;

use crate::ant_colony::AntColonySolver;
use crate::clustered::{ClusterMode, ClusteredSolver};
use crate::config::SolverConfig;
use crate::cost::CostModel;
use crate::greedy::GreedySolver;
use crate::problem::Problem;
use crate::solution::{Route, Solution};

/// Construction strategy, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Greedy,
    Clustered,
    ClusteredSequential,
    AntColony,
}

impl FromStr for Strategy {
    type Err = SolverError;

    fn from_str(name: &str) -> Result<Self, SolverError> {
        match name {
            "greedy" => Ok(Strategy::Greedy),
            "clustered" => Ok(Strategy::Clustered),
            "clustered_sequential" => Ok(Strategy::ClusteredSequential),
            "ant_colony" => Ok(Strategy::AntColony),
            other => Err(SolverError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Errors surfaced before any construction work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The requested strategy name is not recognized.
    UnknownStrategy(String),
    /// The problem snapshot fails a precondition.
    InvalidProblem(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::UnknownStrategy(name) => {
                write!(f, "unknown strategy \"{}\"", name)
            }
            SolverError::InvalidProblem(reason) => {
                write!(f, "invalid problem: {}", reason)
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Interface implemented by every construction strategy.
pub trait VrpSolver {
    /// One empty route per vehicle, before any construction.
    fn initial_solution(&self) -> Vec<Route>;

    /// Build a full multi-vehicle solution.
    fn solve(&mut self) -> Solution;
}

/// Facade selecting and running a named construction strategy.
///
/// Every strategy consumes the same problem snapshot and produces the
/// same output shape: one ordered stop list per vehicle, plus the
/// locations nothing could place.
pub struct Solver {
    pub config: SolverConfig,
}

impl Solver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Solver { config }
    }

    /// Run a construction strategy over a validated problem.
    pub fn solve(&self, problem: &Problem, strategy: Strategy) -> Solution {
        let velocity = self.config.velocity.clone();

        let mut solution = match strategy {
            Strategy::Greedy => GreedySolver::new(problem, velocity.clone()).solve(),
            Strategy::Clustered => ClusteredSolver::new(
                problem,
                velocity.clone(),
                ClusterMode::RoundRobin,
                self.config.start_from_farthest,
            )
            .solve(),
            Strategy::ClusteredSequential => ClusteredSolver::new(
                problem,
                velocity.clone(),
                ClusterMode::Sequential,
                self.config.start_from_farthest,
            )
            .solve(),
            Strategy::AntColony => {
                AntColonySolver::new(problem, velocity.clone(), self.config.ant_colony.clone())
                    .solve()
            }
        };

        if self.config.refine_routes {
            let cost = CostModel::new(problem, velocity);
            let enforce_shift = matches!(strategy, Strategy::ClusteredSequential);
            solution = local_search::refine_solution(problem, &cost, &solution, enforce_shift);
        }

        solution
    }

    /// Run a strategy picked by name; unknown names fail fast.
    pub fn solve_named(&self, problem: &Problem, name: &str) -> Result<Solution, SolverError> {
        Ok(self.solve(problem, name.parse()?))
    }
}

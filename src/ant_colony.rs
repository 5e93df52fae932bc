//! Ant-colony construction metaheuristic.

use itertools::Itertools;
use log::info;
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;

use crate::builder::RouteBuilder;
use crate::config::AntColonyConfig;
use crate::cost::{CostModel, VelocityProfile};
use crate::problem::Problem;
use crate::solution::{Route, Solution};
use crate::VrpSolver;

/// Attractiveness substitute for a zero-length edge, where the inverse
/// distance heuristic is undefined.
const ZERO_DISTANCE_ATTRACTION: f64 = 1e6;

/// Pairwise pheromone levels over the location indices.
///
/// Exclusively owned by one solver and re-initialized at the start of each
/// run; never shared across runs or strategies.
pub struct PheromoneField {
    levels: Vec<f64>,
    size: usize,
}

impl PheromoneField {
    /// A field over `size` locations, all levels at 1.0.
    pub fn new(size: usize) -> Self {
        PheromoneField {
            levels: vec![1.0; size * size],
            size,
        }
    }

    /// Pheromone level on the directed edge `from -> to`.
    pub fn level(&self, from: usize, to: usize) -> f64 {
        self.levels[from * self.size + to]
    }

    /// Decay every level by the evaporation rate.
    pub fn evaporate(&mut self, rate: f64) {
        for level in &mut self.levels {
            *level *= 1.0 - rate;
        }
    }

    /// Reinforce the directed edge `from -> to`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.levels[from * self.size + to] += amount;
    }
}

/// Probabilistic construction guided by pheromone reinforcement.
///
/// Each ant drives the fleet sequentially: from the current route tail it
/// samples the next stop among capacity-feasible unvisited locations with
/// probability proportional to `pheromone^alpha * (1/distance)^beta`, then
/// asks the gate to commit. A rejected sample or an empty candidate set
/// ends that vehicle's route; once the fleet is spent, whatever remains
/// unvisited stays unassigned. Full coverage is therefore not guaranteed,
/// even when a covering assignment exists.
pub struct AntColonySolver<'a> {
    problem: &'a Problem,
    profile: VelocityProfile,
    config: AntColonyConfig,
    pheromone: PheromoneField,
    rng: ChaCha8Rng,
    /// Cost of the best solution found so far.
    pub best_cost: f64,
    /// Global best cost recorded after each iteration.
    pub best_cost_trace: Vec<f64>,
}

impl<'a> AntColonySolver<'a> {
    /// Create an ant-colony solver over a problem snapshot.
    pub fn new(problem: &'a Problem, profile: VelocityProfile, config: AntColonyConfig) -> Self {
        let size = problem.locations.len();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        AntColonySolver {
            problem,
            profile,
            config,
            pheromone: PheromoneField::new(size),
            rng,
            best_cost: f64::INFINITY,
            best_cost_trace: Vec::new(),
        }
    }

    /// Selection weight of the directed edge `from -> to`.
    fn attractiveness(&self, from: usize, to: usize) -> f64 {
        let pheromone = self.pheromone.level(from, to);
        let distance = self.problem.base_distance(from, to) / 1000.0;
        let heuristic = if distance > 0.0 {
            1.0 / distance
        } else {
            ZERO_DISTANCE_ATTRACTION
        };

        pheromone.powf(self.config.alpha) * heuristic.powf(self.config.beta)
    }

    /// One ant's full multi-vehicle candidate solution.
    fn construct_ant_solution(&mut self, cost: &CostModel) -> Solution {
        let mut builder = RouteBuilder::new(self.problem, cost);

        for v in 0..self.problem.vehicle_count() {
            loop {
                let candidates = builder.feasible_locations(v, None);
                if candidates.is_empty() {
                    break;
                }

                let from = builder.states[v].last_stop;
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|&candidate| self.attractiveness(from, candidate))
                    .collect();

                let choice = match WeightedIndex::new(&weights) {
                    Ok(distribution) => candidates[distribution.sample(&mut self.rng)],
                    Err(_) => break,
                };

                // A sample the gate rejects ends this vehicle's route.
                if !builder.try_commit(v, choice, false) {
                    break;
                }
            }
        }

        builder.into_solution()
    }

    /// Reinforce every edge used by a candidate solution.
    fn reinforce(&mut self, solution: &Solution, solution_cost: f64) {
        if solution_cost <= 0.0 {
            return;
        }
        let amount = self.config.q / solution_cost;

        for route in &solution.routes {
            let mut previous = 0;
            for stop in &route.stops {
                self.pheromone.deposit(previous, stop.location, amount);
                previous = stop.location;
            }
        }
    }
}

impl VrpSolver for AntColonySolver<'_> {
    fn initial_solution(&self) -> Vec<Route> {
        RouteBuilder::initial_routes(self.problem)
    }

    fn solve(&mut self) -> Solution {
        // Fresh field, seed, and best tracking: repeated runs of the same
        // solver are independent and reproducible.
        self.pheromone = PheromoneField::new(self.problem.locations.len());
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.best_cost = f64::INFINITY;
        self.best_cost_trace.clear();

        let cost = CostModel::new(self.problem, self.profile.clone());
        let mut best_solution: Option<Solution> = None;

        for iteration in 0..self.config.num_iterations {
            let mut solutions = Vec::with_capacity(self.config.num_ants);
            for _ in 0..self.config.num_ants {
                solutions.push(self.construct_ant_solution(&cost));
            }

            let costs: Vec<f64> = solutions
                .iter()
                .map(|solution| solution.cost(self.problem))
                .collect();

            let iteration_best = costs
                .iter()
                .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            if let Some(index) = iteration_best {
                if costs[index] < self.best_cost {
                    self.best_cost = costs[index];
                    best_solution = Some(solutions[index].clone());
                }
            }

            self.pheromone.evaporate(self.config.evaporation_rate);
            for (solution, &solution_cost) in solutions.iter().zip(&costs) {
                self.reinforce(solution, solution_cost);
            }

            self.best_cost_trace.push(self.best_cost);
            info!("iteration {}: best cost {:.2}", iteration + 1, self.best_cost);
        }

        best_solution.unwrap_or_else(|| {
            let mut empty = Solution::new(self.problem.vehicle_count());
            empty.unassigned = (1..self.problem.locations.len()).collect();
            empty
        })
    }
}

//! Problem definition and data structures for the CVRPTW.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::SolverError;

/// A point in the plane. Index 0 of [`Problem::locations`] is the depot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Polar angle of this location around `center`, in radians.
    pub fn angle_from(&self, center: &Location) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

/// Delivery time window in hours-as-float (e.g. 8.5 = 08:30).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    /// Create a new time window.
    pub fn new(start: f64, end: f64) -> Self {
        TimeWindow { start, end }
    }

    /// The unconstrained window used for the depot.
    pub fn all_day() -> Self {
        TimeWindow {
            start: 0.0,
            end: 24.0,
        }
    }
}

/// Identifier of a product in the catalog.
pub type ProductId = u32;

/// Per-location demand as a sparse product vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    entries: Vec<(ProductId, f64)>,
}

impl Demand {
    /// No demand; used for the depot.
    pub fn empty() -> Self {
        Demand {
            entries: Vec::new(),
        }
    }

    /// Demand over several products.
    pub fn new(entries: Vec<(ProductId, f64)>) -> Self {
        Demand { entries }
    }

    /// Demand for a single product.
    pub fn single(product: ProductId, quantity: f64) -> Self {
        Demand {
            entries: vec![(product, quantity)],
        }
    }

    /// Iterate over `(product, quantity)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(ProductId, f64)> {
        self.entries.iter()
    }

    /// Total demanded quantity across all products.
    pub fn total_quantity(&self) -> f64 {
        self.entries.iter().map(|(_, quantity)| quantity).sum()
    }

    /// Check whether nothing is demanded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unit volumes per product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    volumes: HashMap<ProductId, f64>,
}

impl ProductCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        ProductCatalog::default()
    }

    /// Add a product with its unit volume.
    pub fn with_product(mut self, product: ProductId, unit_volume: f64) -> Self {
        self.volumes.insert(product, unit_volume);
        self
    }

    /// Unit volume of a product, if it is defined.
    pub fn unit_volume(&self, product: ProductId) -> Option<f64> {
        self.volumes.get(&product).copied()
    }

    /// Check whether a product is defined.
    pub fn contains(&self, product: ProductId) -> bool {
        self.volumes.contains_key(&product)
    }
}

/// A vehicle with a volume capacity and an optional driver shift window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub capacity: f64,
    pub shift: Option<TimeWindow>,
}

impl Vehicle {
    /// A vehicle without a shift restriction.
    pub fn new(capacity: f64) -> Self {
        Vehicle {
            capacity,
            shift: None,
        }
    }

    /// A vehicle restricted to a driver shift window.
    pub fn with_shift(capacity: f64, shift: TimeWindow) -> Self {
        Vehicle {
            capacity,
            shift: Some(shift),
        }
    }

    /// Hour at which the vehicle may start driving.
    pub fn shift_start(&self) -> f64 {
        self.shift.map(|window| window.start).unwrap_or(0.0)
    }
}

/// Source of base distances between location indices, in meters.
///
/// Injected into the problem so the core never touches the backing data
/// (precomputed matrix, cached service responses, plain geometry).
pub trait DistanceEvaluator {
    fn distance(&self, from: usize, to: usize) -> f64;
}

impl<F> DistanceEvaluator for F
where
    F: Fn(usize, usize) -> f64,
{
    fn distance(&self, from: usize, to: usize) -> f64 {
        self(from, to)
    }
}

/// Precomputed pairwise distances in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMatrix {
    matrix: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Wrap an externally computed matrix.
    pub fn new(matrix: Vec<Vec<f64>>) -> Self {
        DistanceMatrix { matrix }
    }

    /// Planar Euclidean distances with coordinates read as kilometers.
    pub fn euclidean(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let dx = locations[i].x - locations[j].x;
                    let dy = locations[i].y - locations[j].y;
                    matrix[i][j] = (dx * dx + dy * dy).sqrt() * 1000.0;
                }
            }
        }

        DistanceMatrix { matrix }
    }
}

impl DistanceEvaluator for DistanceMatrix {
    fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }
}

/// Read-only snapshot of one planning run.
///
/// Index 0 of every location-aligned vector is the depot. Validated on
/// construction; the construction strategies assume a valid problem.
pub struct Problem {
    pub locations: Vec<Location>,
    pub demands: Vec<Demand>,
    pub product_volumes: ProductCatalog,
    pub time_windows: Vec<TimeWindow>,
    pub vehicles: Vec<Vehicle>,
    evaluator: Box<dyn DistanceEvaluator>,
}

impl Problem {
    /// Build a problem snapshot, checking preconditions up front.
    pub fn new(
        locations: Vec<Location>,
        demands: Vec<Demand>,
        product_volumes: ProductCatalog,
        time_windows: Vec<TimeWindow>,
        vehicles: Vec<Vehicle>,
        evaluator: Box<dyn DistanceEvaluator>,
    ) -> Result<Self, SolverError> {
        if locations.is_empty() {
            return Err(SolverError::InvalidProblem(
                "at least the depot location is required".to_string(),
            ));
        }
        if demands.len() != locations.len() {
            return Err(SolverError::InvalidProblem(format!(
                "{} demand records for {} locations",
                demands.len(),
                locations.len()
            )));
        }
        if time_windows.len() != locations.len() {
            return Err(SolverError::InvalidProblem(format!(
                "{} time windows for {} locations",
                time_windows.len(),
                locations.len()
            )));
        }
        if vehicles.is_empty() {
            return Err(SolverError::InvalidProblem(
                "no vehicles available".to_string(),
            ));
        }
        for (v, vehicle) in vehicles.iter().enumerate() {
            if !(vehicle.capacity > 0.0) {
                return Err(SolverError::InvalidProblem(format!(
                    "vehicle {} has non-positive capacity {}",
                    v, vehicle.capacity
                )));
            }
        }
        for (index, demand) in demands.iter().enumerate() {
            for &(product, _) in demand.iter() {
                if !product_volumes.contains(product) {
                    return Err(SolverError::InvalidProblem(format!(
                        "location {} demands product {} which has no catalog volume",
                        index, product
                    )));
                }
            }
        }

        Ok(Problem {
            locations,
            demands,
            product_volumes,
            time_windows,
            vehicles,
            evaluator,
        })
    }

    /// Number of vehicles in the fleet.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of delivery locations, excluding the depot.
    pub fn customer_count(&self) -> usize {
        self.locations.len() - 1
    }

    /// Base distance between two location indices in meters.
    pub fn base_distance(&self, from: usize, to: usize) -> f64 {
        self.evaluator.distance(from, to)
    }

    /// Total product volume demanded at a location.
    pub fn location_volume(&self, location: usize) -> f64 {
        self.demands[location]
            .iter()
            .map(|&(product, quantity)| {
                quantity * self.product_volumes.unit_volume(product).unwrap_or(0.0)
            })
            .sum()
    }

    /// Total demanded quantity at a location, across all products.
    pub fn location_quantity(&self, location: usize) -> f64 {
        self.demands[location].total_quantity()
    }
}

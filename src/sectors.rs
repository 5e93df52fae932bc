//! Angular sector pre-partitioning around the depot.

use itertools::Itertools;
use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use crate::problem::Problem;

/// Partition of non-depot locations into angular wedges sized to the fleet.
///
/// Locations are swept in ascending polar-angle order around the depot. A
/// location joins the current wedge while the wedge's cumulative volume
/// stays within its vehicle's capacity and the location's angle deviates at
/// most a quarter turn from the wedge's starting angle; otherwise the next
/// vehicle's wedge begins there. Locations left over once the fleet is
/// exhausted stay unlabeled.
#[derive(Debug, Clone)]
pub struct SectorPartition {
    sectors: Vec<Vec<usize>>,
    labels: Vec<Option<usize>>,
}

impl SectorPartition {
    /// Compute the partition for a problem snapshot.
    pub fn compute(problem: &Problem) -> Self {
        let n = problem.locations.len();
        let vehicle_count = problem.vehicle_count();
        let depot = problem.locations[0];

        let angles: Vec<f64> = problem
            .locations
            .iter()
            .map(|location| location.angle_from(&depot))
            .collect();

        let order: Vec<usize> = (1..n)
            .sorted_by(|&a, &b| {
                angles[a].partial_cmp(&angles[b]).unwrap_or(Ordering::Equal)
            })
            .collect();

        let mut sectors = vec![Vec::new(); vehicle_count];
        let mut labels = vec![None; n];

        if order.is_empty() {
            return SectorPartition { sectors, labels };
        }

        let mut sector = 0;
        let mut start_angle = angles[order[0]];
        let mut capacity = problem.vehicles[0].capacity;
        let mut volume = 0.0;

        for &location in &order {
            let location_volume = problem.location_volume(location);

            if volume + location_volume <= capacity
                && (angles[location] - start_angle).abs() <= FRAC_PI_2
            {
                sectors[sector].push(location);
                labels[location] = Some(sector);
                volume += location_volume;
            } else {
                start_angle = angles[location];
                sector += 1;
                if sector < vehicle_count {
                    capacity = problem.vehicles[sector].capacity;
                    volume = location_volume;
                    sectors[sector].push(location);
                    labels[location] = Some(sector);
                } else {
                    break;
                }
            }
        }

        SectorPartition { sectors, labels }
    }

    /// The location subset assigned to vehicle `v`.
    pub fn sector(&self, v: usize) -> &[usize] {
        &self.sectors[v]
    }

    /// All per-vehicle subsets, in fleet order.
    pub fn sectors(&self) -> &[Vec<usize>] {
        &self.sectors
    }

    /// Sector index of a location; `None` for the depot and for locations
    /// that did not fit any wedge.
    pub fn label(&self, location: usize) -> Option<usize> {
        self.labels[location]
    }
}

//! Formatting and export helpers for solutions.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::problem::Problem;
use crate::solution::Solution;

/// Render a solution as a per-vehicle route table.
pub fn format_routes(solution: &Solution, problem: &Problem) -> String {
    let mut out = String::new();

    for (v, route) in solution.routes.iter().enumerate() {
        let _ = writeln!(
            out,
            "Vehicle {} (capacity {:.2}):",
            v + 1,
            problem.vehicles[v].capacity
        );

        if route.is_empty() {
            let _ = writeln!(out, "  (no stops)");
            continue;
        }

        for stop in &route.stops {
            let _ = writeln!(
                out,
                "  location {:>3}  arrival {:6.2}  wait {:5.2}  load {:6.2}",
                stop.location, stop.arrival_time, stop.wait_time, stop.load
            );
        }
        let _ = writeln!(out, "  return to depot");
    }

    if !solution.unassigned.is_empty() {
        let _ = writeln!(out, "Unassigned locations: {:?}", solution.unassigned);
    }

    let _ = writeln!(
        out,
        "Total distance: {:.2} km",
        solution.cost(problem) / 1000.0
    );

    out
}

/// Write the route table to a text file.
pub fn save_solution<P: AsRef<Path>>(
    solution: &Solution,
    problem: &Problem,
    path: P,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_routes(solution, problem).as_bytes())
}

//! Movement cost and heuristic model shared by both search engines.
//!
//! Climbing is penalised quadratically while descending is linear, so the
//! cost of an edge depends on the direction of travel. The heuristic adds the
//! elevation gap only linearly; it is therefore not admissible on every
//! terrain and A* results are not guaranteed to be optimal.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::grid::ElevationGrid;
use crate::state::{PathState, Position};

/// Cost of moving between two adjacent cells with the given elevations.
///
/// - downhill: `1 + drop`
/// - uphill: `1 + rise^2`
/// - flat: `1`
pub fn transition_cost(src_elevation: i64, dest_elevation: i64) -> u64 {
    match src_elevation.cmp(&dest_elevation) {
        Ordering::Greater => 1u64.saturating_add(src_elevation.abs_diff(dest_elevation)),
        Ordering::Less => {
            let rise = dest_elevation.abs_diff(src_elevation);
            1u64.saturating_add(rise.saturating_mul(rise))
        }
        Ordering::Equal => 1,
    }
}

/// Manhattan distance plus the absolute elevation difference.
pub fn heuristic(
    current: Position,
    current_elevation: i64,
    goal: Position,
    goal_elevation: i64,
) -> u64 {
    current
        .manhattan(goal)
        .saturating_add(current_elevation.abs_diff(goal_elevation))
}

/// Heuristic values pre-computed for every cell of a grid.
///
/// The goal and the elevations never change during a search, so the A*
/// engine builds this once and answers each evaluation with a lookup.
#[derive(Debug, Clone)]
pub struct HeuristicTable {
    width: usize,
    values: Vec<u64>,
}

impl HeuristicTable {
    pub fn build(grid: &ElevationGrid) -> Result<Self> {
        let goal = grid.goal();
        let goal_elevation = grid.elevation_at(goal)?;
        let mut values = Vec::with_capacity(grid.width() * grid.height());
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let position = Position::new(x, y);
                let elevation = grid.elevation_at(position)?;
                values.push(heuristic(position, elevation, goal, goal_elevation));
            }
        }
        Ok(Self {
            width: grid.width(),
            values,
        })
    }

    /// Heuristic estimate for `position`.
    pub fn estimate(&self, position: Position) -> Result<u64> {
        let out_of_bounds = || Error::OutOfBounds {
            x: position.x as i64,
            y: position.y as i64,
        };
        if position.x >= self.width {
            return Err(out_of_bounds());
        }
        self.values
            .get(position.y * self.width + position.x)
            .copied()
            .ok_or_else(out_of_bounds)
    }

    /// A* evaluation value: cost so far plus the heuristic estimate.
    pub fn a_star_value(&self, state: &PathState) -> Result<u64> {
        Ok(state.cost.saturating_add(self.estimate(state.position)?))
    }
}

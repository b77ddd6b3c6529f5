//! Common test utilities and fixture helpers.
//!
//! Map fixtures live under `docs/fixtures/maps` at the workspace root.

use std::path::PathBuf;

use ridgewalk_lib::{load_map, Direction, ElevationGrid, GoalSpec, Position};

/// Path to the map fixtures directory.
pub fn maps_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/maps")
}

/// Load a fixture map and turn it into a grid.
pub fn fixture_grid(name: &str, goal: GoalSpec, energy_budget: u64) -> ElevationGrid {
    load_map(maps_dir().join(name))
        .expect("fixture map loads")
        .into_grid(goal, energy_budget)
        .expect("fixture grid is valid")
}

/// Walk `moves` from `start`, returning the final cell and the cost paid.
#[allow(dead_code)]
pub fn replay(grid: &ElevationGrid, start: Position, moves: &[Direction]) -> (Position, u64) {
    let mut position = start;
    let mut cost = 0;
    for &direction in moves {
        let next = grid
            .step(position, direction)
            .unwrap_or_else(|| panic!("move {direction} leaves the grid at {position}"));
        cost += grid.transition_cost(position, next).expect("on-grid move");
        position = next;
    }
    (position, cost)
}

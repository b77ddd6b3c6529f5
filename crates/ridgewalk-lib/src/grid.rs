use crate::cost::transition_cost;
use crate::error::{Error, Result};
use crate::state::{Direction, PathState, Position};

/// Immutable elevation surface searched by the route engines.
///
/// Elevations are stored row-major with row 0 at `y = 0`. The goal and the
/// energy budget belong to the grid because every engine consults them on
/// each expansion.
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    elevations: Vec<i64>,
    width: usize,
    height: usize,
    goal: Position,
    energy_budget: u64,
}

impl ElevationGrid {
    /// Build a grid from rows indexed by `y` (`rows[0]` is the bottom row).
    pub fn new(rows: Vec<Vec<i64>>, goal: Position, energy_budget: u64) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(Error::EmptyMap);
        }

        let mut elevations = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(Error::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            elevations.extend(values);
        }

        if goal.x >= width || goal.y >= height {
            return Err(Error::GoalOutOfBounds {
                x: goal.x,
                y: goal.y,
            });
        }

        Ok(Self {
            elevations,
            width,
            height,
            goal,
            energy_budget,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Maximum accumulated cost a path may reach.
    pub fn energy_budget(&self) -> u64 {
        self.energy_budget
    }

    /// Whether `(x, y)` lies on the grid. Signed so off-grid lookups can be asked about.
    pub fn is_valid(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Elevation at `(x, y)`.
    pub fn elevation(&self, x: i64, y: i64) -> Result<i64> {
        if !self.is_valid(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(self.elevations[y as usize * self.width + x as usize])
    }

    pub fn elevation_at(&self, position: Position) -> Result<i64> {
        self.elevation(position.x as i64, position.y as i64)
    }

    pub fn is_goal(&self, state: &PathState) -> bool {
        state.position == self.goal
    }

    /// Synthetic state sitting on the goal with no moves and zero cost.
    pub fn goal_state(&self) -> PathState {
        PathState::new(self.goal)
    }

    /// Cell reached by moving `direction` from `from`, if it stays on the grid.
    pub fn step(&self, from: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = from.x.checked_add_signed(dx)?;
        let y = from.y.checked_add_signed(dy)?;
        let next = Position::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Transition model: the up-to-four successors of `state`, in N, E, S, W
    /// order. Downstream tie-breaking relies on this order.
    pub fn neighbors(&self, state: &PathState) -> Vec<PathState> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                self.step(state.position, direction)
                    .map(|next| state.successor(direction, next))
            })
            .collect()
    }

    /// Cost of moving from `src` to the adjacent cell `dest`.
    pub fn transition_cost(&self, src: Position, dest: Position) -> Result<u64> {
        let from = self.elevation_at(src)?;
        let to = self.elevation_at(dest)?;
        Ok(transition_cost(from, to))
    }
}

use std::fmt;

use serde::Serialize;

/// Cardinal move direction.
///
/// The declaration order (N, E, S, W) is also the tie-break preference used
/// by the A* frontier, so the derived `Ord` must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    /// Towards increasing `y`.
    N,
    /// Towards increasing `x`.
    E,
    /// Towards decreasing `y`.
    S,
    /// Towards decreasing `x`.
    W,
}

impl Direction {
    /// Neighbour generation order.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Direction that undoes this move.
    pub fn inverse(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::E => Direction::W,
            Direction::S => Direction::N,
            Direction::W => Direction::E,
        }
    }

    /// `(dx, dy)` offset applied by this move.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (0, 1),
            Direction::E => (1, 0),
            Direction::S => (0, -1),
            Direction::W => (-1, 0),
        }
    }

    /// Single-letter symbol used in reports.
    pub fn symbol(self) -> char {
        match self {
            Direction::N => 'N',
            Direction::E => 'E',
            Direction::S => 'S',
            Direction::W => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Cell coordinate on the elevation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Position) -> u64 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as u64
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Agent at `position` having taken `moves` for an accumulated `cost`.
///
/// Two states describe the same place when their positions match, whatever
/// route produced them. Use [`PathState::same_position`] for that check; the
/// type deliberately has no `PartialEq` so distinct routes to one cell are
/// never compared structurally.
#[derive(Debug, Clone, Serialize)]
pub struct PathState {
    pub position: Position,
    pub moves: Vec<Direction>,
    pub cost: u64,
    /// A* evaluation value (`cost + heuristic`). Unused outside the A* engine.
    #[serde(skip)]
    pub priority: u64,
}

impl PathState {
    /// Fresh state with no moves and zero cost.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            moves: Vec::new(),
            cost: 0,
            priority: 0,
        }
    }

    pub fn at(x: usize, y: usize) -> Self {
        Self::new(Position::new(x, y))
    }

    /// Identity-by-position check used for de-duplication.
    pub fn same_position(&self, other: &PathState) -> bool {
        self.position == other.position
    }

    /// Successor reached by moving `direction` into `position`.
    ///
    /// The parent's cost is carried over unchanged; the engine adds the edge
    /// cost once it knows which direction of travel applies.
    pub fn successor(&self, direction: Direction, position: Position) -> Self {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(direction);
        Self {
            position,
            moves,
            cost: self.cost,
            priority: 0,
        }
    }

    /// Moves rendered as `['N', 'E']`.
    pub fn moves_label(&self) -> String {
        format_moves(&self.moves)
    }
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pos={} Moves={} Cost={}",
            self.position,
            self.moves_label(),
            self.cost
        )
    }
}

/// Render a move sequence as a bracketed, quoted list.
pub fn format_moves(moves: &[Direction]) -> String {
    let quoted = moves
        .iter()
        .map(|direction| format!("'{}'", direction))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", quoted)
}

//! A* search over an [`ElevationGrid`].
//!
//! The frontier is a sorted vector rather than a binary heap: duplicate
//! positions are reconciled in place and the final frontier is reported in
//! exact expansion order, both of which need random access and a total order.

use std::cmp::Ordering;

use tracing::{trace, warn};

use crate::cost::HeuristicTable;
use crate::error::Result;
use crate::grid::ElevationGrid;
use crate::search::{ensure_start, ExploredSet, SearchAlgorithm, SearchOutcome, SearchResult};
use crate::state::{PathState, Position};

/// Order in which two frontier states are expanded. `Less` means `a` goes first.
///
/// 1. lower priority first;
/// 2. on equal priority, the longer move sequence first (it has been waiting
///    in the frontier longest);
/// 3. then by direction, most recent move backward, N < E < S < W.
pub fn expansion_order(a: &PathState, b: &PathState) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| b.moves.len().cmp(&a.moves.len()))
        .then_with(|| a.moves.iter().rev().cmp(b.moves.iter().rev()))
}

/// Priority-ordered frontier holding at most one state per position.
///
/// Stored so the next state to expand sits at the end of the vector.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    states: Vec<PathState>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Remove and return the next state to expand.
    pub fn pop(&mut self) -> Option<PathState> {
        self.states.pop()
    }

    /// Next state to expand, without removing it.
    pub fn peek(&self) -> Option<&PathState> {
        self.states.last()
    }

    /// Queued state at `position`, if any.
    pub fn get(&self, position: Position) -> Option<&PathState> {
        self.states.iter().find(|state| state.position == position)
    }

    /// Remove the queued state at `position`.
    pub fn remove(&mut self, position: Position) -> Option<PathState> {
        let index = self
            .states
            .iter()
            .position(|state| state.position == position)?;
        Some(self.states.remove(index))
    }

    /// Place `state` so the expansion order stays total.
    pub fn insert(&mut self, state: PathState) {
        let index = self
            .states
            .partition_point(|queued| expansion_order(queued, &state) == Ordering::Greater);
        self.states.insert(index, state);
    }

    /// Queued states from next-to-expand to last.
    pub fn iter(&self) -> impl Iterator<Item = &PathState> {
        self.states.iter().rev()
    }

    pub fn into_expansion_order(self) -> Vec<PathState> {
        let mut states = self.states;
        states.reverse();
        states
    }
}

/// Single-query A* engine.
#[derive(Debug)]
pub struct AStarSearch<'a> {
    grid: &'a ElevationGrid,
    heuristics: HeuristicTable,
    frontier: Frontier,
    explored: ExploredSet,
    max_iterations: Option<usize>,
}

impl<'a> AStarSearch<'a> {
    /// Prepare a search from `start` towards the grid's goal.
    pub fn new(grid: &'a ElevationGrid, start: Position) -> Result<Self> {
        ensure_start(grid, start)?;
        let heuristics = HeuristicTable::build(grid)?;

        let mut initial = PathState::new(start);
        initial.priority = heuristics.a_star_value(&initial)?;
        let mut frontier = Frontier::new();
        frontier.insert(initial);

        Ok(Self {
            grid,
            heuristics,
            frontier,
            explored: ExploredSet::default(),
            max_iterations: None,
        })
    }

    /// Cap the number of popped states; `None` runs until a terminal state.
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Run the search to completion.
    pub fn run(mut self) -> Result<SearchResult> {
        let budget = self.grid.energy_budget();
        let mut iterations = 0usize;

        let outcome = loop {
            if self.max_iterations.is_some_and(|limit| iterations >= limit) {
                warn!(iterations, "A* search stopped at the iteration cap");
                break SearchOutcome::IterationLimit;
            }

            let Some(current) = self.frontier.pop() else {
                break SearchOutcome::Exhausted;
            };
            iterations += 1;

            self.explored.insert(current.position);
            if self.grid.is_goal(&current) {
                break SearchOutcome::Found(current);
            }

            trace!(state = %current, priority = current.priority, "expanding");
            self.expand(&current)?;

            // The budget guard looks at the state just expanded, so a search
            // notices an exhausted budget one expansion late.
            if self.frontier.is_empty() || current.cost > budget {
                break SearchOutcome::Exhausted;
            }
        };

        Ok(SearchResult {
            algorithm: SearchAlgorithm::AStar,
            outcome,
            frontier: self.frontier.into_expansion_order(),
            explored: self.explored.into_vec(),
            iterations,
            expansions: iterations,
        })
    }

    fn expand(&mut self, current: &PathState) -> Result<()> {
        let budget = self.grid.energy_budget();

        for mut candidate in self.grid.neighbors(current) {
            let step = self
                .grid
                .transition_cost(current.position, candidate.position)?;
            candidate.cost = current.cost.saturating_add(step);
            candidate.priority = self.heuristics.a_star_value(&candidate)?;

            if self.explored.contains(candidate.position) {
                continue;
            }
            if candidate.cost > budget {
                trace!(state = %candidate, budget, "over budget");
                continue;
            }

            let queued = self
                .frontier
                .get(candidate.position)
                .map(|queued| queued.priority);
            match queued {
                Some(priority) if priority <= candidate.priority => {
                    trace!(state = %candidate, queued_priority = priority, "duplicate rejected");
                }
                Some(_) => {
                    self.frontier.remove(candidate.position);
                    trace!(state = %candidate, "duplicate replaced");
                    self.frontier.insert(candidate);
                }
                None => self.frontier.insert(candidate),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    fn state(x: usize, y: usize, priority: u64, moves: &[Direction]) -> PathState {
        let mut state = PathState::at(x, y);
        state.priority = priority;
        state.moves = moves.to_vec();
        state
    }

    fn assert_sorted(frontier: &Frontier) {
        let states: Vec<&PathState> = frontier.iter().collect();
        for pair in states.windows(2) {
            assert_ne!(
                expansion_order(pair[0], pair[1]),
                Ordering::Greater,
                "{} before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn frontier_pops_lowest_priority_first() {
        let mut frontier = Frontier::new();
        frontier.insert(state(0, 0, 9, &[]));
        frontier.insert(state(1, 0, 3, &[Direction::E]));
        frontier.insert(state(2, 0, 5, &[Direction::E, Direction::E]));
        assert_sorted(&frontier);

        let order: Vec<u64> = std::iter::from_fn(|| frontier.pop())
            .map(|state| state.priority)
            .collect();
        assert_eq!(order, vec![3, 5, 9]);
    }

    #[test]
    fn equal_priority_prefers_longer_paths() {
        let mut frontier = Frontier::new();
        frontier.insert(state(1, 0, 4, &[Direction::E]));
        frontier.insert(state(1, 1, 4, &[Direction::E, Direction::N]));
        assert_eq!(frontier.peek().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn equal_priority_and_length_prefer_direction_from_latest_move() {
        let mut frontier = Frontier::new();
        frontier.insert(state(0, 0, 4, &[Direction::N, Direction::W]));
        frontier.insert(state(1, 0, 4, &[Direction::W, Direction::S]));
        frontier.insert(state(2, 0, 4, &[Direction::W, Direction::E]));
        frontier.insert(state(3, 0, 4, &[Direction::S, Direction::E]));
        assert_sorted(&frontier);

        let order: Vec<Position> = frontier.iter().map(|state| state.position).collect();
        assert_eq!(
            order,
            vec![
                Position::new(3, 0),
                Position::new(2, 0),
                Position::new(1, 0),
                Position::new(0, 0),
            ]
        );
    }

    #[test]
    fn remove_and_get_work_by_position() {
        let mut frontier = Frontier::new();
        frontier.insert(state(0, 1, 2, &[Direction::N]));
        frontier.insert(state(1, 0, 3, &[Direction::E]));
        assert_eq!(frontier.get(Position::new(1, 0)).unwrap().priority, 3);
        assert!(frontier.remove(Position::new(0, 1)).is_some());
        assert!(frontier.remove(Position::new(0, 1)).is_none());
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn flat_row_walks_east() {
        let grid = ElevationGrid::new(vec![vec![0, 0, 0, 0]], Position::new(3, 0), 10).unwrap();
        let result = AStarSearch::new(&grid, Position::new(0, 0))
            .unwrap()
            .run()
            .unwrap();
        let path = result.path().expect("path");
        assert_eq!(path.moves, vec![Direction::E; 3]);
        assert_eq!(path.cost, 3);
        assert_eq!(
            result.explored,
            (0..4).map(|x| Position::new(x, 0)).collect::<Vec<_>>()
        );
        assert!(result.frontier.is_empty());
    }

    #[test]
    fn cheaper_duplicate_replaces_queued_state() {
        // (1, 1) is first queued via the steep climb from (1, 0) and later
        // reached more cheaply from (0, 1).
        let grid =
            ElevationGrid::new(vec![vec![0, 0], vec![3, 4]], Position::new(1, 1), 100).unwrap();
        let result = AStarSearch::new(&grid, Position::new(0, 0))
            .unwrap()
            .run()
            .unwrap();
        let path = result.path().expect("path");
        assert_eq!(path.moves, vec![Direction::N, Direction::E]);
        assert_eq!(path.cost, 12);
        assert_eq!(
            result.explored,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn equal_priority_duplicate_keeps_queued_state() {
        let grid =
            ElevationGrid::new(vec![vec![0, 0], vec![0, 0]], Position::new(1, 1), 10).unwrap();
        let mut search = AStarSearch::new(&grid, Position::new(0, 0)).unwrap();

        let start = search.frontier.pop().unwrap();
        search.explored.insert(start.position);
        search.expand(&start).unwrap();

        // (0, 1) queues the goal as N, E with priority 2.
        let north = search.frontier.remove(Position::new(0, 1)).unwrap();
        search.explored.insert(north.position);
        search.expand(&north).unwrap();
        let queued = search.frontier.get(Position::new(1, 1)).unwrap();
        assert_eq!(queued.moves, vec![Direction::N, Direction::E]);
        assert_eq!(queued.priority, 2);

        // (1, 0) reaches the goal as E, N with the same priority.
        let east = search.frontier.remove(Position::new(1, 0)).unwrap();
        search.explored.insert(east.position);
        let before = search.frontier.len();
        search.expand(&east).unwrap();

        assert_eq!(search.frontier.len(), before);
        let kept = search.frontier.get(Position::new(1, 1)).unwrap();
        assert_eq!(kept.moves, vec![Direction::N, Direction::E]);
        assert_eq!(kept.priority, 2);
    }

    #[test]
    fn detours_around_steep_cell() {
        let grid = ElevationGrid::new(
            vec![vec![0, 9, 0], vec![0, 0, 0]],
            Position::new(2, 0),
            200,
        )
        .unwrap();
        let result = AStarSearch::new(&grid, Position::new(0, 0))
            .unwrap()
            .run()
            .unwrap();
        let path = result.path().expect("path");
        assert_eq!(path.cost, 4);
        assert_eq!(
            path.moves,
            vec![Direction::N, Direction::E, Direction::E, Direction::S]
        );
    }

    #[test]
    fn frontier_never_holds_duplicate_positions() {
        let grid = ElevationGrid::new(
            vec![vec![0, 1, 2, 1], vec![3, 0, 1, 0], vec![1, 2, 0, 4]],
            Position::new(3, 2),
            1_000,
        )
        .unwrap();
        let result = AStarSearch::new(&grid, Position::new(0, 0))
            .unwrap()
            .with_max_iterations(Some(4))
            .run()
            .unwrap();
        let mut seen = std::collections::HashSet::new();
        for state in &result.frontier {
            assert!(seen.insert(state.position), "duplicate {}", state.position);
        }
        for pair in result.frontier.windows(2) {
            assert_ne!(expansion_order(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn iteration_cap_stops_search() {
        let grid = ElevationGrid::new(vec![vec![0; 6]], Position::new(5, 0), 100).unwrap();
        let result = AStarSearch::new(&grid, Position::new(0, 0))
            .unwrap()
            .with_max_iterations(Some(2))
            .run()
            .unwrap();
        assert!(matches!(result.outcome, SearchOutcome::IterationLimit));
        assert_eq!(result.iterations, 2);
        assert_eq!(result.explored.len(), 2);
    }

    #[test]
    fn start_off_grid_is_rejected() {
        let grid = ElevationGrid::new(vec![vec![0]], Position::new(0, 0), 1).unwrap();
        assert!(AStarSearch::new(&grid, Position::new(0, 1)).is_err());
    }
}

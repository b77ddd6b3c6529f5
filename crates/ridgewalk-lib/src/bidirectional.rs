//! Bidirectional breadth-first search.
//!
//! One FIFO frontier grows from the start and another from the goal. After
//! each side expands, the two frontiers are checked for shared cells; the
//! cheapest joined path ends the search.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::error::Result;
use crate::grid::ElevationGrid;
use crate::search::{ensure_start, ExploredSet, SearchAlgorithm, SearchOutcome, SearchResult};
use crate::state::{PathState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// Single-query bidirectional BFS engine.
#[derive(Debug)]
pub struct BidirectionalSearch<'a> {
    grid: &'a ElevationGrid,
    front: VecDeque<PathState>,
    back: VecDeque<PathState>,
    explored: ExploredSet,
    max_iterations: Option<usize>,
}

impl<'a> BidirectionalSearch<'a> {
    /// Prepare a search between `start` and the grid's goal.
    pub fn new(grid: &'a ElevationGrid, start: Position) -> Result<Self> {
        ensure_start(grid, start)?;
        Ok(Self {
            grid,
            front: VecDeque::from([PathState::new(start)]),
            back: VecDeque::from([grid.goal_state()]),
            explored: ExploredSet::default(),
            max_iterations: None,
        })
    }

    /// Cap the number of rounds; `None` runs until a terminal state.
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Run the search to completion.
    pub fn run(mut self) -> Result<SearchResult> {
        let mut iterations = 0usize;
        let mut expansions = 0usize;

        let outcome = loop {
            if self.front.is_empty() && self.back.is_empty() {
                break SearchOutcome::Exhausted;
            }
            if self.max_iterations.is_some_and(|limit| iterations >= limit) {
                warn!(iterations, "bidirectional search stopped at the iteration cap");
                break SearchOutcome::IterationLimit;
            }
            iterations += 1;

            if let Some(current) = self.front.pop_front() {
                expansions += 1;
                self.expand(Side::Forward, current)?;
            }
            if let Some(found) = self.meeting_state() {
                break SearchOutcome::Found(found);
            }

            if let Some(current) = self.back.pop_front() {
                expansions += 1;
                self.expand(Side::Backward, current)?;
            }
            if let Some(found) = self.meeting_state() {
                break SearchOutcome::Found(found);
            }
        };

        let frontier = self.front.into_iter().chain(self.back).collect();
        Ok(SearchResult {
            algorithm: SearchAlgorithm::Bidirectional,
            outcome,
            frontier,
            explored: self.explored.into_vec(),
            iterations,
            expansions,
        })
    }

    fn expand(&mut self, side: Side, current: PathState) -> Result<()> {
        let budget = self.grid.energy_budget();
        self.explored.insert(current.position);
        trace!(?side, state = %current, "expanding");

        for mut candidate in self.grid.neighbors(&current) {
            // The backward frontier walks against the direction of travel, so
            // its edge is paid from the candidate towards the current cell.
            let step = match side {
                Side::Forward => self
                    .grid
                    .transition_cost(current.position, candidate.position)?,
                Side::Backward => self
                    .grid
                    .transition_cost(candidate.position, current.position)?,
            };
            candidate.cost = current.cost.saturating_add(step);

            let queue = match side {
                Side::Forward => &mut self.front,
                Side::Backward => &mut self.back,
            };
            if reject_duplicate(queue, &candidate) {
                continue;
            }
            if !self.explored.contains(candidate.position) && candidate.cost <= budget {
                queue.push_back(candidate);
            }
        }

        Ok(())
    }

    /// Cheapest complete path through a cell present in both frontiers.
    ///
    /// Ties go to the first meeting in front-then-back scan order. The joined
    /// cost is not checked against the budget.
    fn meeting_state(&self) -> Option<PathState> {
        self.front
            .iter()
            .flat_map(|forward| {
                self.back
                    .iter()
                    .filter(move |backward| forward.same_position(backward))
                    .map(move |backward| join(forward, backward))
            })
            .min_by_key(|joined| joined.cost)
    }
}

/// Drop queued states at the candidate's cell that cost more than it.
///
/// Returns `true` when a queued state is at least as cheap, in which case the
/// older entry is kept and the candidate must be discarded.
fn reject_duplicate(queue: &mut VecDeque<PathState>, candidate: &PathState) -> bool {
    let mut rejected = false;
    queue.retain(|queued| {
        if !queued.same_position(candidate) {
            return true;
        }
        if candidate.cost < queued.cost {
            false
        } else {
            rejected = true;
            true
        }
    });
    rejected
}

/// Join a forward state and a backward state meeting at the same cell.
fn join(forward: &PathState, backward: &PathState) -> PathState {
    let mut moves = Vec::with_capacity(forward.moves.len() + backward.moves.len());
    moves.extend_from_slice(&forward.moves);
    moves.extend(backward.moves.iter().rev().map(|direction| direction.inverse()));

    let mut joined = PathState::new(forward.position);
    joined.moves = moves;
    joined.cost = forward.cost.saturating_add(backward.cost);
    joined
}

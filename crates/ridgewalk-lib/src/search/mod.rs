//! Search orchestration for Ridgewalk.
//!
//! This module provides:
//! - [`SearchAlgorithm`] - Supported search strategies (A*, bidirectional BFS)
//! - [`SearchRequest`] - Start position, algorithm and iteration cap
//! - [`SearchOutcome`] / [`SearchResult`] - Terminal state plus diagnostics
//! - [`run_search`] - Main entry point for running a query against a grid
//!
//! # Strategy Pattern
//!
//! Each engine is wrapped by a [`Searcher`] implementation so callers pick an
//! algorithm by value instead of branching on engine types.
//!
//! # Example
//!
//! ```ignore
//! use ridgewalk_lib::{load_map, run_search, GoalSpec, Position, SearchRequest};
//!
//! let grid = load_map("maps/valley.txt")?.into_grid(GoalSpec::far_corner(), 100)?;
//! let request = SearchRequest::a_star(Position::new(0, 0));
//! let result = run_search(&grid, &request)?;
//! println!("moves: {:?}", result.path().map(|state| state.moves_label()));
//! ```

mod strategy;

pub use strategy::{select_searcher, AStarSearcher, BidirectionalSearcher, Searcher};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::ElevationGrid;
use crate::state::{PathState, Position};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    /// Best-first search ordered by cost plus heuristic.
    #[default]
    AStar,
    /// Breadth-first search from both ends, stopping when the frontiers meet.
    Bidirectional,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::AStar => "a-star",
            SearchAlgorithm::Bidirectional => "bidirectional",
        };
        f.write_str(value)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a-star" | "astar" | "a*" => Ok(SearchAlgorithm::AStar),
            "bidirectional" | "bbfs" | "bidirectional-bfs" => Ok(SearchAlgorithm::Bidirectional),
            _ => Err(Error::UnknownAlgorithm {
                name: value.to_string(),
            }),
        }
    }
}

/// High-level search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub algorithm: SearchAlgorithm,
    pub start: Position,
    /// Stop after this many iterations even if the search has not terminated.
    pub max_iterations: Option<usize>,
}

impl SearchRequest {
    /// Convenience constructor for an uncapped A* search.
    pub fn a_star(start: Position) -> Self {
        Self {
            algorithm: SearchAlgorithm::AStar,
            start,
            max_iterations: None,
        }
    }

    /// Convenience constructor for an uncapped bidirectional search.
    pub fn bidirectional(start: Position) -> Self {
        Self {
            algorithm: SearchAlgorithm::Bidirectional,
            start,
            max_iterations: None,
        }
    }

    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }
}

/// Terminal state of a search run.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A path reached the goal; the state carries its moves and cost.
    Found(PathState),
    /// Every reachable state within the budget was examined without success.
    Exhausted,
    /// The iteration cap stopped the search first.
    IterationLimit,
}

/// Serializable classification of a [`SearchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    Exhausted,
    IterationLimit,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&PathState> {
        match self {
            SearchOutcome::Found(state) => Some(state),
            SearchOutcome::Exhausted | SearchOutcome::IterationLimit => None,
        }
    }

    pub fn status(&self) -> SearchStatus {
        match self {
            SearchOutcome::Found(_) => SearchStatus::Found,
            SearchOutcome::Exhausted => SearchStatus::Exhausted,
            SearchOutcome::IterationLimit => SearchStatus::IterationLimit,
        }
    }
}

/// Result of a completed search, including the final frontier and the
/// explored cells for introspection.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub algorithm: SearchAlgorithm,
    pub outcome: SearchOutcome,
    /// Frontier contents when the search stopped, in expansion order.
    pub frontier: Vec<PathState>,
    /// Expanded cells in the order they were expanded.
    pub explored: Vec<Position>,
    /// Loop iterations; a bidirectional round expands up to one state per side.
    pub iterations: usize,
    /// States popped from a frontier.
    pub expansions: usize,
}

impl SearchResult {
    /// Terminal path state, or `None` when no path was found.
    pub fn path(&self) -> Option<&PathState> {
        self.outcome.path()
    }

    pub fn is_found(&self) -> bool {
        self.path().is_some()
    }

    /// Split into `(path_or_none, final_frontier, explored_list)`.
    pub fn into_parts(self) -> (Option<PathState>, Vec<PathState>, Vec<Position>) {
        let path = match self.outcome {
            SearchOutcome::Found(state) => Some(state),
            SearchOutcome::Exhausted | SearchOutcome::IterationLimit => None,
        };
        (path, self.frontier, self.explored)
    }
}

/// Run the requested search against `grid`.
pub fn run_search(grid: &ElevationGrid, request: &SearchRequest) -> Result<SearchResult> {
    let searcher = select_searcher(request.algorithm);
    tracing::debug!(
        algorithm = %searcher.algorithm(),
        start = %request.start,
        goal = %grid.goal(),
        energy_budget = grid.energy_budget(),
        "starting search"
    );

    let result = searcher.search(grid, request)?;

    tracing::debug!(
        algorithm = %result.algorithm,
        status = ?result.outcome.status(),
        iterations = result.iterations,
        expansions = result.expansions,
        explored = result.explored.len(),
        frontier = result.frontier.len(),
        "search finished"
    );
    Ok(result)
}

/// Expanded cells, in expansion order, with constant-time membership checks.
#[derive(Debug, Default, Clone)]
pub(crate) struct ExploredSet {
    order: Vec<Position>,
    seen: HashSet<Position>,
}

impl ExploredSet {
    /// Record `position`; returns `false` if it was already present.
    pub(crate) fn insert(&mut self, position: Position) -> bool {
        if self.seen.insert(position) {
            self.order.push(position);
            true
        } else {
            false
        }
    }

    pub(crate) fn contains(&self, position: Position) -> bool {
        self.seen.contains(&position)
    }

    pub(crate) fn into_vec(self) -> Vec<Position> {
        self.order
    }
}

/// Fail fast when a search would start off the grid.
pub(crate) fn ensure_start(grid: &ElevationGrid, start: Position) -> Result<()> {
    if grid.contains(start) {
        Ok(())
    } else {
        Err(Error::StartOutOfBounds {
            x: start.x,
            y: start.y,
        })
    }
}

//! Search strategies implementing the Strategy pattern.
//!
//! Each engine is exposed through the `Searcher` trait so `run_search` can
//! dispatch on a [`SearchAlgorithm`] without knowing engine internals.

use crate::astar::AStarSearch;
use crate::bidirectional::BidirectionalSearch;
use crate::error::Result;
use crate::grid::ElevationGrid;

use super::{SearchAlgorithm, SearchRequest, SearchResult};

/// Trait for search strategies.
pub trait Searcher: Send + Sync {
    /// The algorithm identifier for this searcher.
    fn algorithm(&self) -> SearchAlgorithm;

    /// Run the search to completion on `grid`.
    fn search(&self, grid: &ElevationGrid, request: &SearchRequest) -> Result<SearchResult>;
}

/// A* searcher with the elevation-aware heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarSearcher;

impl Searcher for AStarSearcher {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::AStar
    }

    fn search(&self, grid: &ElevationGrid, request: &SearchRequest) -> Result<SearchResult> {
        AStarSearch::new(grid, request.start)?
            .with_max_iterations(request.max_iterations)
            .run()
    }
}

/// Bidirectional breadth-first searcher.
#[derive(Debug, Clone, Default)]
pub struct BidirectionalSearcher;

impl Searcher for BidirectionalSearcher {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Bidirectional
    }

    fn search(&self, grid: &ElevationGrid, request: &SearchRequest) -> Result<SearchResult> {
        BidirectionalSearch::new(grid, request.start)?
            .with_max_iterations(request.max_iterations)
            .run()
    }
}

/// Select the searcher for a given algorithm.
pub fn select_searcher(algorithm: SearchAlgorithm) -> Box<dyn Searcher> {
    match algorithm {
        SearchAlgorithm::AStar => Box::new(AStarSearcher),
        SearchAlgorithm::Bidirectional => Box::new(BidirectionalSearcher),
    }
}

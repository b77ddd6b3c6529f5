//! Ridgewalk library entry points.
//!
//! This crate loads elevation maps, models the cost of moving across them,
//! and runs the two route searches (A* and bidirectional breadth-first
//! search) under an energy budget. Higher-level consumers (the CLI) should
//! only depend on the items exported here instead of reimplementing behavior.

pub mod astar;
pub mod bidirectional;
pub mod cost;
pub mod error;
pub mod grid;
pub mod map;
pub mod output;
pub mod search;
pub mod state;

pub use astar::{AStarSearch, Frontier};
pub use bidirectional::BidirectionalSearch;
pub use cost::{heuristic, transition_cost, HeuristicTable};
pub use error::{Error, Result};
pub use grid::ElevationGrid;
pub use map::{load_map, parse_map, read_map, ElevationMap, GoalSpec};
pub use output::{PathReport, RenderMode, SearchReport};
pub use search::{
    run_search, select_searcher, SearchAlgorithm, SearchOutcome, SearchRequest, SearchResult,
    SearchStatus, Searcher,
};
pub use state::{Direction, PathState, Position};

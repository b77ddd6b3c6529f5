//! Serializable search reports and their plain-text rendering.

use std::fmt::Write;

use serde::Serialize;

use crate::grid::ElevationGrid;
use crate::search::{SearchAlgorithm, SearchRequest, SearchResult, SearchStatus};
use crate::state::{format_moves, Direction, PathState, Position};

/// Presentation style for turning a [`SearchReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Solution, cost, iteration count, final frontier and explored cells.
    #[default]
    Full,
    /// Only details that do not depend on the heuristic: the solution moves.
    Minimal,
}

/// Path found by a search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathReport {
    pub moves: Vec<Direction>,
    pub cost: u64,
    pub end: Position,
}

impl From<&PathState> for PathReport {
    fn from(state: &PathState) -> Self {
        Self {
            moves: state.moves.clone(),
            cost: state.cost,
            end: state.position,
        }
    }
}

/// Structured representation of a search run that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub algorithm: SearchAlgorithm,
    pub status: SearchStatus,
    pub start: Position,
    pub goal: Position,
    pub energy_budget: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathReport>,
    pub iterations: usize,
    pub explored: Vec<Position>,
    pub frontier: Vec<PathState>,
}

impl SearchReport {
    pub fn from_result(grid: &ElevationGrid, request: &SearchRequest, result: &SearchResult) -> Self {
        Self {
            algorithm: result.algorithm,
            status: result.outcome.status(),
            start: request.start,
            goal: grid.goal(),
            energy_budget: grid.energy_budget(),
            path: result.path().map(PathReport::from),
            iterations: result.iterations,
            explored: result.explored.clone(),
            frontier: result.frontier.clone(),
        }
    }

    /// Copy without the heuristic-dependent diagnostics.
    pub fn minimal(&self) -> Self {
        Self {
            explored: Vec::new(),
            frontier: Vec::new(),
            ..self.clone()
        }
    }

    /// Render the report as plain text.
    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        let solution = self
            .path
            .as_ref()
            .map(|path| format_moves(&path.moves))
            .unwrap_or_else(|| "None".to_string());

        if mode == RenderMode::Minimal {
            let _ = writeln!(buffer, "Solution: {}", solution);
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Search from {} to {} (algorithm: {}; energy budget: {}):",
            self.start, self.goal, self.algorithm, self.energy_budget
        );
        let _ = writeln!(buffer, "Solution: {}", solution);
        match &self.path {
            Some(path) => {
                let _ = writeln!(buffer, "Cost: {}", path.cost);
            }
            None => {
                let _ = writeln!(buffer, "Status: {}", status_label(self.status));
            }
        }
        let _ = writeln!(buffer, "Iterations: {}", self.iterations);

        let _ = writeln!(buffer, "Frontier ({}):", self.frontier.len());
        for state in &self.frontier {
            let _ = writeln!(buffer, " - {}", state);
        }
        let _ = writeln!(buffer, "Explored ({}):", self.explored.len());
        for position in &self.explored {
            let _ = writeln!(buffer, " - {}", position);
        }
        buffer
    }
}

fn status_label(status: SearchStatus) -> &'static str {
    match status {
        SearchStatus::Found => "found",
        SearchStatus::Exhausted => "no path within energy budget",
        SearchStatus::IterationLimit => "stopped at iteration limit",
    }
}

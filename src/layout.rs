//! Layout engines and their shared result types.
//!
//! A layout consumes a [`Graph`](crate::graph::Graph) plus a target surface
//! size and produces one position per node. Positions live here, outside the
//! graph, so the graph, the engine, and the render adapter are connected only
//! by pure data.

pub mod spring;

use std::collections::HashMap;

use thiserror::Error;

use crate::geometry::Point;

/// Final node positions keyed by node id.
pub type Positions = HashMap<String, Point>;

/// Errors raised by layout engines.
///
/// Failing to converge within the iteration budget is deliberately *not* an
/// error; the engine returns the best positions it found.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The engine configuration or surface dimensions were rejected.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

/// Lifecycle of a layout engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No simulation has been run yet.
    Uninitialized,
    /// The iteration loop is in progress.
    Simulating,
    /// Positions are frozen; the engine will not mutate them again.
    Converged,
}

/// The result of a layout run: frozen positions plus how the run ended.
#[derive(Debug)]
pub struct Layout {
    positions: Positions,
    iterations_run: usize,
    converged: bool,
}

impl Layout {
    pub(crate) fn new(positions: Positions, iterations_run: usize, converged: bool) -> Self {
        Self {
            positions,
            iterations_run,
            converged,
        }
    }

    /// Returns the position mapping, one entry per graph node
    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Returns the position of a single node by id
    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Returns how many simulation iterations actually ran
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Returns true if the run stopped because total displacement fell below
    /// the convergence threshold, false if the iteration budget ran out first
    pub fn converged(&self) -> bool {
        self.converged
    }
}

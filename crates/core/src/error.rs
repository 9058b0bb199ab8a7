use thiserror::Error;

use crate::mapgen::ConnectivityGoal;
use crate::render::RenderError;
use crate::types::{CellState, Pos};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapGenError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({}, {}) is outside the {width}x{height} grid", pos.x, pos.y)]
    OutOfBounds { pos: Pos, width: usize, height: usize },

    #[error("no floor cell satisfies any {goal:?} connectivity threshold")]
    NotFound { goal: ConnectivityGoal },

    #[error("walker population dropped to zero")]
    PopulationExhausted,

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("cell ({}, {}) is {found:?}; special rooms may only replace floor", pos.x, pos.y)]
    NotFloor { pos: Pos, found: CellState },

    #[error("floor carving did not reach its fill target within {limit} iterations")]
    IterationLimit { limit: u64 },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl MapGenError {
    /// Errors after which the partially built grid must not be used.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension { .. } | Self::PopulationExhausted | Self::InvalidConfig(_)
        )
    }
}

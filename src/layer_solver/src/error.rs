use itertools::Itertools;
use thiserror::Error;

use crate::{Color, Face, solver::Stage};

/// A scanned state that cannot be a real cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Facelet {face}{position} has not been scanned")]
    UnknownFacelet { face: Face, position: usize },
    #[error("Expected 8 {color} facelets, found {count}")]
    ColorCount { color: Color, count: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("The cube failed its integrity check: {0}")]
    Integrity(#[from] IntegrityError),
    #[error("No piece carries the colors {}", .colors.iter().join(" "))]
    PieceNotFound { colors: Vec<Color> },
    #[error("Stage `{stage}` did not finish within {cap} iterations")]
    IterationCapExceeded { stage: Stage, cap: usize },
    #[error("The move trace is full ({capacity} moves)")]
    TraceCapacityExceeded { capacity: usize },
    #[error("Every stage finished but the cube is still unsolved")]
    LeftUnsolved,
}

impl SolveError {
    /// Whether this error is a broken solver invariant rather than bad input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !matches!(self, SolveError::Integrity(_))
    }
}

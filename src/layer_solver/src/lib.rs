//! Facelet model of a Rubik's Cube driven by a fork-and-turntable robot, and
//! a deterministic layer-by-layer solver for it.
//!
//! The robot can only turn the front face, turn the bottom face, and rotate
//! the whole cube about its vertical axis, so every move in this crate belongs
//! to one of those three groups. The solver records the moves it makes into a
//! bounded [`MoveTrace`] and compacts the trace between stages.
//!
//! ```
//! use layer_solver::{CubeState, Move, SolveOutcome, solve};
//!
//! let mut cube = CubeState::solved();
//! cube.apply_moves(&[Move::F, Move::D, Move::Y]).unwrap();
//! assert!(!cube.is_solved());
//!
//! let solution = solve(&mut cube).unwrap();
//! assert_eq!(solution.outcome, SolveOutcome::Solved);
//! assert!(cube.is_solved());
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod cube;
pub mod error;
pub mod locate;
pub mod moves;
pub mod solver;
pub mod trace;

pub use config::SolverConfig;
pub use cube::{Color, CubeState, Face, Facelet, FaceletParseError, Recording};
pub use error::{IntegrityError, SolveError};
pub use moves::{Move, MoveGroup, MoveParseError, parse_moves};
pub use solver::{Solution, SolveOutcome, Solver, Stage};
pub use trace::MoveTrace;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// Solve `cube` in place with the default [`SolverConfig`].
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(cube: &mut CubeState) -> Result<Solution, SolveError> {
    Solver::default().solve(cube)
}

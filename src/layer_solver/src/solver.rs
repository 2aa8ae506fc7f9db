use std::fmt;

use log::{debug, info, trace, warn};

use crate::{CubeState, Move, SolveError, SolverConfig, start, success, trace::MoveTrace, working};

mod first_layer;
mod last_layer;
mod second_layer;

/// The seven stages of the layer-by-layer method, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    FirstLayerEdges,
    FirstLayerCorners,
    SecondLayerEdges,
    OrientLastLayerEdges,
    PermuteLastLayerCorners,
    OrientLastLayerCorners,
    PermuteLastLayerEdges,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Self::FirstLayerEdges,
        Self::FirstLayerCorners,
        Self::SecondLayerEdges,
        Self::OrientLastLayerEdges,
        Self::PermuteLastLayerCorners,
        Self::OrientLastLayerCorners,
        Self::PermuteLastLayerEdges,
    ];

    fn run(
        self,
        cube: &mut CubeState,
        budget: &mut IterationBudget,
    ) -> Result<Progress, SolveError> {
        match self {
            Stage::FirstLayerEdges => first_layer::edges(cube, budget),
            Stage::FirstLayerCorners => first_layer::corners(cube, budget),
            Stage::SecondLayerEdges => second_layer::edges(cube, budget),
            Stage::OrientLastLayerEdges => last_layer::orient_edges(cube, budget),
            Stage::PermuteLastLayerCorners => last_layer::permute_corners(cube, budget),
            Stage::OrientLastLayerCorners => last_layer::orient_corners(cube, budget),
            Stage::PermuteLastLayerEdges => last_layer::permute_edges(cube, budget),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::FirstLayerEdges => "first layer edges",
            Stage::FirstLayerCorners => "first layer corners",
            Stage::SecondLayerEdges => "second layer edges",
            Stage::OrientLastLayerEdges => "orient last layer edges",
            Stage::PermuteLastLayerCorners => "permute last layer corners",
            Stage::OrientLastLayerCorners => "orient last layer corners",
            Stage::PermuteLastLayerEdges => "permute last layer edges",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved,
    /// The last layer reached a state no legal scramble produces, such as a
    /// single flipped edge or two swapped edges. The cube was physically
    /// reassembled wrong.
    UnsolvableScramble,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The compacted moves, in the order they were applied.
    pub trace: MoveTrace,
    pub outcome: SolveOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Finished,
    Unsolvable,
}

/// Counts loop iterations within one stage.
#[derive(Debug)]
struct IterationBudget {
    stage: Stage,
    cap: usize,
    used: usize,
}

impl IterationBudget {
    fn new(stage: Stage, cap: usize) -> Self {
        IterationBudget { stage, cap, used: 0 }
    }

    fn tick(&mut self) -> Result<(), SolveError> {
        self.used += 1;
        if self.used > self.cap {
            return Err(SolveError::IterationCapExceeded {
                stage: self.stage,
                cap: self.cap,
            });
        }
        Ok(())
    }
}

/// A classified situation with a fixed algorithm that resolves it.
trait Case: fmt::Debug + Copy {
    fn algorithm(self) -> &'static [Move];
}

/// What a stage should do next with the state it was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<C> {
    Done,
    Apply(C),
    Rotate,
    Unsolvable,
}

/// Classify and act until the classifier reports that the stage is done or
/// that the cube cannot be solved.
fn drive<C: Case>(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
    classify: impl Fn(&CubeState) -> Step<C>,
) -> Result<Progress, SolveError> {
    loop {
        budget.tick()?;
        match classify(cube) {
            Step::Done => return Ok(Progress::Finished),
            Step::Unsolvable => return Ok(Progress::Unsolvable),
            Step::Rotate => cube.apply_move(Move::Y)?,
            Step::Apply(case) => apply_case(cube, budget.stage, case)?,
        }
    }
}

fn apply_case<C: Case>(cube: &mut CubeState, stage: Stage, case: C) -> Result<(), SolveError> {
    trace!("{stage}: {case:?}");
    cube.apply_moves(case.algorithm())
}

fn ensure_solved(cube: &CubeState) -> Result<(), SolveError> {
    if cube.is_solved() {
        Ok(())
    } else {
        Err(SolveError::LeftUnsolved)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Solver { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `cube` in place and return the moves that did it. The same
    /// state always yields the same moves.
    ///
    /// # Errors
    ///
    /// If `cube` fails its integrity check, or if the solver breaks one of
    /// its own limits or invariants (see [`SolveError::is_internal`]). An
    /// unsolvable but well formed scramble is not an error; it is reported
    /// through [`Solution::outcome`].
    pub fn solve(&self, cube: &mut CubeState) -> Result<Solution, SolveError> {
        cube.check_integrity()?;

        info!(start!("Solving cube"));

        let mut trace = MoveTrace::with_capacity(self.config.trace_capacity);
        let mut outcome = SolveOutcome::Solved;

        for stage in Stage::ALL {
            let mut budget = IterationBudget::new(stage, self.config.stage_iteration_cap);
            let mut recording = cube.record_bounded(self.config.trace_capacity);
            let progress = stage.run(&mut recording, &mut budget)?;

            let recorded = recording.trace().len();
            if self.config.compact_between_stages {
                recording.compact_trace();
            }
            let stage_trace = recording.finish();
            debug!(
                working!("Stage {} took {} moves, {} after compaction"),
                stage,
                recorded,
                stage_trace.len()
            );
            trace.append(&stage_trace)?;

            if progress == Progress::Unsolvable {
                warn!("Unsolvable scramble detected during stage {stage}");
                outcome = SolveOutcome::UnsolvableScramble;
                break;
            }
        }

        if outcome == SolveOutcome::Solved {
            ensure_solved(cube)?;
        }

        let before = trace.len();
        trace.compact();
        debug!(
            working!("Final trace has {} moves, {} after compaction"),
            before,
            trace.len()
        );

        match outcome {
            SolveOutcome::Solved => info!(success!("Solved cube in {} moves"), trace.len()),
            SolveOutcome::UnsolvableScramble => {
                info!(success!("Stopped on an unsolvable scramble after {} moves"), trace.len());
            }
        }

        Ok(Solution { trace, outcome })
    }
}

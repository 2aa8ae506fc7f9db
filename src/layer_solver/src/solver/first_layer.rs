//! Up layer: first the four edges, then the four corners. Each piece is
//! fetched to the front of the up layer and the cube is then rotated so the
//! next piece's home is at the front.

use super::{Case, IterationBudget, Progress, apply_case};
use crate::{
    CubeState, Move,
    Move::{D, D2, DPrime, F, F2, FPrime, Y, Y2, YPrime},
    SolveError,
    locate::{CornerSlot, EdgeSlot, locate_corner, locate_edge},
};

/// Indexed by edge slot, then by which of the slot's stickers shows the up
/// color.
const EDGE_ALGORITHMS: [[&[Move]; 2]; 12] = [
    [&[], &[F, YPrime, FPrime, DPrime, F, Y, F2]],
    [&[Y, F2, D, YPrime, F2], &[Y, F, YPrime, F]],
    [&[Y2, F2, Y2, D2, F2], &[Y2, FPrime, Y, F, DPrime, FPrime, Y, F2]],
    [&[YPrime, F2, DPrime, Y, F2], &[YPrime, FPrime, Y, FPrime]],
    [&[Y, F, D, FPrime, YPrime, F2], &[F]],
    [&[YPrime, FPrime, DPrime, F, Y, F2], &[FPrime]],
    [&[Y, F2, YPrime, F, Y, F2, YPrime], &[Y, FPrime, D, F, YPrime, F2]],
    [&[YPrime, F2, Y, FPrime, YPrime, F2, Y], &[YPrime, F, DPrime, FPrime, Y, F2]],
    [&[FPrime, YPrime, FPrime, DPrime, F, Y, F2], &[F2]],
    [&[Y, FPrime, YPrime, F, Y, F, YPrime], &[D, F2]],
    [&[YPrime, F, Y, FPrime, YPrime, FPrime, Y], &[DPrime, F2]],
    [&[DPrime, YPrime, F, Y, FPrime, YPrime, FPrime, Y], &[D2, F2]],
];

/// Indexed by corner slot, then by which of the slot's stickers shows the up
/// color.
const CORNER_ALGORITHMS: [[&[Move]; 3]; 8] = [
    [
        &[Y, F, DPrime, FPrime, Y2, FPrime, D, F, Y],
        &[Y, F, Y2, FPrime, D, F, Y2, FPrime, YPrime],
        &[FPrime, DPrime, F, D2, YPrime, FPrime, DPrime, F, Y],
    ],
    [
        &[],
        &[YPrime, FPrime, D2, F, Y, F, D2, FPrime],
        &[F, D2, FPrime, YPrime, FPrime, D2, F, Y],
    ],
    [
        &[D, YPrime, FPrime, DPrime, F, Y],
        &[YPrime, FPrime, D, F, Y],
        &[D, F, DPrime, FPrime, YPrime, FPrime, D2, F, Y],
    ],
    [
        &[YPrime, DPrime, FPrime, D, F, Y],
        &[D, F, DPrime, FPrime],
        &[F, DPrime, FPrime, YPrime, FPrime, D2, F, Y],
    ],
    [
        &[Y, FPrime, Y2, FPrime, D2, F, Y2, F, YPrime],
        &[Y, FPrime, D2, F, Y2, FPrime, DPrime, F, Y],
        &[Y2, F, D, FPrime, Y, FPrime, D, F, Y],
    ],
    [
        &[Y2, FPrime, D2, F, Y, FPrime, D, F, Y],
        &[YPrime, F, D2, F2, D, F, Y],
        &[F, Y2, FPrime, DPrime, F, Y2, FPrime],
    ],
    [
        &[D2, YPrime, FPrime, DPrime, F, Y],
        &[YPrime, FPrime, D2, F, Y],
        &[D2, F, DPrime, FPrime, YPrime, FPrime, D2, F, Y],
    ],
    [
        &[YPrime, D, FPrime, D2, F, Y],
        &[YPrime, DPrime, FPrime, DPrime, F, Y],
        &[DPrime, F, DPrime, FPrime, YPrime, FPrime, D2, F, Y],
    ],
];

/// Where the up-front edge currently is, and which of its stickers shows the
/// up color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EdgeCase {
    slot: EdgeSlot,
    up_sticker: usize,
}

impl EdgeCase {
    /// `None` if the edge is already home and oriented.
    fn classify(cube: &CubeState) -> Result<Option<Self>, SolveError> {
        let up = cube.up_color();
        let edge = locate_edge(cube, up, cube.front_color())?;
        let up_sticker = usize::from(edge.stickers()[0].1 != up);

        Ok((edge.slot() != EdgeSlot::UpFront || up_sticker != 0).then_some(EdgeCase {
            slot: edge.slot(),
            up_sticker,
        }))
    }
}

impl Case for EdgeCase {
    fn algorithm(self) -> &'static [Move] {
        EDGE_ALGORITHMS[self.slot.index()][self.up_sticker]
    }
}

/// Where the up-front-right corner currently is, and which of its stickers
/// shows the up color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CornerCase {
    slot: CornerSlot,
    up_sticker: usize,
}

impl CornerCase {
    fn classify(cube: &CubeState) -> Result<Option<Self>, SolveError> {
        let up = cube.up_color();
        let corner = locate_corner(cube, up, cube.front_color(), cube.right_color())?;
        let up_sticker = corner.sticker_with(up).unwrap_or(2);

        Ok(
            (corner.slot() != CornerSlot::UpRightFront || up_sticker != 0).then_some(CornerCase {
                slot: corner.slot(),
                up_sticker,
            }),
        )
    }
}

impl Case for CornerCase {
    fn algorithm(self) -> &'static [Move] {
        CORNER_ALGORITHMS[self.slot.index()][self.up_sticker]
    }
}

pub(super) fn edges(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    for _ in 0..4 {
        budget.tick()?;
        if let Some(case) = EdgeCase::classify(cube)? {
            apply_case(cube, budget.stage, case)?;
        }
        cube.apply_move(Y)?;
    }
    Ok(Progress::Finished)
}

pub(super) fn corners(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    for _ in 0..4 {
        budget.tick()?;
        if let Some(case) = CornerCase::classify(cube)? {
            apply_case(cube, budget.stage, case)?;
        }
        cube.apply_move(Y)?;
    }
    Ok(Progress::Finished)
}

//! The down layer, which holds the last layer once the cube is scanned with
//! yellow on top. Edges are oriented first, then corners are placed and
//! twisted, and finally the edges are cycled into place.

use super::{Case, IterationBudget, Progress, Step, apply_case, drive};
use crate::{
    CubeState, Face,
    Face::{Back, Down, Front, Left, Right},
    Facelet, Move,
    Move::{D, D2, DPrime, F, F2, FPrime, Y, Y2, YPrime},
    SolveError,
    locate::{CornerLocator, locate_corner},
    moves::concat_moves,
};

const FLIP_ANGLE: [Move; 8] = [F, D, Y, F, DPrime, FPrime, YPrime, FPrime];
const FLIP_LINE: [Move; 8] = [F, Y, F, D, FPrime, YPrime, DPrime, FPrime];

/// Swaps the two back corners of the down layer.
const CORNER_SWAP: [Move; 13] = [Y, F, DPrime, Y2, FPrime, D, Y2, FPrime, DPrime, Y2, F, Y, D2];
const SWAP_LEFT: [Move; 15] = concat_moves(&[&[Y], &CORNER_SWAP, &[YPrime]]);
const SWAP_DIAGONAL: [Move; 28] = concat_moves(&[&[YPrime], &CORNER_SWAP, &[Y], &CORNER_SWAP]);

const TWIST: [Move; 10] = [YPrime, FPrime, DPrime, F, DPrime, FPrime, D2, F, D2, Y];
const TWIST_INVERSE: [Move; 10] = [YPrime, F, D, FPrime, D, F, D2, FPrime, D2, Y];

const EDGE_CYCLE_CLOCKWISE: [Move; 17] = [
    YPrime, F2, YPrime, D, F, Y2, FPrime, YPrime, F2, YPrime, FPrime, Y2, F, D, YPrime, F2, Y,
];
const EDGE_CYCLE_COUNTER_CLOCKWISE: [Move; 17] = [
    YPrime, F2, YPrime, DPrime, F, Y2, FPrime, YPrime, F2, YPrime, FPrime, Y2, F, DPrime, YPrime,
    F2, Y,
];

/// Which down-layer edges show white on the down face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeOrientation {
    /// None of them.
    Dot,
    /// The right and back edges.
    Angle,
    /// The right and left edges.
    Line,
}

impl Case for EdgeOrientation {
    fn algorithm(self) -> &'static [Move] {
        match self {
            EdgeOrientation::Dot | EdgeOrientation::Angle => &FLIP_ANGLE,
            EdgeOrientation::Line => &FLIP_LINE,
        }
    }
}

fn classify_edge_orientation(cube: &CubeState) -> Step<EdgeOrientation> {
    let down = cube.down_color();
    let oriented = [1, 3, 5, 7].map(|position| cube[Facelet(Down, position)] == down);
    let [_, right, back, left] = oriented;

    match oriented.into_iter().filter(|&oriented| oriented).count() {
        4 => Step::Done,
        0 => Step::Apply(EdgeOrientation::Dot),
        1 | 3 => Step::Unsolvable,
        _ if right && back => Step::Apply(EdgeOrientation::Angle),
        _ if right && left => Step::Apply(EdgeOrientation::Line),
        _ => Step::Rotate,
    }
}

pub(super) fn orient_edges(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    drive(cube, budget, classify_edge_orientation)
}

/// Where the front-right down corner sits relative to its home slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CornerPermutation {
    AdjacentLeft,
    AdjacentBack,
    Diagonal,
}

impl Case for CornerPermutation {
    fn algorithm(self) -> &'static [Move] {
        match self {
            CornerPermutation::AdjacentLeft => &SWAP_LEFT,
            CornerPermutation::AdjacentBack => &CORNER_SWAP,
            CornerPermutation::Diagonal => &SWAP_DIAGONAL,
        }
    }
}

fn sits_between(corner: &CornerLocator, a: Face, b: Face) -> bool {
    corner.on_face(a) && corner.on_face(b)
}

fn corners_placed(cube: &CubeState) -> Result<bool, SolveError> {
    let down = cube.down_color();
    for (a, b) in [(Front, Left), (Front, Right), (Back, Left), (Back, Right)] {
        let corner = locate_corner(cube, cube.expected_color(a), cube.expected_color(b), down)?;
        if !sits_between(&corner, a, b) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn classify_corner_permutation(cube: &CubeState) -> Result<Option<CornerPermutation>, SolveError> {
    let (front, down) = (cube.front_color(), cube.down_color());
    let front_right = locate_corner(cube, front, cube.right_color(), down)?;
    let front_left = locate_corner(cube, front, cube.left_color(), down)?;

    Ok(if sits_between(&front_right, Front, Left) {
        Some(CornerPermutation::AdjacentLeft)
    } else if sits_between(&front_right, Back, Right) {
        Some(CornerPermutation::AdjacentBack)
    } else if sits_between(&front_right, Back, Left) && !sits_between(&front_left, Front, Right) {
        Some(CornerPermutation::Diagonal)
    } else {
        None
    })
}

/// Swap corners until all four sit between their own side faces, turning the
/// cube back a quarter after every attempt.
pub(super) fn permute_corners(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    while !corners_placed(cube)? {
        budget.tick()?;
        if let Some(case) = classify_corner_permutation(cube)? {
            apply_case(cube, budget.stage, case)?;
        }
        cube.apply_move(YPrime)?;
    }
    Ok(Progress::Finished)
}

/// Patterns of twisted down-layer corners, told apart by where their white
/// stickers face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CornerOrientation {
    H,
    Pi,
    Bowtie,
    T,
    Headlights,
    Sune,
    AntiSune,
}

/// The down corners with their stickers listed in the same rotational sense,
/// down sticker first. A quarter turn of the down layer carries each entry to
/// the next.
const DOWN_CORNERS: [[Facelet; 3]; 4] = [
    [Facelet(Down, 0), Facelet(Front, 6), Facelet(Left, 4)],
    [Facelet(Down, 2), Facelet(Right, 6), Facelet(Front, 4)],
    [Facelet(Down, 4), Facelet(Back, 6), Facelet(Right, 4)],
    [Facelet(Down, 6), Facelet(Left, 6), Facelet(Back, 4)],
];

/// Total twist of the down corners, in thirds of a turn. It is zero on every
/// reachable cube whose up corners are solved.
fn net_twist(cube: &CubeState) -> usize {
    let down = cube.down_color();
    DOWN_CORNERS
        .iter()
        .filter_map(|corner| corner.iter().position(|&facelet| cube[facelet] == down))
        .sum::<usize>()
        % 3
}

impl Case for CornerOrientation {
    fn algorithm(self) -> &'static [Move] {
        match self {
            CornerOrientation::H
            | CornerOrientation::Pi
            | CornerOrientation::Bowtie
            | CornerOrientation::T
            | CornerOrientation::Sune => &TWIST,
            CornerOrientation::Headlights | CornerOrientation::AntiSune => &TWIST_INVERSE,
        }
    }
}

fn classify_corner_orientation(cube: &CubeState) -> Step<CornerOrientation> {
    let down = cube.down_color();
    let white = |face, position| cube[Facelet(face, position)] == down;
    let twisted = [0, 2, 4, 6]
        .into_iter()
        .filter(|&position| !white(Down, position))
        .count();

    match twisted {
        0 => Step::Done,
        _ if net_twist(cube) != 0 => Step::Unsolvable,
        4 if white(Left, 4) && white(Left, 6) && white(Right, 4) && white(Right, 6) => {
            Step::Apply(CornerOrientation::H)
        }
        4 if white(Left, 4) && white(Left, 6) && white(Front, 4) && white(Back, 6) => {
            Step::Apply(CornerOrientation::Pi)
        }
        2 if white(Front, 6) && white(Right, 4) => Step::Apply(CornerOrientation::Bowtie),
        2 if white(Front, 6) && white(Back, 4) => Step::Apply(CornerOrientation::T),
        2 if white(Back, 4) && white(Back, 6) => Step::Apply(CornerOrientation::Headlights),
        3 if white(Front, 4) && white(Right, 4) && white(Back, 4) => {
            Step::Apply(CornerOrientation::Sune)
        }
        3 if white(Front, 6) && white(Right, 6) && white(Back, 6) => {
            Step::Apply(CornerOrientation::AntiSune)
        }
        _ => Step::Rotate,
    }
}

pub(super) fn orient_corners(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    drive(cube, budget, classify_corner_orientation)
}

/// The two edge three-cycles, named for the direction of their bottom layer
/// turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeCycle {
    Clockwise,
    CounterClockwise,
}

impl Case for EdgeCycle {
    fn algorithm(self) -> &'static [Move] {
        match self {
            EdgeCycle::Clockwise => &EDGE_CYCLE_CLOCKWISE,
            EdgeCycle::CounterClockwise => &EDGE_CYCLE_COUNTER_CLOCKWISE,
        }
    }
}

fn classify_edge_permutation(cube: &CubeState) -> Step<EdgeCycle> {
    let side = |face| cube[Facelet(face, 5)];
    let (left, front, right, back) = (
        cube.left_color(),
        cube.front_color(),
        cube.right_color(),
        cube.back_color(),
    );
    let placed = [(Left, left), (Front, front), (Right, right), (Back, back)]
        .into_iter()
        .filter(|&(face, color)| side(face) == color)
        .count();

    match placed {
        4 => Step::Done,
        2 => Step::Unsolvable,
        0 if side(Front) == right || side(Right) == back || side(Back) == front => {
            Step::Apply(EdgeCycle::Clockwise)
        }
        0 if side(Back) == right || side(Front) == back || side(Right) == front => {
            Step::Apply(EdgeCycle::CounterClockwise)
        }
        0 => Step::Rotate,
        _ if side(Left) != left => Step::Rotate,
        _ if side(Back) == front => Step::Apply(EdgeCycle::Clockwise),
        _ => Step::Apply(EdgeCycle::CounterClockwise),
    }
}

pub(super) fn permute_edges(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    drive(cube, budget, classify_edge_permutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, solver::Stage};

    fn with_stickers(stickers: &[(Face, usize, Color)]) -> CubeState {
        let mut facelets = *CubeState::solved().facelets();
        for &(face, position, color) in stickers {
            facelets[face.index()][position] = color;
        }
        CubeState::from_facelets(facelets)
    }

    #[test]
    fn solved_last_layer_needs_nothing() {
        let cube = CubeState::solved();
        assert_eq!(classify_edge_orientation(&cube), Step::Done);
        assert_eq!(corners_placed(&cube), Ok(true));
        assert_eq!(classify_corner_orientation(&cube), Step::Done);
        assert_eq!(classify_edge_permutation(&cube), Step::Done);
    }

    #[test]
    fn flipped_edge_is_unsolvable() {
        let cube = with_stickers(&[(Front, 5, Color::White), (Down, 1, Color::Orange)]);
        assert!(cube.has_integrity());
        assert_eq!(classify_edge_orientation(&cube), Step::Unsolvable);
    }

    #[test]
    fn twisted_corner_is_unsolvable() {
        let cube = with_stickers(&[
            (Front, 4, Color::White),
            (Right, 6, Color::Orange),
            (Down, 2, Color::Blue),
        ]);
        assert!(cube.has_integrity());
        assert_eq!(corners_placed(&cube), Ok(true));
        assert_eq!(classify_corner_orientation(&cube), Step::Unsolvable);
    }

    #[test]
    fn net_twist_follows_the_twists() {
        assert_eq!(net_twist(&CubeState::solved()), 0);

        let clockwise = with_stickers(&[
            (Front, 4, Color::White),
            (Right, 6, Color::Orange),
            (Down, 2, Color::Blue),
        ]);
        let counter_clockwise = with_stickers(&[
            (Front, 4, Color::Blue),
            (Right, 6, Color::White),
            (Down, 2, Color::Orange),
        ]);
        assert_eq!(net_twist(&clockwise), 2);
        assert_eq!(net_twist(&counter_clockwise), 1);

        for algorithm in [TWIST, TWIST_INVERSE] {
            let mut cube = CubeState::solved();
            cube.apply_moves(&algorithm).unwrap();
            assert_eq!(net_twist(&cube), 0);

            let mut cube = clockwise.clone();
            cube.apply_moves(&algorithm).unwrap();
            assert_eq!(net_twist(&cube), 2);
        }
    }

    #[test]
    fn twisted_corner_pairs_are_unsolvable() {
        // Two corners twisted the same way.
        let cube = with_stickers(&[
            (Front, 4, Color::White),
            (Right, 6, Color::Orange),
            (Down, 2, Color::Blue),
            (Front, 6, Color::Green),
            (Left, 4, Color::White),
            (Down, 0, Color::Orange),
        ]);
        assert!(cube.has_integrity());
        assert_eq!(net_twist(&cube), 1);
        assert_eq!(classify_corner_orientation(&cube), Step::Unsolvable);
    }

    #[test]
    fn swapped_edges_are_unsolvable() {
        let cube = with_stickers(&[(Front, 5, Color::Green), (Left, 5, Color::Orange)]);
        assert!(cube.has_integrity());
        assert_eq!(classify_edge_orientation(&cube), Step::Done);
        assert_eq!(classify_edge_permutation(&cube), Step::Unsolvable);
    }

    #[test]
    fn edge_cycles_are_resolved() {
        for algorithm in [EDGE_CYCLE_CLOCKWISE, EDGE_CYCLE_COUNTER_CLOCKWISE] {
            let mut cube = CubeState::solved();
            cube.apply_moves(&algorithm).unwrap();
            assert!(!cube.is_solved());

            let mut budget = IterationBudget::new(Stage::PermuteLastLayerEdges, 100);
            assert_eq!(permute_edges(&mut cube, &mut budget), Ok(Progress::Finished));
            assert!(cube.is_solved(), "{cube}");
        }
    }

    #[test]
    fn corner_swaps_are_resolved() {
        let algorithms: [&[Move]; 3] = [&CORNER_SWAP, &SWAP_LEFT, &SWAP_DIAGONAL];
        for algorithm in algorithms {
            let mut cube = CubeState::solved();
            cube.apply_moves(algorithm).unwrap();

            let mut budget = IterationBudget::new(Stage::PermuteLastLayerCorners, 100);
            assert_eq!(permute_corners(&mut cube, &mut budget), Ok(Progress::Finished));
            assert_eq!(corners_placed(&cube), Ok(true));
        }
    }

    #[test]
    fn corner_twists_are_resolved() {
        for algorithm in [TWIST, TWIST_INVERSE] {
            let mut cube = CubeState::solved();
            cube.apply_moves(&algorithm).unwrap();
            assert!(!cube.is_solved());

            let mut budget = IterationBudget::new(Stage::OrientLastLayerCorners, 100);
            assert_eq!(orient_corners(&mut cube, &mut budget), Ok(Progress::Finished));
            assert_eq!(classify_corner_orientation(&cube), Step::Done);
        }
    }

    #[test]
    fn edge_flips_are_resolved() {
        for algorithm in [FLIP_ANGLE, FLIP_LINE] {
            let mut cube = CubeState::solved();
            cube.apply_moves(&algorithm).unwrap();

            let mut budget = IterationBudget::new(Stage::OrientLastLayerEdges, 100);
            assert_eq!(orient_edges(&mut cube, &mut budget), Ok(Progress::Finished));
            assert_eq!(classify_edge_orientation(&cube), Step::Done);
        }
    }
}

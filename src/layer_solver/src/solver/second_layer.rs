use super::{Case, IterationBudget, Progress, apply_case};
use crate::{
    Color, CubeState, Face,
    Face::{Back, Down, Front, Left, Right},
    Facelet, Move,
    Move::{D, DPrime, F, FPrime, Y, YPrime},
    SolveError,
    locate::locate_edge,
};

/// Drops the edge at front-down into the front-left slot.
const INSERT_LEFT: [Move; 10] = [D, Y, F, DPrime, FPrime, YPrime, DPrime, FPrime, D, F];
/// Drops the edge at front-down into the front-right slot.
const INSERT_RIGHT: [Move; 10] = [DPrime, YPrime, FPrime, D, F, Y, D, F, DPrime, FPrime];

/// Side and down sticker of each down-layer edge.
const BOTTOM_EDGES: [(Facelet, Facelet); 4] = [
    (Facelet(Left, 5), Facelet(Down, 7)),
    (Facelet(Front, 5), Facelet(Down, 1)),
    (Facelet(Right, 5), Facelet(Down, 3)),
    (Facelet(Back, 5), Facelet(Down, 5)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    Left,
    Right,
}

impl Insertion {
    const BOTH: [Self; 2] = [Self::Left, Self::Right];

    fn side(self) -> Face {
        match self {
            Insertion::Left => Left,
            Insertion::Right => Right,
        }
    }

    /// Whether the front slot on this side already holds its edge.
    fn placed(self, cube: &CubeState) -> bool {
        let side_sticker = match self {
            Insertion::Left => Facelet(Left, 3),
            Insertion::Right => Facelet(Right, 7),
        };
        let front_sticker = match self {
            Insertion::Left => Facelet(Front, 7),
            Insertion::Right => Facelet(Front, 3),
        };
        cube[front_sticker] == cube.front_color()
            && cube[side_sticker] == cube.expected_color(self.side())
    }
}

impl Case for Insertion {
    fn algorithm(self) -> &'static [Move] {
        match self {
            Insertion::Left => &INSERT_LEFT,
            Insertion::Right => &INSERT_RIGHT,
        }
    }
}

fn middle_layer_solved(cube: &CubeState) -> bool {
    Insertion::BOTH.into_iter().all(|insertion| insertion.placed(cube))
        && cube[Facelet(Left, 7)] == cube.left_color()
        && cube[Facelet(Back, 3)] == cube.back_color()
        && cube[Facelet(Right, 3)] == cube.right_color()
        && cube[Facelet(Back, 7)] == cube.back_color()
}

/// Whether a down-layer edge shows the front color on its side and `color`
/// underneath.
fn aligned_in_bottom(cube: &CubeState, color: Color) -> bool {
    let front = cube.front_color();
    BOTTOM_EDGES
        .into_iter()
        .any(|(side, down)| cube[side] == front && cube[down] == color)
}

/// Whether some down-layer edge belongs to the middle layer.
fn middle_edges_in_bottom(cube: &CubeState) -> bool {
    let down_color = cube.down_color();
    BOTTOM_EDGES
        .into_iter()
        .any(|(side, down)| cube[side] != down_color && cube[down] != down_color)
}

/// Insert every middle-layer edge waiting in the down layer, then knock a
/// misplaced middle edge down into the down layer and repeat.
pub(super) fn edges(
    cube: &mut CubeState,
    budget: &mut IterationBudget,
) -> Result<Progress, SolveError> {
    while !middle_layer_solved(cube) {
        budget.tick()?;

        while middle_edges_in_bottom(cube) {
            budget.tick()?;
            for insertion in Insertion::BOTH {
                if insertion.placed(cube) {
                    continue;
                }

                let front = cube.front_color();
                let target = cube.expected_color(insertion.side());
                let edge = locate_edge(cube, front, target)?;
                if edge.on_face(Down) && aligned_in_bottom(cube, target) {
                    while !(cube[Facelet(Front, 5)] == front && cube[Facelet(Down, 1)] == target) {
                        budget.tick()?;
                        cube.apply_move(D)?;
                    }
                    apply_case(cube, budget.stage, insertion)?;
                }
            }
            cube.apply_move(Y)?;
        }

        let mut moved = false;
        while !moved && !middle_layer_solved(cube) {
            budget.tick()?;
            let unplaced = Insertion::BOTH
                .into_iter()
                .find(|insertion| !insertion.placed(cube));
            match unplaced {
                Some(insertion) => {
                    apply_case(cube, budget.stage, insertion)?;
                    moved = true;
                }
                None => cube.apply_move(Y)?,
            }
        }
    }

    Ok(Progress::Finished)
}

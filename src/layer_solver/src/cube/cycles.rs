//! Sticker cycles of the three elementary quarter turns. A cycle `[a, b, c, d]`
//! carries the sticker at `a` to `b`, `b` to `c`, `c` to `d` and `d` to `a`.

use super::{
    Face::{Back, Down, Front, Left, Right, Up},
    Facelet,
};
use crate::MoveGroup;

pub(super) type Cycle = [Facelet; 4];

const fn at(face: super::Face, position: usize) -> Facelet {
    Facelet(face, position)
}

/// Front face clockwise, seen from the front.
const FRONT: [Cycle; 5] = [
    [at(Left, 2), at(Up, 4), at(Right, 6), at(Down, 0)],
    [at(Left, 3), at(Up, 5), at(Right, 7), at(Down, 1)],
    [at(Left, 4), at(Up, 6), at(Right, 0), at(Down, 2)],
    [at(Front, 0), at(Front, 2), at(Front, 4), at(Front, 6)],
    [at(Front, 1), at(Front, 3), at(Front, 5), at(Front, 7)],
];

/// Down face clockwise, seen from below.
const BOTTOM: [Cycle; 5] = [
    [at(Left, 4), at(Front, 4), at(Right, 4), at(Back, 4)],
    [at(Left, 5), at(Front, 5), at(Right, 5), at(Back, 5)],
    [at(Left, 6), at(Front, 6), at(Right, 6), at(Back, 6)],
    [at(Down, 0), at(Down, 2), at(Down, 4), at(Down, 6)],
    [at(Down, 1), at(Down, 3), at(Down, 5), at(Down, 7)],
];

/// The whole cube about the vertical axis, clockwise seen from below.
const WHOLE_CUBE: [Cycle; 12] = [
    [at(Front, 0), at(Right, 0), at(Back, 0), at(Left, 0)],
    [at(Front, 1), at(Right, 1), at(Back, 1), at(Left, 1)],
    [at(Front, 2), at(Right, 2), at(Back, 2), at(Left, 2)],
    [at(Front, 3), at(Right, 3), at(Back, 3), at(Left, 3)],
    [at(Front, 4), at(Right, 4), at(Back, 4), at(Left, 4)],
    [at(Front, 5), at(Right, 5), at(Back, 5), at(Left, 5)],
    [at(Front, 6), at(Right, 6), at(Back, 6), at(Left, 6)],
    [at(Front, 7), at(Right, 7), at(Back, 7), at(Left, 7)],
    [at(Up, 0), at(Up, 6), at(Up, 4), at(Up, 2)],
    [at(Up, 1), at(Up, 7), at(Up, 5), at(Up, 3)],
    [at(Down, 0), at(Down, 2), at(Down, 4), at(Down, 6)],
    [at(Down, 1), at(Down, 3), at(Down, 5), at(Down, 7)],
];

pub(super) const fn of(group: MoveGroup) -> &'static [Cycle] {
    match group {
        MoveGroup::FrontLayer => &FRONT,
        MoveGroup::BottomLayer => &BOTTOM,
        MoveGroup::WholeCube => &WHOLE_CUBE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn cycles_are_disjoint() {
        for group in MoveGroup::ALL {
            let mut seen = HashSet::new();
            for facelet in of(group).iter().flatten() {
                assert!(facelet.1 < 8);
                assert!(seen.insert(*facelet), "{facelet} repeats in {group:?}");
            }
        }
    }
}

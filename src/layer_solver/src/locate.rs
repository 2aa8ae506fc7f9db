use crate::{
    Color, CubeState, Face,
    Face::{Back, Down, Front, Left, Right, Up},
    Facelet, SolveError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSlot {
    UpFront,
    UpLeft,
    UpBack,
    UpRight,
    FrontLeft,
    FrontRight,
    LeftBack,
    RightBack,
    FrontDown,
    LeftDown,
    RightDown,
    BackDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerSlot {
    UpLeftFront,
    UpRightFront,
    FrontLeftDown,
    FrontRightDown,
    UpLeftBack,
    UpRightBack,
    LeftBackDown,
    RightBackDown,
}

/// Sticker positions of each edge slot, indexed by [`EdgeSlot`].
pub const EDGE_SLOTS: [[Facelet; 2]; 12] = [
    [Facelet(Up, 5), Facelet(Front, 1)],
    [Facelet(Up, 7), Facelet(Left, 1)],
    [Facelet(Up, 1), Facelet(Back, 1)],
    [Facelet(Up, 3), Facelet(Right, 1)],
    [Facelet(Front, 7), Facelet(Left, 3)],
    [Facelet(Front, 3), Facelet(Right, 7)],
    [Facelet(Left, 7), Facelet(Back, 3)],
    [Facelet(Right, 3), Facelet(Back, 7)],
    [Facelet(Front, 5), Facelet(Down, 1)],
    [Facelet(Left, 5), Facelet(Down, 7)],
    [Facelet(Right, 5), Facelet(Down, 3)],
    [Facelet(Back, 5), Facelet(Down, 5)],
];

/// Sticker positions of each corner slot, indexed by [`CornerSlot`].
pub const CORNER_SLOTS: [[Facelet; 3]; 8] = [
    [Facelet(Up, 6), Facelet(Left, 2), Facelet(Front, 0)],
    [Facelet(Up, 4), Facelet(Right, 0), Facelet(Front, 2)],
    [Facelet(Front, 6), Facelet(Left, 4), Facelet(Down, 0)],
    [Facelet(Front, 4), Facelet(Right, 6), Facelet(Down, 2)],
    [Facelet(Up, 0), Facelet(Left, 0), Facelet(Back, 2)],
    [Facelet(Up, 2), Facelet(Right, 2), Facelet(Back, 0)],
    [Facelet(Left, 6), Facelet(Back, 4), Facelet(Down, 6)],
    [Facelet(Right, 4), Facelet(Back, 6), Facelet(Down, 4)],
];

impl EdgeSlot {
    pub const ALL: [Self; 12] = [
        Self::UpFront,
        Self::UpLeft,
        Self::UpBack,
        Self::UpRight,
        Self::FrontLeft,
        Self::FrontRight,
        Self::LeftBack,
        Self::RightBack,
        Self::FrontDown,
        Self::LeftDown,
        Self::RightDown,
        Self::BackDown,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn facelets(self) -> [Facelet; 2] {
        EDGE_SLOTS[self.index()]
    }
}

impl CornerSlot {
    pub const ALL: [Self; 8] = [
        Self::UpLeftFront,
        Self::UpRightFront,
        Self::FrontLeftDown,
        Self::FrontRightDown,
        Self::UpLeftBack,
        Self::UpRightBack,
        Self::LeftBackDown,
        Self::RightBackDown,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn facelets(self) -> [Facelet; 3] {
        CORNER_SLOTS[self.index()]
    }
}

/// A snapshot of the piece found in one slot. It does not follow the piece
/// when the cube moves afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator<S, const N: usize> {
    slot: S,
    stickers: [(Face, Color); N],
}

pub type EdgeLocator = Locator<EdgeSlot, 2>;
pub type CornerLocator = Locator<CornerSlot, 3>;

impl<S: Copy, const N: usize> Locator<S, N> {
    fn capture(cube: &CubeState, slot: S, facelets: [Facelet; N]) -> Self {
        Locator {
            slot,
            stickers: facelets.map(|facelet| (facelet.0, cube[facelet])),
        }
    }

    #[must_use]
    pub fn slot(&self) -> S {
        self.slot
    }

    /// The `(face, color)` of each sticker in slot order.
    #[must_use]
    pub fn stickers(&self) -> [(Face, Color); N] {
        self.stickers
    }

    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.stickers.iter().any(|&(_, c)| c == color)
    }

    #[must_use]
    pub fn on_face(&self, face: Face) -> bool {
        self.stickers.iter().any(|&(f, _)| f == face)
    }

    /// Index within the slot of the sticker showing `color`.
    #[must_use]
    pub fn sticker_with(&self, color: Color) -> Option<usize> {
        self.stickers.iter().position(|&(_, c)| c == color)
    }
}

fn locate<S: Copy, const N: usize>(
    cube: &CubeState,
    slots: impl IntoIterator<Item = (S, [Facelet; N])>,
    colors: &[Color],
) -> Result<Locator<S, N>, SolveError> {
    slots
        .into_iter()
        .map(|(slot, facelets)| Locator::capture(cube, slot, facelets))
        .find(|locator| colors.iter().all(|&color| locator.has_color(color)))
        .ok_or_else(|| SolveError::PieceNotFound {
            colors: colors.to_vec(),
        })
}

/// Find the first edge slot whose stickers show both colors.
///
/// # Errors
///
/// If no slot holds that edge, which means the cube has lost its integrity.
pub fn locate_edge(cube: &CubeState, a: Color, b: Color) -> Result<EdgeLocator, SolveError> {
    locate(
        cube,
        EdgeSlot::ALL.map(|slot| (slot, slot.facelets())),
        &[a, b],
    )
}

/// Find the first corner slot whose stickers show all three colors.
///
/// # Errors
///
/// If no slot holds that corner.
pub fn locate_corner(
    cube: &CubeState,
    a: Color,
    b: Color,
    c: Color,
) -> Result<CornerLocator, SolveError> {
    locate(
        cube,
        CornerSlot::ALL.map(|slot| (slot, slot.facelets())),
        &[a, b, c],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn solved_pieces_are_home() {
        let cube = CubeState::solved();
        let edge = locate_edge(&cube, Color::Yellow, Color::Orange).unwrap();
        assert_eq!(edge.slot(), EdgeSlot::UpFront);
        assert_eq!(edge.sticker_with(Color::Yellow), Some(0));

        let corner = locate_corner(&cube, Color::White, Color::Red, Color::Blue).unwrap();
        assert_eq!(corner.slot(), CornerSlot::RightBackDown);
        assert!(corner.on_face(Face::Back));
        assert!(!corner.on_face(Face::Up));
    }

    #[test]
    fn every_sticker_belongs_to_one_slot() {
        let mut seen = std::collections::HashSet::new();
        for facelet in EDGE_SLOTS.iter().flatten().chain(CORNER_SLOTS.iter().flatten()) {
            assert!(seen.insert(*facelet));
            assert_eq!(facelet.1 % 2 == 1, EDGE_SLOTS.iter().flatten().any(|f| f == facelet));
        }
        assert_eq!(seen.len(), 48);
    }

    #[test]
    fn follows_moved_pieces() {
        let mut cube = CubeState::solved();
        cube.apply_move(Move::F).unwrap();

        let edge = locate_edge(&cube, Color::Yellow, Color::Orange).unwrap();
        assert_eq!(edge.slot(), EdgeSlot::FrontRight);
        assert_eq!(
            edge.stickers(),
            [(Face::Front, Color::Orange), (Face::Right, Color::Yellow)]
        );
        assert_eq!(edge.sticker_with(Color::Yellow), Some(1));

        let corner = locate_corner(&cube, Color::Yellow, Color::Orange, Color::Blue).unwrap();
        assert_eq!(corner.slot(), CornerSlot::FrontRightDown);
        assert_eq!(corner.sticker_with(Color::Yellow), Some(1));
    }

    #[test]
    fn missing_piece_is_an_error() {
        let cube = CubeState::solved();
        assert_eq!(
            locate_edge(&cube, Color::Yellow, Color::White),
            Err(SolveError::PieceNotFound {
                colors: vec![Color::Yellow, Color::White]
            })
        );
        let unknown = CubeState::new();
        assert!(locate_corner(&unknown, Color::Yellow, Color::Orange, Color::Blue).is_err());
    }
}

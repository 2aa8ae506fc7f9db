use std::{fmt, str::FromStr};

use thiserror::Error;

/// One of the three independent quarter-turn axes the robot can drive. Moves
/// in the same group form a cyclic group of order four; moves in different
/// groups generally do not commute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveGroup {
    /// Turns of the face nearest the fork.
    FrontLayer,
    /// Turns of the face resting on the turntable.
    BottomLayer,
    /// Rotations of the whole cube about the vertical axis.
    WholeCube,
}

impl MoveGroup {
    pub const ALL: [Self; 3] = [Self::FrontLayer, Self::BottomLayer, Self::WholeCube];

    /// The group's quarter, inverse quarter and half turn, in that order.
    #[must_use]
    pub const fn moves(self) -> [Move; 3] {
        match self {
            MoveGroup::FrontLayer => [Move::F, Move::FPrime, Move::F2],
            MoveGroup::BottomLayer => [Move::D, Move::DPrime, Move::D2],
            MoveGroup::WholeCube => [Move::Y, Move::YPrime, Move::Y2],
        }
    }

    /// The move of this group that performs `turns` clockwise quarter turns,
    /// taken modulo four.
    #[must_use]
    pub const fn from_quarter_turns(self, turns: i8) -> Move {
        let [quarter, inverse, half] = self.moves();
        match turns.rem_euclid(4) {
            0 => Move::Null,
            1 => quarter,
            2 => half,
            _ => inverse,
        }
    }
}

/// A move symbol.
///
/// `Y` rotates the whole cube a quarter turn clockwise as seen from the Down
/// face, carrying the Front face to the Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    F,
    FPrime,
    F2,
    D,
    DPrime,
    D2,
    Y,
    YPrime,
    Y2,
    /// The identity. Only ever produced by composition.
    Null,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown move `{token}`; expected one of F F' F2 D D' D2 Y Y' Y2")]
pub struct MoveParseError {
    pub token: String,
}

impl Move {
    pub const ALL: [Self; 10] = [
        Self::F,
        Self::FPrime,
        Self::F2,
        Self::D,
        Self::DPrime,
        Self::D2,
        Self::Y,
        Self::YPrime,
        Self::Y2,
        Self::Null,
    ];

    /// Every move that actually changes the cube.
    pub const TURNS: [Self; 9] = [
        Self::F,
        Self::FPrime,
        Self::F2,
        Self::D,
        Self::DPrime,
        Self::D2,
        Self::Y,
        Self::YPrime,
        Self::Y2,
    ];

    #[must_use]
    pub const fn group(self) -> Option<MoveGroup> {
        match self {
            Move::F | Move::FPrime | Move::F2 => Some(MoveGroup::FrontLayer),
            Move::D | Move::DPrime | Move::D2 => Some(MoveGroup::BottomLayer),
            Move::Y | Move::YPrime | Move::Y2 => Some(MoveGroup::WholeCube),
            Move::Null => None,
        }
    }

    /// Signed number of clockwise quarter turns this symbol stands for.
    #[must_use]
    pub const fn quantum(self) -> i8 {
        match self {
            Move::F | Move::D | Move::Y => 1,
            Move::FPrime | Move::DPrime | Move::YPrime => -1,
            Move::F2 | Move::D2 | Move::Y2 => 2,
            Move::Null => 0,
        }
    }

    /// The single move equivalent to performing `self` and `other` back to
    /// back, or `None` if they are not in the same group.
    #[must_use]
    pub fn compose(self, other: Move) -> Option<Move> {
        let group = self.group()?;
        if other.group()? != group {
            return None;
        }

        Some(group.from_quarter_turns(self.quantum() + other.quantum()))
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        match self.group() {
            Some(group) => group.from_quarter_turns(-self.quantum()),
            None => Move::Null,
        }
    }

    #[must_use]
    pub const fn notation(self) -> &'static str {
        match self {
            Move::F => "F",
            Move::FPrime => "F'",
            Move::F2 => "F2",
            Move::D => "D",
            Move::DPrime => "D'",
            Move::D2 => "D2",
            Move::Y => "Y",
            Move::YPrime => "Y'",
            Move::Y2 => "Y2",
            Move::Null => "-",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::TURNS
            .into_iter()
            .find(|move_| move_.notation() == s)
            .ok_or_else(|| MoveParseError {
                token: s.to_owned(),
            })
    }
}

/// Parse a whitespace separated move sequence such as `"F D' Y2"`.
///
/// # Errors
///
/// If any token is not a move symbol.
pub fn parse_moves(sequence: &str) -> Result<Vec<Move>, MoveParseError> {
    sequence.split_whitespace().map(str::parse).collect()
}

/// Concatenate fixed algorithms at compile time. `N` must equal the total
/// length of `parts`.
pub(crate) const fn concat_moves<const N: usize>(parts: &[&[Move]]) -> [Move; N] {
    let mut out = [Move::Null; N];
    let mut len = 0;
    let mut p = 0;
    while p < parts.len() {
        let part = parts[p];
        let mut i = 0;
        while i < part.len() {
            out[len] = part[i];
            len += 1;
            i += 1;
        }
        p += 1;
    }
    assert!(len == N, "concatenated length does not match the output length");
    out
}

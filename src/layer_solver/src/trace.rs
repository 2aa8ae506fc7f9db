use std::{fmt, slice};

use itertools::Itertools;

use crate::{Move, MoveGroup, SolveError};

pub const DEFAULT_TRACE_CAPACITY: usize = 1000;

/// An ordered record of the moves applied while a cube was recording, bounded
/// to a fixed number of moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTrace {
    moves: Vec<Move>,
    capacity: usize,
}

impl Default for MoveTrace {
    fn default() -> Self {
        MoveTrace::with_capacity(DEFAULT_TRACE_CAPACITY)
    }
}

impl MoveTrace {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MoveTrace {
            moves: Vec::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Append a move.
    ///
    /// # Errors
    ///
    /// If the trace already holds `capacity` moves.
    pub fn push(&mut self, move_: Move) -> Result<(), SolveError> {
        if self.moves.len() >= self.capacity {
            return Err(SolveError::TraceCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.moves.push(move_);
        Ok(())
    }

    /// Append every move of `other`.
    ///
    /// # Errors
    ///
    /// If the combined trace would not fit in `capacity` moves. Nothing is
    /// appended in that case.
    pub fn append(&mut self, other: &MoveTrace) -> Result<(), SolveError> {
        if self.moves.len() + other.len() > self.capacity {
            return Err(SolveError::TraceCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.moves.extend_from_slice(&other.moves);
        Ok(())
    }

    /// Compact the trace in place, returning whether anything changed. See
    /// [`compact`].
    pub fn compact(&mut self) -> bool {
        compact(&mut self.moves)
    }
}

impl fmt::Display for MoveTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(" "))
    }
}

impl<'a> IntoIterator for &'a MoveTrace {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveTrace {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

/// Whether `middle` may be swapped with `before` to bring `before` next to
/// `after`. Bottom layer turns and whole-cube rotations share an axis and
/// therefore commute.
fn sandwiched(before: Move, middle: Move, after: Move) -> bool {
    let (Some(before), Some(middle), Some(after)) = (before.group(), middle.group(), after.group())
    else {
        return false;
    };

    matches!(
        (before, middle, after),
        (
            MoveGroup::BottomLayer,
            MoveGroup::WholeCube,
            MoveGroup::BottomLayer
        ) | (
            MoveGroup::WholeCube,
            MoveGroup::BottomLayer,
            MoveGroup::WholeCube
        )
    )
}

fn compact_pass(moves: &mut Vec<Move>) -> bool {
    let mut shortened = false;
    let mut i = 1;
    while i < moves.len() {
        if i + 1 < moves.len() && sandwiched(moves[i - 1], moves[i], moves[i + 1]) {
            moves.swap(i - 1, i);
        }

        if let Some(merged) = moves[i].compose(moves[i - 1]) {
            moves.remove(i);
            if merged == Move::Null {
                moves.remove(i - 1);
            } else {
                moves[i - 1] = merged;
            }
            shortened = true;
        }

        i += 1;
    }
    shortened
}

/// Merge adjacent moves of the same group and commute bottom layer turns past
/// whole-cube rotations until no pass changes anything. The net permutation of
/// the sequence is preserved. Returns whether the sequence changed.
pub fn compact(moves: &mut Vec<Move>) -> bool {
    let mut changed = false;
    while compact_pass(moves) {
        changed = true;
    }
    changed
}

use std::{
    fmt, mem,
    ops::{Deref, DerefMut, Index},
    str::FromStr,
};

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::{IntegrityError, Move, MoveGroup, SolveError, trace::MoveTrace};

mod cycles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Yellow,
    White,
    Green,
    Orange,
    Blue,
    Red,
    /// Not scanned yet.
    Unknown,
}

impl Color {
    /// The six real colors, in the order of the faces they belong to on a
    /// solved cube.
    pub const CANONICAL: [Self; 6] = [
        Self::Yellow,
        Self::White,
        Self::Green,
        Self::Orange,
        Self::Blue,
        Self::Red,
    ];

    /// Side colors in the order the side faces show them on a solved cube,
    /// starting from the left.
    pub const SIDES: [Self; 4] = [Self::Green, Self::Orange, Self::Blue, Self::Red];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Yellow => 'Y',
            Color::White => 'W',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Red => 'R',
            Color::Unknown => '?',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Color::CANONICAL
            .into_iter()
            .chain([Color::Unknown])
            .find(|color| color.letter() == letter.to_ascii_uppercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Left,
    /// The face nearest the fork.
    Front,
    Right,
    Back,
}

impl Face {
    pub const ALL: [Self; 6] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Front,
        Self::Right,
        Self::Back,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of a side face in the Left, Front, Right, Back ring.
    #[must_use]
    pub const fn side_offset(self) -> Option<usize> {
        match self {
            Face::Up | Face::Down => None,
            Face::Left => Some(0),
            Face::Front => Some(1),
            Face::Right => Some(2),
            Face::Back => Some(3),
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A sticker position: a face and an index 0..8 running clockwise from the
/// top-left corner of that face. Even indices are corner stickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facelet(pub Face, pub usize);

impl fmt::Display for Facelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletParseError {
    #[error("`{0}` is not a color letter; expected one of Y W G O B R ?")]
    UnknownLetter(char),
    #[error("Expected 48 color letters, found {0}")]
    Length(usize),
}

/// The facelet state of a cube. Centers never move so they are not stored;
/// the whole-cube rotations the robot performs are tracked by the orientation
/// index instead.
#[derive(Debug, Clone)]
pub struct CubeState {
    facelets: [[Color; 8]; 6],
    orientation: u8,
    recording: bool,
    trace: MoveTrace,
}

impl PartialEq for CubeState {
    fn eq(&self, other: &Self) -> bool {
        self.facelets == other.facelets && self.orientation == other.orientation
    }
}

impl Eq for CubeState {}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::new()
    }
}

impl Index<Facelet> for CubeState {
    type Output = Color;

    fn index(&self, Facelet(face, position): Facelet) -> &Self::Output {
        &self.facelets[face.index()][position]
    }
}

const UNKNOWN_FACELETS: [[Color; 8]; 6] = [[Color::Unknown; 8]; 6];

const SOLVED_FACELETS: [[Color; 8]; 6] = {
    let mut facelets = UNKNOWN_FACELETS;
    let mut face = 0;
    while face < 6 {
        facelets[face] = [Color::CANONICAL[face]; 8];
        face += 1;
    }
    facelets
};

impl CubeState {
    /// An unscanned cube.
    #[must_use]
    pub fn new() -> Self {
        CubeState::from_facelets(UNKNOWN_FACELETS)
    }

    #[must_use]
    pub fn solved() -> Self {
        CubeState::from_facelets(SOLVED_FACELETS)
    }

    /// A cube with the given colors, indexed by [`Face::index`] then position.
    #[must_use]
    pub fn from_facelets(facelets: [[Color; 8]; 6]) -> Self {
        CubeState {
            facelets,
            orientation: 0,
            recording: false,
            trace: MoveTrace::default(),
        }
    }

    #[must_use]
    pub fn facelets(&self) -> &[[Color; 8]; 6] {
        &self.facelets
    }

    /// Write one scanned face.
    pub fn set_face(&mut self, face: Face, colors: [Color; 8]) {
        self.facelets[face.index()] = colors;
    }

    /// Number of quarter turns the cube is rotated from its scanned
    /// orientation, in 0..4.
    #[must_use]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    #[must_use]
    pub fn trace(&self) -> &MoveTrace {
        &self.trace
    }

    /// The color `face` shows once the cube is solved, given the current
    /// orientation.
    #[must_use]
    pub fn expected_color(&self, face: Face) -> Color {
        match face.side_offset() {
            None => Color::CANONICAL[face.index()],
            Some(offset) => Color::SIDES[(usize::from(self.orientation) + offset) % 4],
        }
    }

    #[must_use]
    pub fn up_color(&self) -> Color {
        self.expected_color(Face::Up)
    }

    #[must_use]
    pub fn down_color(&self) -> Color {
        self.expected_color(Face::Down)
    }

    #[must_use]
    pub fn left_color(&self) -> Color {
        self.expected_color(Face::Left)
    }

    #[must_use]
    pub fn front_color(&self) -> Color {
        self.expected_color(Face::Front)
    }

    #[must_use]
    pub fn right_color(&self) -> Color {
        self.expected_color(Face::Right)
    }

    #[must_use]
    pub fn back_color(&self) -> Color {
        self.expected_color(Face::Back)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let expected = self.expected_color(face);
            self.facelets[face.index()]
                .iter()
                .all(|&color| color == expected)
        })
    }

    #[must_use]
    pub fn has_integrity(&self) -> bool {
        self.check_integrity().is_ok()
    }

    /// Check that every facelet was scanned and every color occurs exactly
    /// eight times.
    ///
    /// # Errors
    ///
    /// Names the first unscanned facelet, or else the first color with the
    /// wrong count.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        for face in Face::ALL {
            if let Some(position) = self.facelets[face.index()]
                .iter()
                .position(|&color| color == Color::Unknown)
            {
                return Err(IntegrityError::UnknownFacelet { face, position });
            }
        }

        let counts = self.facelets.iter().flatten().copied().counts();
        for color in Color::CANONICAL {
            let count = counts.get(&color).copied().unwrap_or(0);
            if count != 8 {
                return Err(IntegrityError::ColorCount { color, count });
            }
        }

        Ok(())
    }

    fn reset_to(&mut self, facelets: [[Color; 8]; 6]) {
        self.facelets = facelets;
        self.orientation = 0;
        self.recording = false;
        self.trace.clear();
    }

    pub fn reset_solved(&mut self) {
        self.reset_to(SOLVED_FACELETS);
    }

    pub fn reset_unknown(&mut self) {
        self.reset_to(UNKNOWN_FACELETS);
    }

    /// Reset to solved and apply `length` random turns, returning them. The
    /// scramble is not recorded.
    pub fn reset_scrambled(&mut self, length: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
        self.reset_solved();
        let scramble = (0..length)
            .map(|_| Move::TURNS[rng.usize(..Move::TURNS.len())])
            .collect_vec();
        for move_ in &scramble {
            if let Some(group) = move_.group() {
                self.turn(group, move_.quantum());
            }
        }
        scramble
    }

    /// Apply one move, appending it to the trace while recording.
    ///
    /// # Errors
    ///
    /// If recording and the trace is full. The cube is left unchanged in that
    /// case.
    pub fn apply_move(&mut self, move_: Move) -> Result<(), SolveError> {
        let Some(group) = move_.group() else {
            warn!("Ignoring a Null move");
            return Ok(());
        };

        if self.recording {
            self.trace.push(move_)?;
        }
        self.turn(group, move_.quantum());
        Ok(())
    }

    /// Apply a sequence of moves in order.
    ///
    /// # Errors
    ///
    /// See [`CubeState::apply_move`].
    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<(), SolveError> {
        moves.iter().try_for_each(|&move_| self.apply_move(move_))
    }

    fn turn(&mut self, group: MoveGroup, quantum: i8) {
        let turns = quantum.rem_euclid(4).unsigned_abs();
        let cycles = cycles::of(group);
        match turns {
            1 => cycles.iter().for_each(|&cycle| self.cycle(cycle)),
            2 => {
                for _ in 0..2 {
                    cycles.iter().for_each(|&cycle| self.cycle(cycle));
                }
            }
            3 => cycles
                .iter()
                .for_each(|&[a, b, c, d]| self.cycle([d, c, b, a])),
            _ => (),
        }

        if group == MoveGroup::WholeCube {
            self.orientation = (self.orientation + 4 - turns) % 4;
        }
    }

    fn cycle(&mut self, [a, b, c, d]: cycles::Cycle) {
        let (from_a, from_b, from_c, from_d) = (self[a], self[b], self[c], self[d]);
        self.set(b, from_a);
        self.set(c, from_b);
        self.set(d, from_c);
        self.set(a, from_d);
    }

    fn set(&mut self, Facelet(face, position): Facelet, color: Color) {
        self.facelets[face.index()][position] = color;
    }

    /// Start recording with the trace's current capacity. See
    /// [`CubeState::record_bounded`].
    pub fn record(&mut self) -> Recording<'_> {
        let capacity = self.trace.capacity();
        self.record_bounded(capacity)
    }

    /// Clear the trace and record every move applied until the returned
    /// window is dropped or finished.
    pub fn record_bounded(&mut self, capacity: usize) -> Recording<'_> {
        self.trace = MoveTrace::with_capacity(capacity);
        self.recording = true;
        Recording { cube: self }
    }
}

impl FromStr for CubeState {
    type Err = FaceletParseError;

    /// Parse 48 color letters, eight per face in [`Face::ALL`] order.
    /// Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors: Vec<Color> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Color::from_letter(c).ok_or(FaceletParseError::UnknownLetter(c)))
            .collect::<Result<_, _>>()?;

        if colors.len() != 48 {
            return Err(FaceletParseError::Length(colors.len()));
        }

        let mut facelets = UNKNOWN_FACELETS;
        for (face, chunk) in facelets.iter_mut().zip(colors.chunks_exact(8)) {
            face.copy_from_slice(chunk);
        }
        Ok(CubeState::from_facelets(facelets))
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in Face::ALL {
            writeln!(
                f,
                "{face}: {}",
                self.facelets[face.index()].iter().join(" ")
            )?;
        }
        Ok(())
    }
}

/// A recording window over a cube. Moves applied through it are appended to
/// the cube's trace.
pub struct Recording<'a> {
    cube: &'a mut CubeState,
}

impl Recording<'_> {
    /// Compact the moves recorded so far. Returns whether anything changed.
    pub fn compact_trace(&mut self) -> bool {
        self.cube.trace.compact()
    }

    /// Stop recording and take the recorded moves.
    #[must_use]
    pub fn finish(self) -> MoveTrace {
        let capacity = self.cube.trace.capacity();
        mem::replace(&mut self.cube.trace, MoveTrace::with_capacity(capacity))
    }
}

impl Deref for Recording<'_> {
    type Target = CubeState;

    fn deref(&self) -> &Self::Target {
        self.cube
    }
}

impl DerefMut for Recording<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cube
    }
}

impl Drop for Recording<'_> {
    fn drop(&mut self) {
        self.cube.recording = false;
    }
}

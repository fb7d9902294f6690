//! Puzzle data model
//!
//! - [`Peg`] and [`Move`]: the vocabulary of the puzzle
//! - [`MoveLedger`]: the ordered record of one solve
//! - [`pegs`]: the logical peg stacks mutated by the solver
//! - [`visual`]: the rendered peg stacks and their screen anchors

pub mod pegs;
pub mod visual;

use std::fmt;

pub use pegs::PegState;
pub use visual::{PegAnchor, SceneLayout, VisualPeg, VisualPegs};

/// One of the three peg positions, numbered 1 to 3 for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Peg {
    Left,
    Middle,
    Right,
}

impl Peg {
    pub const ALL: [Peg; 3] = [Peg::Left, Peg::Middle, Peg::Right];

    /// Peg from its 1-based display number
    pub fn from_number(number: u8) -> Option<Peg> {
        match number {
            1 => Some(Peg::Left),
            2 => Some(Peg::Middle),
            3 => Some(Peg::Right),
            _ => None,
        }
    }

    /// 1-based display number
    pub fn number(self) -> u8 {
        match self {
            Peg::Left => 1,
            Peg::Middle => 2,
            Peg::Right => 3,
        }
    }

    /// 0-based index into per-peg arrays
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// The peg that is neither `self` nor `other` (`6 - a - b`).
    ///
    /// Only meaningful for distinct pegs.
    pub fn spare(self, other: Peg) -> Peg {
        match self.number() + other.number() {
            3 => Peg::Right,
            4 if self != other => Peg::Middle,
            5 => Peg::Left,
            // a == b: any peg other than `self` will do
            _ => self.next(),
        }
    }

    fn next(self) -> Peg {
        match self {
            Peg::Left => Peg::Middle,
            Peg::Middle => Peg::Right,
            Peg::Right => Peg::Left,
        }
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Move the top disk of `from` onto `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Peg,
    pub to: Peg,
}

impl Move {
    pub fn new(from: Peg, to: Peg) -> Self {
        Move { from, to }
    }

    /// Build a move from 1-based peg numbers
    pub fn from_numbers(from: u8, to: u8) -> Option<Self> {
        Some(Move::new(Peg::from_number(from)?, Peg::from_number(to)?))
    }

    /// Whether the move touches `peg` as source or destination
    pub fn touches(&self, peg: Peg) -> bool {
        self.from == peg || self.to == peg
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Append-only record of the moves of a single solve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLedger {
    moves: Vec<Move>,
    counter: usize,
}

impl MoveLedger {
    pub fn new() -> Self {
        MoveLedger::default()
    }

    /// Append a move and bump the counter
    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
        self.counter += 1;
    }

    /// Drop every move; only done when a new solve starts
    pub fn clear(&mut self) {
        self.moves.clear();
        self.counter = 0;
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Total number of moves recorded since the last clear
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl<'a> IntoIterator for &'a MoveLedger {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

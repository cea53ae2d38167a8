//! Sides and pieces

use serde::{Deserialize, Serialize};

/// Player side. Red sits on rows 5-7 and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a forward step for an uncrowned piece
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// Row on which a man of this side is crowned
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 0,
            Side::Black => 7,
        }
    }

    /// Rows holding this side's pieces at the start of a game
    pub fn home_rows(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Side::Red => 5..=7,
            Side::Black => 0..=2,
        }
    }
}

/// Stable identity of a piece for the lifetime of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub king: bool,
}

impl Piece {
    pub const fn new(id: PieceId, side: Side) -> Self {
        Self { id, side, king: false }
    }

    pub const fn crowned(id: PieceId, side: Side) -> Self {
        Self { id, side, king: true }
    }

    /// Diagram character: `r`/`b` for men, `R`/`B` for kings
    pub fn symbol(&self) -> char {
        match (self.side, self.king) {
            (Side::Red, false) => 'r',
            (Side::Red, true) => 'R',
            (Side::Black, false) => 'b',
            (Side::Black, true) => 'B',
        }
    }

    /// Row deltas this piece may move along
    pub fn row_directions(&self) -> Vec<i8> {
        let forward = self.side.forward();
        if self.king {
            vec![forward, -forward]
        } else {
            vec![forward]
        }
    }
}

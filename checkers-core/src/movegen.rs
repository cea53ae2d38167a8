//! Move generation
//!
//! Captures are mandatory per piece: a piece that can jump is never offered
//! a simple step. The rule is evaluated for the queried piece only, not
//! across every piece of the side.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::pieces::Side;

/// Column deltas of the two diagonals along any row direction
const COL_DELTAS: [i8; 2] = [-1, 1];

/// A single hop: one step, or one jump within a capture chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    pub fn is_capture(&self) -> bool {
        self.from.row.abs_diff(self.to.row) == 2
    }

    /// Square of the jumped piece, for captures
    pub fn captured_square(&self) -> Option<Square> {
        if self.is_capture() {
            self.from.midpoint(self.to)
        } else {
            None
        }
    }
}

/// Diagonal directions available to the piece on `from`
fn directions(board: &Board, from: Square) -> Vec<(i8, i8)> {
    match board.get(from) {
        Some(piece) => piece
            .row_directions()
            .into_iter()
            .flat_map(|dr| COL_DELTAS.iter().map(move |&dc| (dr, dc)))
            .collect(),
        None => Vec::new(),
    }
}

/// Landing squares of every jump the piece on `from` can make
pub fn capture_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    directions(board, from)
        .into_iter()
        .filter_map(|(dr, dc)| {
            let over = from.offset(dr, dc)?;
            let landing = from.offset(dr * 2, dc * 2)?;
            let victim = board.get(over)?;
            (victim.side != piece.side && board.is_empty(landing)).then_some(landing)
        })
        .collect()
}

/// Empty adjacent squares the piece on `from` can step to
pub fn simple_destinations(board: &Board, from: Square) -> Vec<Square> {
    directions(board, from)
        .into_iter()
        .filter_map(|(dr, dc)| from.offset(dr, dc))
        .filter(|&sq| board.is_empty(sq))
        .collect()
}

/// Legal destinations for the piece on `from`.
///
/// `jump_lock` is the square of the piece that must continue a capture
/// chain, if one is active. The locked piece only gets captures; an empty
/// result means its chain is over.
pub fn legal_destinations(board: &Board, from: Square, jump_lock: Option<Square>) -> Vec<Square> {
    match jump_lock {
        Some(locked) if locked == from => capture_destinations(board, from),
        Some(_) => Vec::new(),
        None => {
            let captures = capture_destinations(board, from);
            if captures.is_empty() {
                simple_destinations(board, from)
            } else {
                captures
            }
        }
    }
}

/// Whether the piece on `attacker` could jump the piece on `target`
pub fn can_capture_over(board: &Board, attacker: Square, target: Square) -> bool {
    capture_destinations(board, attacker)
        .into_iter()
        .any(|landing| attacker.midpoint(landing) == Some(target))
}

/// Every legal move for `side`.
///
/// While a chain is active only the locked piece is considered.
pub fn legal_moves(board: &Board, side: Side, jump_lock: Option<Square>) -> Vec<Move> {
    let origins: Vec<Square> = match jump_lock {
        Some(sq) => board
            .get(sq)
            .filter(|p| p.side == side)
            .map(|_| vec![sq])
            .unwrap_or_default(),
        None => board.pieces_of(side).map(|(sq, _)| sq).collect(),
    };

    origins
        .into_iter()
        .flat_map(|from| {
            legal_destinations(board, from, jump_lock)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

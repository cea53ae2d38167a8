//! Terminal-condition detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::movegen::legal_destinations;
use crate::pieces::Side;

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(side) => write!(f, "{:?} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluate whether the game is over.
///
/// Never reports an outcome while a capture chain is active. A lone king
/// per side is a draw; otherwise a side with no movable piece loses, Red
/// checked first.
pub fn check_end(board: &Board, jump_lock: Option<Square>) -> Option<Outcome> {
    if jump_lock.is_some() {
        return None;
    }

    if is_two_kings_draw(board) {
        return Some(Outcome::Draw);
    }

    let mut red_can_move = false;
    let mut black_can_move = false;

    for (sq, piece) in board.pieces() {
        let can_move = match piece.side {
            Side::Red => &mut red_can_move,
            Side::Black => &mut black_can_move,
        };
        if !*can_move && !legal_destinations(board, sq, None).is_empty() {
            *can_move = true;
        }
        if red_can_move && black_can_move {
            return None;
        }
    }

    if !red_can_move {
        Some(Outcome::Win(Side::Black))
    } else if !black_can_move {
        Some(Outcome::Win(Side::Red))
    } else {
        None
    }
}

/// Exactly two pieces left, one king of each side
fn is_two_kings_draw(board: &Board) -> bool {
    let mut count = 0;
    let mut red_king = false;
    let mut black_king = false;

    for (_, piece) in board.pieces() {
        count += 1;
        if count > 2 {
            return false;
        }
        if piece.king {
            match piece.side {
                Side::Red => red_king = true,
                Side::Black => black_king = true,
            }
        }
    }

    count == 2 && red_king && black_king
}

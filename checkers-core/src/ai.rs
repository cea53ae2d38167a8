//! Heuristic opponent
//!
//! Picks a move by fixed priority instead of searching:
//! capture, then promotion, then squares the opponent cannot jump next ply,
//! then anything. Ties are broken uniformly at random.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Square};
use crate::error::{EngineError, Result};
use crate::game::Game;
use crate::movegen::{can_capture_over, legal_moves, Move};
use crate::pieces::Side;

/// Opponent pieces further than this from a destination cannot jump it
const THREAT_RADIUS: u8 = 2;

// ============================================================================
// HEURISTIC OPPONENT
// ============================================================================

/// Priority-driven move selector with its own seeded RNG
pub struct HeuristicOpponent {
    rng: ChaCha8Rng,
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicOpponent {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(42),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Choose a move for the side to move in `game`.
    ///
    /// Fails if the game is not running or the side has no legal move; the
    /// caller is expected to have consulted the terminal checker first.
    pub fn choose_move(&mut self, game: &Game) -> Result<Move> {
        if !game.is_in_progress() {
            return Err(EngineError::GameNotInProgress);
        }
        self.choose_move_on(game.board(), game.side_to_move(), game.jump_lock())
    }

    /// Choose a move for `side` on an arbitrary board
    pub fn choose_move_on(
        &mut self,
        board: &Board,
        side: Side,
        jump_lock: Option<Square>,
    ) -> Result<Move> {
        let moves = legal_moves(board, side, jump_lock);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves(side));
        }

        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        if !captures.is_empty() {
            if let Some(&crowning) = captures.iter().find(|mv| crowns(board, mv)) {
                return Ok(crowning);
            }
            return Ok(self.pick(&captures));
        }

        let promotions: Vec<Move> = moves.iter().copied().filter(|mv| crowns(board, mv)).collect();
        if !promotions.is_empty() {
            return Ok(self.pick(&promotions));
        }

        let safe: Vec<Move> = moves.iter().copied().filter(|mv| is_safe(board, mv)).collect();
        if safe.is_empty() {
            Ok(self.pick(&moves))
        } else {
            Ok(self.pick(&safe))
        }
    }

    /// Play moves for the side to move until its turn is over,
    /// following capture chains. Returns the hops played.
    pub fn play_turn(&mut self, game: &mut Game) -> Result<Vec<Move>> {
        let side = game.side_to_move();
        let mut hops = Vec::new();

        loop {
            let mv = self.choose_move(game)?;
            let accepted = game.submit_move(mv);
            debug_assert!(accepted, "chosen move {:?} was rejected", mv);
            hops.push(mv);

            if !game.is_in_progress() || game.side_to_move() != side {
                break;
            }
        }

        Ok(hops)
    }

    /// Let the opponent play both sides until the game ends or
    /// `max_plies` turns have been completed
    pub fn play_game(&mut self, initial: Game, max_plies: u32) -> (Game, Vec<Move>) {
        let mut game = initial;
        let mut history = Vec::new();

        while game.is_in_progress() && game.plies() < max_plies {
            match self.play_turn(&mut game) {
                Ok(hops) => history.extend(hops),
                Err(e) => {
                    tracing::warn!("Self-play stopped after {} plies: {}", game.plies(), e);
                    break;
                }
            }
        }

        (game, history)
    }

    fn pick(&mut self, moves: &[Move]) -> Move {
        moves[self.rng.gen_range(0..moves.len())]
    }
}

// ============================================================================
// MOVE CLASSIFICATION
// ============================================================================

/// Whether the move crowns an uncrowned piece
fn crowns(board: &Board, mv: &Move) -> bool {
    board
        .get(mv.from)
        .is_some_and(|piece| !piece.king && mv.to.row == piece.side.promotion_row())
}

/// Whether no opponent piece could jump the moved piece right after `mv`
fn is_safe(board: &Board, mv: &Move) -> bool {
    let mut after = board.clone();
    let Some(piece) = after.take(mv.from) else {
        return false;
    };
    if let Some(captured) = mv.captured_square() {
        after.set(captured, None);
    }
    after.set(mv.to, Some(piece));

    let threatened = after
        .pieces_of(piece.side.opponent())
        .filter(|(sq, _)| sq.distance_to(mv.to) <= THREAT_RADIUS)
        .any(|(sq, _)| can_capture_over(&after, sq, mv.to));
    !threatened
}

// ============================================================================
// TESTS
// ============================================================================

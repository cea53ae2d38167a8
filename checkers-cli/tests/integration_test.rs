//! Integration tests for the checkers engine
//!
//! Tests the full stack: board setup, move generation, the turn controller,
//! terminal detection and the heuristic opponent.

use checkers_core::{
    board::{Board, Square},
    game::{Game, GameEvent, GameMode, GameStatus, MoveKind},
    movegen::{legal_destinations, Move},
    outcome::{check_end, Outcome},
    pieces::Side,
    HeuristicOpponent,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

/// Red man on (4,3) with a two-jump chain onto the promotion row
fn chain_game() -> Game {
    let board: Board = "
        . b . . . . . .
        . . . . . . b .
        . . . . . . . .
        . . . . b . . .
        . . . r . . . .
        . . . . . . . .
        . r . . . . . .
        . . . . . . . .
    "
    .parse()
    .unwrap();
    Game::from_position(board, Side::Red, GameMode::TwoPlayer)
}

// ============================================================================
// INITIAL LAYOUT
// ============================================================================

#[test]
fn test_initial_layout() {
    let game = Game::start(GameMode::SinglePlayer { automated: Side::Black });
    let board = game.board();

    for (sq, occupant) in board.all_squares() {
        match occupant {
            Some(piece) => {
                assert!(sq.is_playable(), "piece on light square {}", sq);
                assert!(!piece.king);
                match piece.side {
                    Side::Black => assert!(sq.row <= 2),
                    Side::Red => assert!(sq.row >= 5),
                }
            }
            None => assert!(!sq.is_playable() || (3..=4).contains(&sq.row)),
        }
    }

    assert_eq!(board.count(Side::Black), 12);
    assert_eq!(board.count(Side::Red), 12);
    assert_eq!(game.side_to_move(), Side::Red);
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_simple_move_scenario() {
    let mut game = Game::start(GameMode::TwoPlayer);
    assert!(game.select_piece(sq(5, 0)));
    assert_eq!(game.destinations(), &[sq(4, 1)]);
    assert!(game.submit_destination(sq(4, 1)));
    assert_eq!(game.side_to_move(), Side::Black);
}

#[test]
fn test_forced_capture_chain_scenario() {
    let mut game = chain_game();
    game.drain_events();

    assert!(game.select_piece(sq(4, 3)));
    assert_eq!(game.destinations(), &[sq(2, 5)]);
    assert!(game.submit_destination(sq(2, 5)));
    assert!(game.board().is_empty(sq(3, 4)));
    assert_eq!(game.side_to_move(), Side::Red);

    // Second jump is the only option
    assert!(game.select_piece(sq(2, 5)));
    assert_eq!(game.destinations(), &[sq(0, 7)]);
    assert!(game.submit_destination(sq(0, 7)));
    assert!(game.board().is_empty(sq(1, 6)));
    assert!(game.board().get(sq(0, 7)).unwrap().king);
    assert_eq!(game.side_to_move(), Side::Black);

    let events = game.drain_events();
    let turn_changes: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TurnChanged { .. }))
        .collect();
    assert_eq!(turn_changes, vec![&GameEvent::TurnChanged { side: Side::Black }]);
    assert_eq!(events.last(), Some(&GameEvent::TurnChanged { side: Side::Black }));
    assert_eq!(events[1].move_kind(), Some(MoveKind::Promotion));
}

#[test]
fn test_multi_jump_lock_rejects_other_pieces() {
    let mut game = chain_game();
    assert!(game.submit_move(Move::new(sq(4, 3), sq(2, 5))));
    assert!(!game.select_piece(sq(6, 1)));
    assert!(!game.submit_move(Move::new(sq(6, 1), sq(5, 0))));
    assert_eq!(game.jump_lock(), Some(sq(2, 5)));
    assert!(game.board().get(sq(6, 1)).is_some());
}

#[test]
fn test_loss_by_no_moves_scenario() {
    // Black's only man is hemmed in against its promotion row
    let board: Board = "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . b . . . . . .
        r . r . . . . .
    "
    .parse()
    .unwrap();
    assert_eq!(check_end(&board, None), Some(Outcome::Win(Side::Red)));
}

#[test]
fn test_blocking_move_wins_game() {
    // The Red man on (7,0) could capture, but capture is only mandatory for
    // the piece that has it, so the king may block instead
    let board: Board = "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . b . R . . . .
        r . . . . . . .
    "
    .parse()
    .unwrap();
    let mut game = Game::from_position(board, Side::Red, GameMode::TwoPlayer);
    game.drain_events();

    assert!(game.submit_move(Move::new(sq(6, 3), sq(7, 2))));
    assert_eq!(game.outcome(), Some(Outcome::Win(Side::Red)));
    assert_eq!(
        game.drain_events().last(),
        Some(&GameEvent::GameEnded { outcome: Outcome::Win(Side::Red) })
    );
}

#[test]
fn test_draw_detection() {
    let mut board = Board::empty();
    board.place_king(sq(3, 2), Side::Red);
    board.place_king(sq(6, 5), Side::Black);
    assert_eq!(check_end(&board, None), Some(Outcome::Draw));

    board.place(sq(0, 1), Side::Black);
    assert_eq!(check_end(&board, None), None);
}

#[test]
fn test_draw_reached_by_capture() {
    let board: Board = "
        . B . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . b . .
        . . . . . . R .
        . . . . . . . .
        . . . . . . . .
    "
    .parse()
    .unwrap();
    let mut game = Game::from_position(board, Side::Red, GameMode::TwoPlayer);
    assert!(game.submit_move(Move::new(sq(5, 6), sq(3, 4))));
    assert_eq!(game.outcome(), Some(Outcome::Draw));
    assert!(!game.select_piece(sq(0, 1)));
}

#[test]
fn test_opponent_always_captures() {
    let board: Board = "
        . b . b . . . .
        . . . . . . . .
        . . . . . b . b
        . . b . . . . .
        . . . r . . . .
        . . . . . . . .
        . . . . . . . .
        r . . . . . . .
    "
    .parse()
    .unwrap();

    let mut seeds = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..100 {
        let game = Game::from_position(
            board.clone(),
            Side::Black,
            GameMode::SinglePlayer { automated: Side::Black },
        );
        let mut ai = HeuristicOpponent::with_seed(seeds.gen());
        let mv = ai.choose_move(&game).unwrap();
        assert!(mv.is_capture());
        assert_eq!(mv, Move::new(sq(3, 2), sq(5, 4)));
    }
}

// ============================================================================
// PROPERTIES OVER RANDOM GAMES
// ============================================================================

#[test]
fn test_properties_hold_through_self_play() {
    for seed in 0..10 {
        let mut game = Game::start(GameMode::SelfPlay);
        let mut ai = HeuristicOpponent::with_seed(seed);
        let mut kings = Vec::new();

        while game.is_in_progress() && game.plies() < 300 {
            let side = game.side_to_move();
            let chain_before = game.jump_lock();

            // Capture mandate for every movable piece of the side to move
            for (from, _) in game.board().pieces_of(side) {
                let dests = legal_destinations(game.board(), from, game.jump_lock());
                if dests.iter().any(|to| Move::new(from, *to).is_capture()) {
                    assert!(dests.iter().all(|to| Move::new(from, *to).is_capture()));
                }
            }

            let mv = ai.choose_move(&game).unwrap();
            assert!(game.submit_move(mv));

            // Turn alternation
            if game.jump_lock().is_some() {
                assert_eq!(game.side_to_move(), side);
            } else if game.is_in_progress() {
                assert_eq!(game.side_to_move(), side.opponent());
            }
            if let Some(lock) = chain_before {
                assert_eq!(lock, mv.from);
            }

            // Promotion is one-way
            for id in &kings {
                if let Some(at) = game.board().find(*id) {
                    assert!(game.board().get(at).unwrap().king);
                }
            }
            for (_, piece) in game.board().pieces() {
                if piece.king && !kings.contains(&piece.id) {
                    kings.push(piece.id);
                }
            }

            assert!(game.board().total() <= 24);
            assert!(game.board().pieces().all(|(sq, _)| sq.is_playable()));
        }

        assert!(matches!(
            game.status(),
            GameStatus::Finished(_) | GameStatus::InProgress
        ));
    }
}

#[test]
fn test_self_play_is_reproducible() {
    let mut a = HeuristicOpponent::with_seed(99);
    let mut b = HeuristicOpponent::with_seed(99);
    let (game_a, moves_a) = a.play_game(Game::start(GameMode::SelfPlay), 150);
    let (game_b, moves_b) = b.play_game(Game::start(GameMode::SelfPlay), 150);
    assert_eq!(moves_a, moves_b);
    assert_eq!(game_a.board(), game_b.board());
    assert_eq!(game_a.status(), game_b.status());
}

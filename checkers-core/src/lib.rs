//! Checkers Core - English draughts rules engine and heuristic opponent
//!
//! This crate provides the core game logic:
//! - Board geometry and occupancy (8x8, dark squares only)
//! - Move generation with per-piece mandatory capture
//! - Turn controller with multi-jump chains, promotion and events
//! - Terminal-condition detection (no moves, two-kings draw)
//! - Priority-based heuristic opponent

pub mod board;
pub mod pieces;
pub mod movegen;
pub mod game;
pub mod outcome;
pub mod ai;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Square, BOARD_SIZE};
pub use pieces::{Piece, PieceId, Side};
pub use movegen::{legal_destinations, legal_moves, Move};
pub use game::{Game, GameEvent, GameMode, GameStatus, MoveKind, Selection, TurnPhase};
pub use outcome::{check_end, Outcome};
pub use ai::HeuristicOpponent;
pub use config::GameConfig;
pub use error::{EngineError, Result};

//! Turn controller: selection, move application, capture chains and turn order

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::movegen::{capture_destinations, legal_destinations, legal_moves, Move};
use crate::outcome::{check_end, Outcome};
use crate::pieces::{PieceId, Side};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Who controls each side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Both sides entered by people at the same board
    TwoPlayer,
    /// One side played by the heuristic opponent
    SinglePlayer { automated: Side },
    /// Both sides played by the heuristic opponent
    SelfPlay,
}

impl GameMode {
    pub fn is_automated(&self, side: Side) -> bool {
        match self {
            GameMode::TwoPlayer => false,
            GameMode::SinglePlayer { automated } => *automated == side,
            GameMode::SelfPlay => true,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::SinglePlayer { automated: Side::Black }
    }
}

/// Lifecycle of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Finished(Outcome),
}

/// Where the side to move is within its turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingSelection,
    AwaitingDestination,
    MidMultiJump,
}

/// Sound-effect style classification of a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Simple,
    Capture,
    Promotion,
}

/// Notifications for the presentation layer, in mutation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PieceMoved {
        piece: PieceId,
        from: Square,
        to: Square,
        was_capture: bool,
        was_promotion: bool,
    },
    TurnChanged {
        side: Side,
    },
    GameEnded {
        outcome: Outcome,
    },
}

impl GameEvent {
    /// Classification of a `PieceMoved` event; promotion outranks capture
    pub fn move_kind(&self) -> Option<MoveKind> {
        match self {
            GameEvent::PieceMoved { was_promotion: true, .. } => Some(MoveKind::Promotion),
            GameEvent::PieceMoved { was_capture: true, .. } => Some(MoveKind::Capture),
            GameEvent::PieceMoved { .. } => Some(MoveKind::Simple),
            _ => None,
        }
    }
}

/// Currently selected piece with its precomputed destinations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub from: Square,
    pub destinations: Vec<Square>,
}

// ============================================================================
// GAME
// ============================================================================

/// One game of draughts: board, turn state and pending events.
///
/// Every interaction is forgiving. Calls that make no sense in the current
/// state (wrong side, illegal square, no game running) return `false` and
/// change nothing.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    /// Piece that must continue a capture chain
    jump_lock: Option<Square>,
    selection: Option<Selection>,
    mode: GameMode,
    status: GameStatus,
    /// Completed turns
    plies: u32,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Side::Red,
            jump_lock: None,
            selection: None,
            mode: GameMode::default(),
            status: GameStatus::NotStarted,
            plies: 0,
            events: Vec::new(),
        }
    }
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// A game in progress from the standard opening
    pub fn start(mode: GameMode) -> Self {
        let mut game = Self::default();
        game.new_game(mode);
        game
    }

    /// A game from an arbitrary position; finished at once if the
    /// position is already terminal
    pub fn from_position(board: Board, side_to_move: Side, mode: GameMode) -> Self {
        let mut game = Self {
            board,
            side_to_move,
            mode,
            status: GameStatus::InProgress,
            ..Self::default()
        };
        game.events.push(GameEvent::TurnChanged { side: side_to_move });
        if let Some(outcome) = check_end(&game.board, None) {
            game.finish(outcome);
        }
        game
    }

    /// Discard any prior state and set up the opening position, Red to move
    pub fn new_game(&mut self, mode: GameMode) {
        *self = Self {
            board: Board::standard(),
            mode,
            status: GameStatus::InProgress,
            ..Self::default()
        };
        tracing::info!("New game: {:?}", mode);
        self.events.push(GameEvent::TurnChanged { side: Side::Red });
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn jump_lock(&self) -> Option<Square> {
        self.jump_lock
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Destinations of the selected piece, empty without a selection
    pub fn destinations(&self) -> &[Square] {
        self.selection
            .as_ref()
            .map(|s| s.destinations.as_slice())
            .unwrap_or(&[])
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn phase(&self) -> TurnPhase {
        if self.jump_lock.is_some() {
            TurnPhase::MidMultiJump
        } else if self.selection.is_some() {
            TurnPhase::AwaitingDestination
        } else {
            TurnPhase::AwaitingSelection
        }
    }

    /// Whether the heuristic opponent should move next
    pub fn is_automated_turn(&self) -> bool {
        self.is_in_progress() && self.mode.is_automated(self.side_to_move)
    }

    /// Every legal move for the side to move, honouring a capture chain
    pub fn legal_moves(&self) -> Vec<Move> {
        if !self.is_in_progress() {
            return Vec::new();
        }
        legal_moves(&self.board, self.side_to_move, self.jump_lock)
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // INTERACTION
    // ========================================================================

    /// Select the piece on `sq` and compute its destinations.
    ///
    /// During a capture chain only the locked jumper can be selected.
    pub fn select_piece(&mut self, sq: Square) -> bool {
        if !self.is_in_progress() {
            tracing::debug!("Ignoring selection of {}: no game in progress", sq);
            return false;
        }

        match self.jump_lock {
            Some(locked) if locked != sq => {
                tracing::debug!("Ignoring selection of {}: {} must keep jumping", sq, locked);
                return false;
            }
            Some(_) => {}
            None => match self.board.get(sq) {
                Some(piece) if piece.side == self.side_to_move => {}
                _ => {
                    tracing::debug!(
                        "Ignoring selection of {}: no {:?} piece there",
                        sq,
                        self.side_to_move
                    );
                    return false;
                }
            },
        }

        let destinations = legal_destinations(&self.board, sq, self.jump_lock);
        self.selection = Some(Selection { from: sq, destinations });
        true
    }

    /// Move the selected piece to `to` if that is one of its destinations
    pub fn submit_destination(&mut self, to: Square) -> bool {
        if !self.is_in_progress() {
            tracing::debug!("Ignoring destination {}: no game in progress", to);
            return false;
        }

        let from = match &self.selection {
            Some(selection) if selection.destinations.contains(&to) => selection.from,
            Some(selection) => {
                tracing::debug!("Ignoring destination {}: not legal from {}", to, selection.from);
                return false;
            }
            None => {
                tracing::debug!("Ignoring destination {}: nothing selected", to);
                return false;
            }
        };

        self.apply_move(Move::new(from, to));
        true
    }

    /// Select `mv.from` then submit `mv.to`.
    ///
    /// If the destination is rejected the selection still moves to `mv.from`.
    pub fn submit_move(&mut self, mv: Move) -> bool {
        self.select_piece(mv.from) && self.submit_destination(mv.to)
    }

    /// Concede the game.
    ///
    /// Against the heuristic opponent the human side concedes; otherwise the
    /// side to move does.
    pub fn forfeit(&mut self) -> bool {
        if !self.is_in_progress() {
            return false;
        }

        let loser = match self.mode {
            GameMode::SinglePlayer { automated } => automated.opponent(),
            GameMode::TwoPlayer | GameMode::SelfPlay => self.side_to_move,
        };

        tracing::info!("{:?} forfeits", loser);
        self.finish(Outcome::Win(loser.opponent()));
        true
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    fn apply_move(&mut self, mv: Move) {
        let mut piece = self
            .board
            .take(mv.from)
            .expect("selection always refers to an occupied square");

        if let Some(captured) = mv.captured_square() {
            self.board.set(captured, None);
        }

        let was_capture = mv.is_capture();
        let was_promotion = !piece.king && mv.to.row == piece.side.promotion_row();
        if was_promotion {
            piece.king = true;
        }

        self.board.set(mv.to, Some(piece));
        self.selection = None;

        tracing::trace!(
            "{:?} {} -> {} (capture={}, promotion={})",
            piece.side,
            mv.from,
            mv.to,
            was_capture,
            was_promotion
        );
        self.events.push(GameEvent::PieceMoved {
            piece: piece.id,
            from: mv.from,
            to: mv.to,
            was_capture,
            was_promotion,
        });

        if was_capture {
            let continuation = capture_destinations(&self.board, mv.to);
            if !continuation.is_empty() {
                self.jump_lock = Some(mv.to);
                self.selection = Some(Selection {
                    from: mv.to,
                    destinations: continuation,
                });
                return;
            }
        }

        self.end_turn();
    }

    fn end_turn(&mut self) {
        self.jump_lock = None;
        self.side_to_move = self.side_to_move.opponent();
        self.plies += 1;
        self.events.push(GameEvent::TurnChanged { side: self.side_to_move });

        if let Some(outcome) = check_end(&self.board, self.jump_lock) {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = GameStatus::Finished(outcome);
        self.selection = None;
        self.jump_lock = None;
        tracing::info!("Game over after {} plies: {}", self.plies, outcome);
        self.events.push(GameEvent::GameEnded { outcome });
    }
}

// ============================================================================
// TESTS
// ============================================================================
